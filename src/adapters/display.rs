use crate::domain::ports::DisplaySink;
use crate::utils::error::{CounterError, Result};
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

pub const DEFAULT_ELEMENT_ID: &str = "lists-enriched-counter";

/// Redraws `<element_id>: <value>` in place on stdout.
#[derive(Debug, Clone)]
pub struct TerminalDisplay {
    element_id: String,
    initial_text: Option<String>,
}

impl TerminalDisplay {
    pub fn new(element_id: impl Into<String>, initial_text: Option<String>) -> Self {
        Self {
            element_id: element_id.into(),
            initial_text,
        }
    }

    /// Ends the counter line so later output starts on a fresh one.
    pub fn finish(&self) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout).map_err(|e| self.display_error(e))?;
        stdout.flush().map_err(|e| self.display_error(e))
    }

    fn display_error(&self, e: std::io::Error) -> CounterError {
        CounterError::DisplayError {
            element_id: self.element_id.clone(),
            message: e.to_string(),
        }
    }
}

impl DisplaySink for TerminalDisplay {
    fn element_id(&self) -> &str {
        &self.element_id
    }

    fn read_text(&self) -> Option<String> {
        self.initial_text.clone()
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        write!(stdout, "\r{}: {}", self.element_id, text).map_err(|e| self.display_error(e))?;
        stdout.flush().map_err(|e| self.display_error(e))
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    text: Option<String>,
    history: Vec<String>,
    detached: bool,
}

/// In-memory element. Clones share the same slot, so a test can keep one
/// copy and hand the other to the widget.
#[derive(Debug, Clone)]
pub struct MemoryDisplay {
    element_id: String,
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryDisplay {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            inner: Arc::new(Mutex::new(MemoryInner::default())),
        }
    }

    pub fn with_text(element_id: impl Into<String>, text: impl Into<String>) -> Self {
        let display = Self::new(element_id);
        display.lock().text = Some(text.into());
        display
    }

    pub fn text(&self) -> Option<String> {
        self.lock().text.clone()
    }

    /// Every value written so far, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    pub fn clear_history(&self) {
        self.lock().history.clear();
    }

    /// Simulates the element disappearing: later writes fail.
    pub fn detach(&self) {
        self.lock().detached = true;
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DisplaySink for MemoryDisplay {
    fn element_id(&self) -> &str {
        &self.element_id
    }

    fn read_text(&self) -> Option<String> {
        self.text()
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let mut inner = self.lock();
        if inner.detached {
            return Err(CounterError::DisplayError {
                element_id: self.element_id.clone(),
                message: "element is no longer attached".to_string(),
            });
        }
        inner.text = Some(text.to_string());
        inner.history.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_display_records_writes() {
        let display = MemoryDisplay::with_text(DEFAULT_ELEMENT_ID, "3");
        assert_eq!(display.read_text().as_deref(), Some("3"));

        display.write_text("4").unwrap();
        display.write_text("5").unwrap();

        assert_eq!(display.text().as_deref(), Some("5"));
        assert_eq!(display.history(), vec!["4", "5"]);
    }

    #[test]
    fn test_memory_display_clones_share_state() {
        let display = MemoryDisplay::new(DEFAULT_ELEMENT_ID);
        let handle = display.clone();
        handle.write_text("9").unwrap();
        assert_eq!(display.text().as_deref(), Some("9"));
    }

    #[test]
    fn test_detached_display_rejects_writes() {
        let display = MemoryDisplay::new(DEFAULT_ELEMENT_ID);
        display.detach();
        let err = display.write_text("1").unwrap_err();
        assert!(matches!(err, CounterError::DisplayError { .. }));
        assert!(display.history().is_empty());
    }
}
