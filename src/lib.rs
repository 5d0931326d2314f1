pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{HttpCountSource, MemoryDisplay, TerminalDisplay};
pub use config::{toml_config::TomlConfig, CounterConfig};
pub use crate::core::{
    animation::{AnimationHandle, AnimationPlan, Animator},
    fetch::fetch_lists_enriched,
    widget::CounterWidget,
};
pub use domain::model::{AnimationOutcome, CountResponse, DisplayState};
pub use domain::ports::{ConfigProvider, CountSource, DisplaySink};
pub use utils::error::{CounterError, Result};
