// Adapters layer: concrete implementations of the domain ports.

pub mod display;
pub mod http;

pub use display::{MemoryDisplay, TerminalDisplay, DEFAULT_ELEMENT_ID};
pub use http::{HttpCountSource, DEFAULT_ENDPOINT_PATH};
