pub mod animation;
pub mod fetch;
pub mod widget;

pub use crate::domain::model::{AnimationOutcome, CountResponse, DisplayState};
pub use crate::domain::ports::{ConfigProvider, CountSource, DisplaySink};
pub use crate::utils::error::Result;
