use crate::domain::model::CountResponse;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait CountSource: Send + Sync {
    async fn fetch_count(&self) -> Result<CountResponse>;
}

/// A single text slot on screen, addressed by its element id.
pub trait DisplaySink: Send + Sync + 'static {
    fn element_id(&self) -> &str;
    fn read_text(&self) -> Option<String>;
    fn write_text(&self, text: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn endpoint_path(&self) -> &str;
    fn element_id(&self) -> &str;
    fn animation_duration(&self) -> Duration;
    fn tick_interval(&self) -> Duration;
    fn refresh_interval(&self) -> Option<Duration>;
    fn request_timeout(&self) -> Option<Duration>;
}
