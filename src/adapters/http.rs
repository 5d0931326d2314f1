use crate::domain::model::CountResponse;
use crate::domain::ports::{ConfigProvider, CountSource};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_ENDPOINT_PATH: &str = "/api/lists_enriched";

/// Reads the count from `{base_url}{endpoint_path}`. One attempt per call.
#[derive(Debug, Clone)]
pub struct HttpCountSource {
    client: Client,
    url: String,
}

impl HttpCountSource {
    pub fn new(base_url: &str, endpoint_path: &str) -> Self {
        Self {
            client: Client::new(),
            url: join_url(base_url, endpoint_path),
        }
    }

    pub fn with_timeout(
        base_url: &str,
        endpoint_path: &str,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: join_url(base_url, endpoint_path),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::with_timeout(
            config.base_url(),
            config.endpoint_path(),
            config.request_timeout(),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CountSource for HttpCountSource {
    async fn fetch_count(&self) -> Result<CountResponse> {
        tracing::debug!("Making API request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        tracing::debug!("API response status: {}", response.status());
        let response = response.error_for_status()?;

        let body = response.bytes().await?;
        let count: CountResponse = serde_json::from_slice(&body)?;
        Ok(count)
    }
}

fn join_url(base_url: &str, endpoint_path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint_path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CounterError;
    use httpmock::prelude::*;

    #[test]
    fn test_join_url_handles_slashes() {
        assert_eq!(
            join_url("http://localhost:5000/", "/api/lists_enriched"),
            "http://localhost:5000/api/lists_enriched"
        );
        assert_eq!(
            join_url("http://localhost:5000", "api/lists_enriched"),
            "http://localhost:5000/api/lists_enriched"
        );
    }

    #[tokio::test]
    async fn test_fetch_count_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/lists_enriched");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(serde_json::json!({ "lists_enriched": 42 }));
            })
            .await;

        let source = HttpCountSource::new(&server.base_url(), DEFAULT_ENDPOINT_PATH);
        let count = source.fetch_count().await.unwrap();

        mock.assert_async().await;
        assert_eq!(count.lists_enriched, 42);
    }

    #[tokio::test]
    async fn test_fetch_count_server_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/lists_enriched");
                then.status(500);
            })
            .await;

        let source = HttpCountSource::new(&server.base_url(), DEFAULT_ENDPOINT_PATH);
        let err = source.fetch_count().await.unwrap_err();
        assert!(matches!(err, CounterError::ApiError(_)));
    }

    #[tokio::test]
    async fn test_fetch_count_non_json_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/lists_enriched");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let source = HttpCountSource::new(&server.base_url(), DEFAULT_ENDPOINT_PATH);
        let err = source.fetch_count().await.unwrap_err();
        assert!(matches!(err, CounterError::SerializationError(_)));
    }
}
