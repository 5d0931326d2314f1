use crate::core::{CountResponse, CountSource};

/// 只嘗試一次；任何失敗都記錄錯誤並以 0 代替
pub async fn fetch_lists_enriched<S: CountSource + ?Sized>(source: &S) -> CountResponse {
    match source.fetch_count().await {
        Ok(count) => {
            tracing::debug!("Fetched lists_enriched = {}", count.lists_enriched);
            count
        }
        Err(e) => {
            tracing::error!("Error fetching lists enriched: {}", e);
            CountResponse::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{CounterError, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSource(u64);

    #[async_trait]
    impl CountSource for FixedSource {
        async fn fetch_count(&self) -> Result<CountResponse> {
            Ok(CountResponse {
                lists_enriched: self.0,
            })
        }
    }

    #[derive(Default)]
    struct BrokenSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CountSource for BrokenSource {
        async fn fetch_count(&self) -> Result<CountResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let err = serde_json::from_str::<CountResponse>("not json").unwrap_err();
            Err(CounterError::SerializationError(err))
        }
    }

    #[tokio::test]
    async fn test_fetch_passes_through_success() {
        let count = fetch_lists_enriched(&FixedSource(77)).await;
        assert_eq!(count.lists_enriched, 77);
    }

    #[tokio::test]
    async fn test_fetch_failure_falls_back_to_zero_without_retry() {
        let source = BrokenSource::default();
        let count = fetch_lists_enriched(&source).await;
        assert_eq!(count, CountResponse::default());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }
}
