use crate::model::FetchError;
use serde_json::Value;

/// A fetch counts as fulfilled only when the transport succeeds and the body parses as JSON.
#[async_trait::async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;
}
