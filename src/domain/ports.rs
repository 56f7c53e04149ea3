use crate::domain::model::{Label, LabeledItem};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Durable blob store for the raw image bytes.
pub trait ObjectStorage: Send + Sync {
    fn put_object(
        &self,
        key: &str,
        content_type: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Image labeling service. Implementations should honor the thresholds
/// server-side when they can; the recommender filters the result again.
#[async_trait]
pub trait VisionLabeler: Send + Sync {
    async fn detect_labels(
        &self,
        image: &[u8],
        min_confidence: f32,
        max_labels: usize,
    ) -> Result<Vec<Label>>;
}

/// Every previously stored item.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn scan_all(&self) -> Result<Vec<LabeledItem>>;
    async fn put(&self, item: &LabeledItem) -> Result<()>;
}
