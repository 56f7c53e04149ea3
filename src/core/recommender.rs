use crate::config::LabelPolicy;
use crate::core::labels::{filter_labels, label_names};
use crate::core::ranker::rank;
use crate::core::{
    Catalog, LabeledItem, ObjectStorage, RecommendationResponse, Result, UploadRequest,
    VisionLabeler,
};
use crate::utils::error::ServiceError;
use crate::utils::validation::validate_image_content_type;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Runs one upload end to end: store, label, compare against the catalog,
/// then add the new item to the catalog.
pub struct Recommender<S: ObjectStorage, V: VisionLabeler, C: Catalog> {
    storage: S,
    labeler: V,
    catalog: C,
    policy: LabelPolicy,
}

impl<S: ObjectStorage, V: VisionLabeler, C: Catalog> Recommender<S, V, C> {
    pub fn new(storage: S, labeler: V, catalog: C, policy: LabelPolicy) -> Self {
        Self {
            storage,
            labeler,
            catalog,
            policy,
        }
    }

    pub fn policy(&self) -> LabelPolicy {
        self.policy
    }

    pub async fn recommend(&self, request: UploadRequest) -> Result<RecommendationResponse> {
        let image = decode_request(&request)?;
        let key = request.key;

        tracing::info!(key = %key, bytes = image.len(), "Uploading image");
        self.storage
            .put_object(&key, &request.content_type, &image)
            .await?;

        let detected = self
            .labeler
            .detect_labels(&image, self.policy.min_confidence, self.policy.max_labels)
            .await?;
        let detected_count = detected.len();
        let labels = filter_labels(detected, self.policy.min_confidence, self.policy.max_labels);
        tracing::debug!(
            "Vision service returned {} labels, kept {}",
            detected_count,
            labels.len()
        );

        let item = LabeledItem::new(key, label_names(&labels));

        let existing = self.catalog.scan_all().await?;
        tracing::debug!("Scanned {} catalog items", existing.len());

        let ranked = rank(&existing, &item);
        if let Some(best) = ranked.first() {
            tracing::debug!("Best match {} with {} shared labels", best.item.key, best.score);
        }
        let results: Vec<LabeledItem> = ranked.into_iter().map(|c| c.item.clone()).collect();

        self.catalog.put(&item).await?;

        tracing::info!(
            key = %item.key,
            labels = item.labels.len(),
            related = results.len(),
            "Image processed"
        );

        Ok(RecommendationResponse {
            success: true,
            item,
            results,
        })
    }
}

fn decode_request(request: &UploadRequest) -> Result<Vec<u8>> {
    if request.key.trim().is_empty() {
        return Err(ServiceError::invalid_request("key cannot be empty"));
    }
    validate_image_content_type(&request.content_type)?;

    let image = BASE64.decode(request.file.trim())?;
    if image.is_empty() {
        return Err(ServiceError::invalid_request("file cannot be empty"));
    }
    Ok(image)
}
