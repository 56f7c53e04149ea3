use crate::core::{Label, VisionLabeler};
use crate::utils::error::{Result, ServiceError};
use async_trait::async_trait;
use aws_sdk_rekognition::error::DisplayErrorContext;
use aws_sdk_rekognition::operation::detect_labels::DetectLabelsError;
use aws_sdk_rekognition::primitives::Blob;
use aws_sdk_rekognition::types::Image;
use aws_sdk_rekognition::Client as RekognitionClient;

#[derive(Debug, Clone)]
pub struct RekognitionLabeler {
    client: RekognitionClient,
}

impl RekognitionLabeler {
    pub fn new(client: RekognitionClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VisionLabeler for RekognitionLabeler {
    async fn detect_labels(
        &self,
        image: &[u8],
        min_confidence: f32,
        max_labels: usize,
    ) -> Result<Vec<Label>> {
        let output = self
            .client
            .detect_labels()
            .image(Image::builder().bytes(Blob::new(image.to_vec())).build())
            .max_labels(i32::try_from(max_labels).unwrap_or(i32::MAX))
            .min_confidence(min_confidence)
            .send()
            .await
            .map_err(|err| {
                ServiceError::inference(match err.into_service_error() {
                    DetectLabelsError::InvalidImageFormatException(_) => {
                        "image format is not supported".to_string()
                    }
                    DetectLabelsError::ImageTooLargeException(_) => "image is too large".to_string(),
                    DetectLabelsError::ThrottlingException(_)
                    | DetectLabelsError::ProvisionedThroughputExceededException(_) => {
                        "vision service is throttling requests".to_string()
                    }
                    err => DisplayErrorContext(&err).to_string(),
                })
            })?;

        let labels: Vec<Label> = output
            .labels()
            .iter()
            .filter_map(|label| {
                let name = label.name()?;
                Some(Label::new(name, label.confidence().unwrap_or(0.0)))
            })
            .collect();

        tracing::debug!("Rekognition returned {} labels", labels.len());
        Ok(labels)
    }
}
