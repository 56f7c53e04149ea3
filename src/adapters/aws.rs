use crate::adapters::{DynamoCatalog, RekognitionLabeler, S3Storage};
use crate::config::ServiceConfig;
use aws_config::{BehaviorVersion, Region};

/// The three AWS-backed ports, built from one shared SDK configuration.
pub struct AwsAdapters {
    pub storage: S3Storage,
    pub labeler: RekognitionLabeler,
    pub catalog: DynamoCatalog,
}

impl AwsAdapters {
    pub async fn from_config(config: &ServiceConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        // Custom endpoints (LocalStack, MinIO) generally lack virtual-host bucket routing.
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint_url.is_some())
            .build();

        Self {
            storage: S3Storage::new(
                aws_sdk_s3::Client::from_conf(s3_config),
                config.bucket_name.clone(),
            ),
            labeler: RekognitionLabeler::new(aws_sdk_rekognition::Client::new(&sdk_config)),
            catalog: DynamoCatalog::new(
                aws_sdk_dynamodb::Client::new(&sdk_config),
                config.table_name.clone(),
            ),
        }
    }
}
