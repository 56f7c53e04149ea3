use crate::core::ObjectStorage;
use crate::utils::error::{Result, ServiceError};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;

#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
}

impl S3Storage {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

impl ObjectStorage for S3Storage {
    async fn put_object(&self, key: &str, content_type: &str, data: &[u8]) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await
            .map_err(|err| {
                let message = match err.into_service_error() {
                    PutObjectError::EncryptionTypeMismatch(e) => {
                        format!("encryption type mismatch: {}", e)
                    }
                    PutObjectError::InvalidRequest(e) => format!("invalid request: {}", e),
                    PutObjectError::InvalidWriteOffset(e) => {
                        format!("invalid write offset: {}", e)
                    }
                    PutObjectError::TooManyParts(e) => format!("too many parts: {}", e),
                    err => DisplayErrorContext(&err).to_string(),
                };
                ServiceError::storage(format!("s3://{}/{}: {}", self.bucket, key, message))
            })?;

        tracing::debug!("Stored s3://{}/{} ({} bytes)", self.bucket, key, data.len());
        Ok(())
    }
}
