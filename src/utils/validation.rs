use crate::utils::error::{Result, ServiceError};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static S3_BUCKET_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9.-]{1,61}[a-z0-9]$").expect("valid regex"));

static DYNAMODB_TABLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]{3,255}$").expect("valid regex"));

static AWS_REGION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}(-[a-z]+)+-\d$").expect("valid regex"));

static IMAGE_CONTENT_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^image/[a-z0-9][a-z0-9.+-]*$").expect("valid regex"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> ServiceError {
    ServiceError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

/// A CORS origin is either the `*` wildcard or an http(s) URL.
pub fn validate_origin(field_name: &str, origin: &str) -> Result<()> {
    if origin == "*" {
        return Ok(());
    }
    validate_url(field_name, origin)
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // Written as containment so NaN is rejected.
    if !(min..=max).contains(&value) {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    if bucket_name.is_empty() {
        return Err(invalid(field_name, bucket_name, "S3 bucket name cannot be empty"));
    }

    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(invalid(
            field_name,
            bucket_name,
            "S3 bucket name must be between 3 and 63 characters",
        ));
    }

    if !S3_BUCKET_NAME.is_match(bucket_name) {
        return Err(invalid(
            field_name,
            bucket_name,
            "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots, \
             and must start and end with a letter or number",
        ));
    }

    Ok(())
}

pub fn validate_dynamodb_table_name(field_name: &str, table_name: &str) -> Result<()> {
    if !DYNAMODB_TABLE_NAME.is_match(table_name) {
        return Err(invalid(
            field_name,
            table_name,
            "DynamoDB table name must be 3-255 characters of letters, numbers, '_', '-' or '.'",
        ));
    }
    Ok(())
}

pub fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    validate_non_empty_string(field_name, region)?;

    if !AWS_REGION.is_match(region) {
        return Err(invalid(
            field_name,
            region,
            "AWS region must look like 'us-east-1'",
        ));
    }

    Ok(())
}

/// Request-level check; failures are reported as `InvalidRequest`, not as config errors.
/// Only the media type before any `;` parameters is checked, case-insensitively.
pub fn validate_image_content_type(content_type: &str) -> Result<()> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if !IMAGE_CONTENT_TYPE.is_match(&essence) {
        return Err(ServiceError::invalid_request(format!(
            "unsupported content type '{}', expected image/<subtype>",
            content_type
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("endpoint_url", "https://example.com").is_ok());
        assert!(validate_url("endpoint_url", "http://localhost:4566").is_ok());
        assert!(validate_url("endpoint_url", "").is_err());
        assert!(validate_url("endpoint_url", "invalid-url").is_err());
        assert!(validate_url("endpoint_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_origin() {
        assert!(validate_origin("allowed_origin", "*").is_ok());
        assert!(validate_origin(
            "allowed_origin",
            "http://image-recover.s3-website-us-east-1.amazonaws.com"
        )
        .is_ok());
        assert!(validate_origin("allowed_origin", "**").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("min_confidence", 65.0_f32, 0.0, 100.0).is_ok());
        assert!(validate_range("min_confidence", 100.5_f32, 0.0, 100.0).is_err());
        assert!(validate_range("max_labels", 0usize, 1, 1000).is_err());
        assert!(validate_range("max_labels", 1000usize, 1, 1000).is_ok());
    }

    #[test]
    fn test_validate_range_rejects_nan() {
        let nan: f32 = "NaN".parse().unwrap();
        assert!(validate_range("min_confidence", nan, 0.0, 100.0).is_err());
        assert!(validate_range("min_confidence", f32::INFINITY, 0.0, 100.0).is_err());
    }

    #[test]
    fn test_validate_s3_bucket_name() {
        assert!(validate_s3_bucket_name("bucket_name", "image-recover").is_ok());
        assert!(validate_s3_bucket_name("bucket_name", "my.images.2024").is_ok());
        assert!(validate_s3_bucket_name("bucket_name", "").is_err());
        assert!(validate_s3_bucket_name("bucket_name", "ab").is_err());
        assert!(validate_s3_bucket_name("bucket_name", "Upper-Case").is_err());
        assert!(validate_s3_bucket_name("bucket_name", "-leading").is_err());
        assert!(validate_s3_bucket_name("bucket_name", "trailing-").is_err());
    }

    #[test]
    fn test_validate_dynamodb_table_name() {
        assert!(validate_dynamodb_table_name("table_name", "image-labels").is_ok());
        assert!(validate_dynamodb_table_name("table_name", "Images_v2.prod").is_ok());
        assert!(validate_dynamodb_table_name("table_name", "ab").is_err());
        assert!(validate_dynamodb_table_name("table_name", "has space").is_err());
    }

    #[test]
    fn test_validate_aws_region() {
        assert!(validate_aws_region("region", "us-east-1").is_ok());
        assert!(validate_aws_region("region", "ap-southeast-2").is_ok());
        assert!(validate_aws_region("region", "us-gov-west-1").is_ok());
        assert!(validate_aws_region("region", "").is_err());
        assert!(validate_aws_region("region", "US-EAST-1").is_err());
        assert!(validate_aws_region("region", "useast").is_err());
    }

    #[test]
    fn test_validate_image_content_type() {
        assert!(validate_image_content_type("image/jpeg").is_ok());
        assert!(validate_image_content_type("image/svg+xml").is_ok());
        assert!(matches!(
            validate_image_content_type("text/plain"),
            Err(ServiceError::InvalidRequest { .. })
        ));
        assert!(validate_image_content_type("image/").is_err());
    }

    #[test]
    fn test_validate_image_content_type_case_and_parameters() {
        assert!(validate_image_content_type("image/JPEG").is_ok());
        assert!(validate_image_content_type("Image/Png").is_ok());
        assert!(validate_image_content_type("image/jpeg; charset=binary").is_ok());
        assert!(validate_image_content_type(" image/webp ;q=1").is_ok());
        assert!(validate_image_content_type("TEXT/plain; charset=utf-8").is_err());
        assert!(validate_image_content_type("; image/jpeg").is_err());
    }
}
