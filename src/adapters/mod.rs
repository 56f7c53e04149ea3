// Adapters layer: concrete implementations of the domain ports.

pub mod local;

#[cfg(feature = "lambda")]
pub mod aws;
#[cfg(feature = "lambda")]
pub mod dynamodb;
#[cfg(feature = "lambda")]
pub mod rekognition;
#[cfg(feature = "lambda")]
pub mod s3;

pub use local::{JsonFileCatalog, LocalStorage, StaticLabeler};

#[cfg(feature = "lambda")]
pub use aws::AwsAdapters;
#[cfg(feature = "lambda")]
pub use dynamodb::DynamoCatalog;
#[cfg(feature = "lambda")]
pub use rekognition::RekognitionLabeler;
#[cfg(feature = "lambda")]
pub use s3::S3Storage;
