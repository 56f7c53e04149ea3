pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{LabelPolicy, ServiceConfig};

#[cfg(feature = "lambda")]
pub use adapters::{AwsAdapters, DynamoCatalog, RekognitionLabeler, S3Storage};
pub use adapters::{JsonFileCatalog, LocalStorage, StaticLabeler};

pub use app::{handle_event, ProxyRequest, ProxyResponse};
pub use crate::core::ranker::{common_count, find_related, rank, Scored};
pub use crate::core::recommender::Recommender;
pub use domain::model::{Label, LabeledItem, RecommendationResponse, UploadRequest};
pub use utils::error::{Result, ServiceError};
