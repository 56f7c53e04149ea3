pub mod labels;
pub mod ranker;
pub mod recommender;

pub use crate::domain::model::{Label, LabeledItem, RecommendationResponse, UploadRequest};
pub use crate::domain::ports::{Catalog, ObjectStorage, VisionLabeler};
pub use crate::utils::error::Result;
