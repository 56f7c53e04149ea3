use serde::{Deserialize, Serialize};

/// An uploaded image as the catalog knows it: the object key plus the label
/// names detected for it. Label order carries no meaning and duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledItem {
    pub key: String,
    pub labels: Vec<String>,
}

impl LabeledItem {
    pub fn new(key: impl Into<String>, labels: Vec<String>) -> Self {
        Self {
            key: key.into(),
            labels,
        }
    }
}

/// One label returned by the vision service. `confidence` is a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub confidence: f32,
}

impl Label {
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

/// Body of an upload request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    pub key: String,
    #[serde(rename = "type")]
    pub content_type: String,
    /// Base64-encoded image bytes.
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub success: bool,
    pub item: LabeledItem,
    pub results: Vec<LabeledItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
