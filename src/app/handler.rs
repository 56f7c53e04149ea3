//! API Gateway proxy integration: unwraps the event body, runs the
//! recommender and wraps the outcome in a proxy response with CORS headers.

use crate::core::recommender::Recommender;
use crate::core::{Catalog, ObjectStorage, UploadRequest, VisionLabeler};
use crate::domain::model::ErrorResponse;
use crate::utils::error::{Result, ServiceError};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The subset of the proxy event the handler reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ProxyResponse {
    fn json(status_code: u16, allowed_origin: &str, body: String) -> Self {
        let headers = HashMap::from([
            (
                "Access-Control-Allow-Origin".to_string(),
                allowed_origin.to_string(),
            ),
            ("Content-Type".to_string(), "application/json".to_string()),
        ]);
        Self {
            status_code,
            headers,
            body,
        }
    }
}

fn parse_body(event: &ProxyRequest) -> Result<UploadRequest> {
    let raw = event
        .body
        .as_deref()
        .filter(|body| !body.trim().is_empty())
        .ok_or_else(|| ServiceError::invalid_request("request body is missing"))?;

    let request = if event.is_base64_encoded {
        serde_json::from_slice(&BASE64.decode(raw.trim())?)?
    } else {
        serde_json::from_str(raw)?
    };
    Ok(request)
}

/// Never fails: every error becomes a JSON error body with a matching status.
pub async fn handle_event<S, V, C>(
    recommender: &Recommender<S, V, C>,
    allowed_origin: &str,
    event: ProxyRequest,
) -> ProxyResponse
where
    S: ObjectStorage,
    V: VisionLabeler,
    C: Catalog,
{
    let outcome = match parse_body(&event) {
        Ok(request) => recommender.recommend(request).await,
        Err(e) => Err(e),
    };

    let rendered = outcome.and_then(|response| Ok(serde_json::to_string(&response)?));

    match rendered {
        Ok(body) => ProxyResponse::json(200, allowed_origin, body),
        Err(e) => {
            match e.status_code() {
                400..=499 => tracing::warn!("Rejected request: {}", e),
                _ => tracing::error!("Request failed: {}", e),
            }
            let body = serde_json::to_string(&ErrorResponse::new(e.to_string()))
                .unwrap_or_else(|_| r#"{"success":false}"#.to_string());
            ProxyResponse::json(e.status_code(), allowed_origin, body)
        }
    }
}
