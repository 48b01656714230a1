use std::time::Duration;

use reqwest::StatusCode;
use tracing::{error, info, warn};
use url::Url;

use crate::api::types::{InitialValuesDto, InventoryItemDto, ProductionTypeDto};
use crate::draft::types::ProductionLogDraft;
use crate::error::EngineError;
use crate::recipe::types::ProductionType;

/// Display name shown when an inventory lookup fails.
pub const UNKNOWN_MATERIAL: &str = "Unknown Material";

/// Request timeout for backend calls.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Longest error-body excerpt carried into an error message.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// HTTP client for the production console backend.
///
/// One instance per backend; reqwest pools connections internally, so
/// clones share the pool and requests can run concurrently.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client rooted at `base_url`, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: &str) -> Result<Self, EngineError> {
        let base_url = normalize_base_url(base_url)?;
        let client = reqwest::Client::builder()
            .user_agent("Batchmate/0.1 (production console engine)")
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| EngineError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Fetch a production type's recipe.
    ///
    /// A 404 maps to [`EngineError::RecipeNotFound`]; other non-success
    /// statuses carry the backend's message in [`EngineError::Api`].
    pub async fn production_type(&self, id: &str) -> Result<ProductionType, EngineError> {
        let url = self.endpoint(&format!("production-types/{}", id))?;
        info!("Fetching production type '{}'", id);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error("Fetching production type", e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(EngineError::RecipeNotFound(id.to_string()));
        }
        let response = check_status(response).await?;

        let dto: ProductionTypeDto = response
            .json()
            .await
            .map_err(|e| EngineError::Network(format!("Malformed production type payload: {}", e)))?;
        Ok(ProductionType::from_dto(id, dto))
    }

    /// Fetch the pre-joined baseline payload for a production type.
    ///
    /// Shares the recipe's 404 mapping: an unknown id is a missing
    /// recipe regardless of which of its endpoints reported it.
    pub async fn initial_values(&self, id: &str) -> Result<InitialValuesDto, EngineError> {
        let url = self.endpoint(&format!("production-types/{}/initial-values", id))?;
        info!("Fetching initial values for '{}'", id);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error("Fetching initial values", e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(EngineError::RecipeNotFound(id.to_string()));
        }
        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| EngineError::Network(format!("Malformed initial values payload: {}", e)))
    }

    /// Fetch one inventory item by material id.
    pub async fn inventory_item(&self, material_id: &str) -> Result<InventoryItemDto, EngineError> {
        let url = self.endpoint(&format!("inventory/{}", material_id))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error("Fetching inventory item", e))?;
        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| EngineError::Network(format!("Malformed inventory payload: {}", e)))
    }

    /// Resolve a material's display name, degrading to a placeholder on
    /// any failure. Name lookups are cosmetic; a dead inventory endpoint
    /// must not take the form down with it.
    pub async fn material_name_or_placeholder(&self, material_id: &str) -> String {
        match self.inventory_item(material_id).await {
            Ok(item) => item.name,
            Err(e) => {
                warn!("Using placeholder name for material '{}': {}", material_id, e);
                UNKNOWN_MATERIAL.to_string()
            }
        }
    }

    /// Submit a production log draft.
    ///
    /// Success returns the persisted log as raw JSON for the console to
    /// render; failure carries the backend's message verbatim so the
    /// operator sees exactly what the server rejected.
    pub async fn create_log(
        &self,
        draft: &ProductionLogDraft,
    ) -> Result<serde_json::Value, EngineError> {
        let url = self.endpoint("production/logs")?;
        info!(
            "Submitting production log for '{}' on {}",
            draft.production_type_id, draft.date
        );

        let response = self
            .client
            .post(url)
            .json(draft)
            .send()
            .await
            .map_err(|e| transport_error("Submitting production log", e))?;
        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| EngineError::Network(format!("Malformed log creation response: {}", e)))
    }

    fn endpoint(&self, path: &str) -> Result<Url, EngineError> {
        self.base_url
            .join(path)
            .map_err(|e| EngineError::Network(format!("Invalid endpoint path '{}': {}", path, e)))
    }
}

/// Parse the base URL and force a trailing slash so `Url::join` extends
/// the path instead of replacing its last segment.
fn normalize_base_url(raw: &str) -> Result<Url, EngineError> {
    let mut url = Url::parse(raw)
        .map_err(|e| EngineError::Network(format!("Invalid base URL '{}': {}", raw, e)))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Map a non-success response to [`EngineError::Api`], extracting the
/// backend's message from the body.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, EngineError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read body>".to_string());
    let mut message = error_message_from_body(&body);
    if message.is_empty() {
        message = status.canonical_reason().unwrap_or("Unknown").to_string();
    }
    error!("API error: {} - {}", status, message);

    Err(EngineError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Extract the backend's `message` field, falling back to the raw body
/// (truncated) for non-JSON errors.
fn error_message_from_body(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    truncate_body(body.trim())
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() > MAX_ERROR_BODY_CHARS {
        let cut: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

fn transport_error(context: &str, err: reqwest::Error) -> EngineError {
    let msg = if err.is_timeout() {
        format!("{} timed out after {}s", context, REQUEST_TIMEOUT_SECS)
    } else {
        format!("{} failed: {}", context, err)
    };
    error!("{}", msg);
    EngineError::Network(msg)
}
