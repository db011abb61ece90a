use async_trait::async_trait;
use gloo::net::http::Request;
use shared::{ApiErrorBody, ExpenseId, ExpenseRecord};

use crate::error::ApiError;
use crate::services::logging::Logger;

const COMPONENT: &str = "api";

/// Source of expense records for the edit form
#[async_trait(?Send)]
pub trait ExpenseSource {
    async fn get_expense(&self, id: &ExpenseId) -> Result<ExpenseRecord, ApiError>;
}

/// API client for communicating with the expense server
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url`; an empty base targets the page's own origin
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn expense_url(&self, id: &ExpenseId) -> String {
        format!("{}{}", self.base_url, shared::expense_path(id))
    }
}

#[async_trait(?Send)]
impl ExpenseSource for ApiClient {
    /// Fetch a single expense for editing
    async fn get_expense(&self, id: &ExpenseId) -> Result<ExpenseRecord, ApiError> {
        let url = self.expense_url(id);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                Logger::debug_with_component(
                    COMPONENT,
                    &format!("Failed to read response body from {}: {}", url, e),
                );
                String::new()
            }
        };

        classify_response(response.status(), &response.status_text(), &body)
    }
}

/// Turn a finished response into a record or a fetch failure. Non-2xx
/// statuses carry the server's `{"error": ...}` message when there is one,
/// otherwise the raw body or the status text.
fn classify_response(status: u16, status_text: &str, body: &str) -> Result<ExpenseRecord, ApiError> {
    if !(200..300).contains(&status) {
        let message = match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => parsed.error,
            Err(_) if body.trim().is_empty() => status_text.to_string(),
            Err(_) => body.to_string(),
        };
        return Err(ApiError::Status { status, message });
    }

    serde_json::from_str::<ExpenseRecord>(body).map_err(|e| ApiError::Decode(e.to_string()))
}
