//! HTTP client for form submission.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::FormSubmission;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("form endpoint returned {status}: {message}")]
    Api { status: u16, message: String },
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct FormClient {
    client: Client,
    base_url: String,
}

/// Error body the endpoint returns on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl FormClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Send one submission. Any 2xx response counts as accepted.
    pub async fn submit(&self, submission: &FormSubmission) -> Result<(), FormError> {
        debug!(
            form = %submission.form_title,
            fields = submission.responses.len(),
            "submitting form response"
        );
        let response = self
            .client
            .post(format!("{}/api/form-response", self.base_url))
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => "unknown error".to_string(),
        };
        Err(FormError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
