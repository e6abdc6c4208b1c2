//! HTTP client for the chat endpoints.

use std::time::Duration;

use reqwest::Client;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::error::ChatError;
use super::models::{ChatEvent, ChatRequest, ReplyResponse};
use super::streaming::process_stream;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    base_url: String,
}

impl ChatClient {
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

    /// Stream an exchange, forwarding each token to `tx`.
    pub async fn send_streaming(
        &self,
        request: &ChatRequest,
        tx: mpsc::Sender<ChatEvent>,
        cancel: CancellationToken,
    ) -> Result<(), ChatError> {
        debug!(messages = request.messages.len(), "starting chat stream");
        let response = self
            .client
            .post(format!("{}/api/stream", self.base_url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ChatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        process_stream(response, tx, cancel).await
    }

    /// One complete reply from the non-streaming endpoint.
    pub async fn send_message(&self, request: &ChatRequest) -> Result<String, ChatError> {
        let body = request.clone().without_streaming();
        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ChatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply: ReplyResponse = response.json().await?;
        Ok(reply.reply.trim().to_string())
    }
}

/// Drive one exchange end to end: stream tokens, fall back to the plain
/// endpoint when streaming fails, and finish with exactly one terminal
/// event. Cancellation ends the exchange with no event at all, since the
/// page that asked for it is gone.
pub async fn run_exchange(
    client: ChatClient,
    request: ChatRequest,
    tx: mpsc::Sender<ChatEvent>,
    cancel: CancellationToken,
) {
    match client
        .send_streaming(&request, tx.clone(), cancel.clone())
        .await
    {
        Ok(()) => {
            let _ = tx.send(ChatEvent::Done).await;
        }
        Err(err) if !err.is_recoverable() => {}
        Err(err) => {
            warn!("chat stream failed, retrying without streaming: {err}");
            let fallback = tokio::select! {
                _ = cancel.cancelled() => return,
                result = client.send_message(&request) => result,
            };
            match fallback {
                Ok(reply) => {
                    let _ = tx.send(ChatEvent::Token(reply)).await;
                    let _ = tx.send(ChatEvent::Done).await;
                }
                Err(err) => {
                    warn!("chat fallback failed: {err}");
                    let _ = tx.send(ChatEvent::Failed(err.to_string())).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_trailing_slashes() {
        let client = ChatClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
        let client = ChatClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
