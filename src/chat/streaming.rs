//! Stream processing for the `/api/stream` endpoint.
//!
//! The endpoint writes one `data: ` line per token, newline terminated.
//! Token whitespace is significant: a payload of a single space is a real
//! token, so lines are only stripped of their terminator, never trimmed.

use futures_util::StreamExt;
use reqwest::Response;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::error::ChatError;
use super::models::ChatEvent;

/// Sentinel payload the endpoint emits when its upstream fails. It is an
/// error signal, never content to display.
pub const STREAM_ERROR_SENTINEL: &str = "[stream-error]";

/// Forward stream tokens to `tx` until the body ends, the token is
/// cancelled, or the sentinel arrives. A dropped receiver ends the stream
/// quietly.
pub async fn process_stream(
    response: Response,
    tx: mpsc::Sender<ChatEvent>,
    cancel: CancellationToken,
) -> Result<(), ChatError> {
    let mut stream = response.bytes_stream();
    let mut buffer = String::new();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("chat stream cancelled");
                return Err(ChatError::Cancelled);
            }
            chunk = stream.next() => {
                match chunk {
                    Some(Ok(bytes)) => {
                        buffer.push_str(&String::from_utf8_lossy(&bytes));
                        while let Some(newline) = buffer.find('\n') {
                            let line: String = buffer.drain(..=newline).collect();
                            let line = trim_terminator(&line);
                            if let Some(token) = parse_data_line(line) {
                                if token == STREAM_ERROR_SENTINEL {
                                    return Err(ChatError::StreamFailed);
                                }
                                if tx.send(ChatEvent::Token(token.to_string())).await.is_err() {
                                    debug!("chat event receiver dropped, stopping stream");
                                    return Ok(());
                                }
                            }
                        }
                    }
                    Some(Err(err)) => return Err(ChatError::Request(err)),
                    None => return Ok(()),
                }
            }
        }
    }
}

fn trim_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Payload of a `data: ` line, whitespace intact. Other lines are noise.
fn parse_data_line(line: &str) -> Option<&str> {
    line.strip_prefix("data: ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn data_lines_yield_their_payload() {
        assert_eq!(parse_data_line("data: Hola"), Some("Hola"));
        assert_eq!(parse_data_line("data: two words"), Some("two words"));
    }

    #[test]
    fn payload_whitespace_survives() {
        assert_eq!(parse_data_line("data:  leading"), Some(" leading"));
        assert_eq!(parse_data_line("data:  "), Some(" "));
        assert_eq!(parse_data_line("data: "), Some(""));
    }

    #[test]
    fn non_data_lines_are_ignored() {
        assert_eq!(parse_data_line(""), None);
        assert_eq!(parse_data_line("event: ping"), None);
        assert_eq!(parse_data_line("data:no-space"), None);
    }

    #[test]
    fn sentinel_is_recognized_exactly() {
        let token = parse_data_line("data: [stream-error]").unwrap();
        assert_eq!(token, STREAM_ERROR_SENTINEL);
        // Content merely containing the sentinel text is not a signal.
        let token = parse_data_line("data: see [stream-error] docs").unwrap();
        assert_ne!(token, STREAM_ERROR_SENTINEL);
    }

    #[test]
    fn terminators_are_stripped_but_not_payload_spaces() {
        assert_eq!(trim_terminator("data: x\r"), "data: x");
        assert_eq!(trim_terminator("data: x "), "data: x ");
    }
}
