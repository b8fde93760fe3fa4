//! Command implementations for the readnotes CLI.
//!
//! Each command module provides:
//! - Args struct for clap argument parsing
//! - execute() function that performs the command
//! - Human-readable and JSON output formatting

pub mod books;
pub mod notes;

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

/// Common error type for HTTP requests.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// Build the HTTP client.
pub fn build_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("readnotes-cli/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Print output in JSON or human-readable format.
pub fn output<T: Serialize + HumanReadable>(value: &T, human: bool) -> Result<()> {
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Trait for types that can be printed in human-readable format.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Make an HTTP request and decode the JSON response.
pub async fn make_request<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, CliError> {
    let response = send(request).await?;
    Ok(response.json::<T>().await?)
}

/// Make an HTTP request that answers with an empty body.
pub async fn make_empty_request(request: reqwest::RequestBuilder) -> Result<(), CliError> {
    send(request).await?;
    Ok(())
}

async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, CliError> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(CliError::Server {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Flatten an `{"errors": [...]}` envelope into one line.
///
/// Bulk entries (`{"index", "messages"}`) become `notes[i]: ...`. Bodies
/// that are not an envelope are returned as-is.
fn error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };
    let Some(errors) = json.get("errors").and_then(Value::as_array) else {
        return body.to_string();
    };

    errors
        .iter()
        .map(|entry| match entry {
            Value::String(s) => s.clone(),
            Value::Object(obj) => {
                let messages = obj
                    .get("messages")
                    .and_then(Value::as_array)
                    .map(|m| {
                        m.iter()
                            .filter_map(Value::as_str)
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .unwrap_or_default();
                match obj.get("index").and_then(Value::as_u64) {
                    Some(index) => format!("notes[{}]: {}", index, messages),
                    None => messages,
                }
            }
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Format a timestamp for human display.
pub fn format_timestamp(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Truncate a string for display, adding ellipsis if needed.
///
/// Counts characters, not bytes, so Japanese text is cut cleanly.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

/// Confirmation printed after a delete.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub kind: &'static str,
    pub id: i64,
    pub deleted: bool,
}

impl HumanReadable for Deleted {
    fn print_human(&self) {
        use colored::Colorize;

        println!("{}", format!("{} {} deleted", self.kind, self.id).green().bold());
    }
}
