use crate::error::RequestError;
use serde::de::DeserializeOwned;
use serde_json::Value;

const FALLBACK_ERROR_MESSAGE: &str = "Request failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn get(url: String) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            bearer: None,
            body: None,
        }
    }

    pub fn post(url: String, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url,
            bearer: None,
            body: Some(body),
        }
    }

    pub fn put(url: String, body: Value) -> Self {
        Self {
            method: HttpMethod::Put,
            url,
            bearer: None,
            body: Some(body),
        }
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes a success body, or turns a failure into a `RequestError::Status`
    /// carrying the server's message.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, RequestError> {
        if !self.ok() {
            return Err(self.into_error());
        }
        serde_json::from_str(&self.body).map_err(|e| RequestError::Decode(e.to_string()))
    }

    pub fn into_error(self) -> RequestError {
        let body = Some(self.body.as_str()).filter(|b| !b.trim().is_empty());
        let message = extract_error_message(body, &self.status_text);
        log::error!("Request failed with status {}: {}", self.status, message);
        RequestError::Status {
            status: self.status,
            message,
        }
    }
}

/// The boundary to the remote service. The browser build implements it over
/// `fetch`; tests script it.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError>;
}

/// Picks the human-readable message out of an error body: `detail` first,
/// then `message`, then the status text.
pub fn extract_error_message(body: Option<&str>, status_text: &str) -> String {
    let from_body = body
        .and_then(|b| serde_json::from_str::<Value>(b).ok())
        .and_then(|value| {
            ["detail", "message"]
                .iter()
                .find_map(|key| value.get(*key).and_then(message_text))
        });

    match from_body {
        Some(message) => message,
        None if !status_text.trim().is_empty() => status_text.to_string(),
        None => FALLBACK_ERROR_MESSAGE.to_string(),
    }
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        // FastAPI validation errors put a list of issues under `detail`
        other => Some(other.to_string()),
    }
}
