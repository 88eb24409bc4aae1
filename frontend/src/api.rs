use chrono::{Local, NaiveDateTime, Timelike};
use gloo_net::http::{Request, RequestBuilder};
use gloo_storage::{LocalStorage, Storage};
use shared::{
    ApiConfig, HttpMethod, HttpRequest, HttpResponse, RequestError, SessionStorage, Transport,
};
use wasm_bindgen::JsValue;

pub fn api_config() -> ApiConfig {
    ApiConfig::from_env_value(option_env!("API_BASE_URL"))
}

/// `fetch`-backed transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTransport;

impl Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
        let mut builder: RequestBuilder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
            HttpMethod::Put => Request::put(&request.url),
        };
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let sent = match &request.body {
            Some(body) => builder
                .json(body)
                .map_err(|e| RequestError::Build(e.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        };

        let response = sent.map_err(|e| {
            log::error!("{} {} network error: {:?}", request.method.as_str(), request.url, e);
            RequestError::Transport(e.to_string())
        })?;

        let status = response.status();
        let status_text = response.status_text();
        let body = response.text().await.unwrap_or_default();
        Ok(HttpResponse {
            status,
            status_text,
            body,
        })
    }
}

/// Session entries in the browser's `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl SessionStorage for BrowserStorage {
    fn read(&self, key: &str) -> Option<String> {
        LocalStorage::get::<String>(key).ok()
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = LocalStorage::set(key, value) {
            log::error!("Failed to persist {}: {:?}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

/// Current local time truncated to the minute.
pub fn local_now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

pub fn push_path(path: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if window.location().pathname().ok().as_deref() == Some(path) {
        return;
    }
    if let Ok(history) = window.history() {
        if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(path)) {
            gloo_console::error!("Failed to update history:", e);
        }
    }
}
