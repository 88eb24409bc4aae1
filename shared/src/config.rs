pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Durable storage keys for the two halves of a session.
pub const TOKEN_KEY: &str = "token";
pub const EMAIL_KEY: &str = "email";

pub const TEST_TOKEN_PREFIX: &str = "test_token_";
pub const TEST_ACCOUNT_EMAIL: &str = "test@mcp-platform.ai";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Builds the config from an optional environment value, falling back to
    /// the local development server when it is unset or blank.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(base_url) => Self::new(base_url),
            None => {
                log::warn!(
                    "API_BASE_URL is not set, falling back to {}",
                    DEFAULT_API_BASE_URL
                );
                Self::new(DEFAULT_API_BASE_URL)
            }
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}
