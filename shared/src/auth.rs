use crate::config::ApiConfig;
use crate::context::{parse_count, require};
use crate::error::{FormField, RequestError, ValidationError};
use crate::models::{ProjectUpdate, SignupRequest, TokenResponse};
use crate::transport::{HttpRequest, Transport};
use serde_json::json;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Email => self.email = value,
            FormField::Password => self.password = value,
            other => log::warn!("Login form has no field {}", other),
        }
    }

    pub fn validate(&self) -> Result<(String, String), ValidationError> {
        let email = require(FormField::Email, &self.email)?;
        if self.password.is_empty() {
            return Err(ValidationError::missing(FormField::Password));
        }
        Ok((email, self.password.clone()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub github_repo_url: String,
    pub primary_usage_time: String,
    pub expected_users: String,
}

impl Default for SignupForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            github_repo_url: String::new(),
            primary_usage_time: String::new(),
            expected_users: "0".to_string(),
        }
    }
}

impl SignupForm {
    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Email => self.email = value,
            FormField::Password => self.password = value,
            FormField::GithubRepoUrl => self.github_repo_url = value,
            FormField::PrimaryUsageTime => self.primary_usage_time = value,
            FormField::ExpectedUsers => self.expected_users = value,
            other => log::warn!("Signup form has no field {}", other),
        }
    }

    pub fn to_request(&self) -> Result<SignupRequest, ValidationError> {
        let email = require(FormField::Email, &self.email)?;
        if self.password.is_empty() {
            return Err(ValidationError::missing(FormField::Password));
        }
        Ok(SignupRequest {
            email,
            password: self.password.clone(),
            github_repo_url: require(FormField::GithubRepoUrl, &self.github_repo_url)?,
            primary_usage_time: require(FormField::PrimaryUsageTime, &self.primary_usage_time)?,
            expected_users: parse_count(FormField::ExpectedUsers, &self.expected_users)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectForm {
    pub github_repo_url: String,
    pub expected_users: String,
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self {
            github_repo_url: String::new(),
            expected_users: "100".to_string(),
        }
    }
}

impl ProjectForm {
    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::GithubRepoUrl => self.github_repo_url = value,
            FormField::ExpectedUsers => self.expected_users = value,
            other => log::warn!("Project form has no field {}", other),
        }
    }

    pub fn to_update(&self) -> Result<ProjectUpdate, ValidationError> {
        Ok(ProjectUpdate {
            github_repo_url: require(FormField::GithubRepoUrl, &self.github_repo_url)?,
            expected_users: parse_count(FormField::ExpectedUsers, &self.expected_users)?,
        })
    }
}

/// Client for the account endpoints of the remote service. Only the access
/// token it returns matters to the rest of the app.
#[derive(Debug, Clone)]
pub struct AuthClient<T> {
    config: ApiConfig,
    transport: T,
}

impl<T: Transport> AuthClient<T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, RequestError> {
        let url = self.config.endpoint("auth/login");
        log::info!("POST {} for {}", url, email);
        let body = json!({ "email": email, "password": password });
        self.transport
            .send(HttpRequest::post(url, body))
            .await?
            .into_json()
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<(), RequestError> {
        let url = self.config.endpoint("auth/signup");
        log::info!("POST {} for {}", url, request.email);
        let body = serde_json::to_value(request).map_err(|e| RequestError::Build(e.to_string()))?;
        let response = self.transport.send(HttpRequest::post(url, body)).await?;
        if response.ok() {
            Ok(())
        } else {
            Err(response.into_error())
        }
    }

    /// Registers the account and immediately logs in with the same
    /// credentials.
    pub async fn signup_and_login(
        &self,
        request: &SignupRequest,
    ) -> Result<TokenResponse, RequestError> {
        self.signup(request).await?;
        self.login(&request.email, &request.password).await
    }

    pub async fn update_project(
        &self,
        update: &ProjectUpdate,
        token: &str,
    ) -> Result<(), RequestError> {
        let url = self.config.endpoint("auth/profile");
        log::info!("PUT {}", url);
        let body = serde_json::to_value(update).map_err(|e| RequestError::Build(e.to_string()))?;
        let response = self
            .transport
            .send(HttpRequest::put(url, body).bearer(token))
            .await?;
        if response.ok() {
            Ok(())
        } else {
            Err(response.into_error())
        }
    }
}
