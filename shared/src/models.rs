use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{Display, EnumIter, EnumString};
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ServiceType {
    #[default]
    Web,
    Api,
    Db,
}

impl ServiceType {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::Web => "Web",
            ServiceType::Api => "API",
            ServiceType::Db => "Database",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RuntimeEnv {
    Dev,
    #[default]
    Prod,
}

impl RuntimeEnv {
    pub fn label(&self) -> &'static str {
        match self {
            RuntimeEnv::Dev => "Development",
            RuntimeEnv::Prod => "Production",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TimeSlot {
    #[default]
    Peak,
    Normal,
    Low,
    Weekend,
}

impl TimeSlot {
    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Peak => "Peak",
            TimeSlot::Normal => "Normal",
            TimeSlot::Low => "Low",
            TimeSlot::Weekend => "Weekend",
        }
    }
}

/// Situational metadata for one prediction attempt. Built only by
/// `ContextBuilder`, never reused across submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionContext {
    pub context_id: Uuid,
    pub timestamp: String,
    pub service_type: ServiceType,
    pub runtime_env: RuntimeEnv,
    pub time_slot: TimeSlot,
    pub weight: f64,
    pub expected_users: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub service_id: String,
    pub metric_name: String,
    pub context: PredictionContext,
}

/// Response of `POST /predict`. `predictions` is kept untyped because the
/// service decides between a flat series and a series of samples; the
/// normalizer resolves it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predictions: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A prediction response body exactly as received, with its typed reading.
/// `raw` is what the diagnostic view shows.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResponse {
    pub raw: Value,
    pub result: PredictionResult,
}

impl PredictionResponse {
    pub fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        let result = PredictionResult::deserialize(&raw)?;
        Ok(Self { raw, result })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub github_repo_url: String,
    pub primary_usage_time: String,
    pub expected_users: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectUpdate {
    pub github_repo_url: String,
    pub expected_users: u64,
}
