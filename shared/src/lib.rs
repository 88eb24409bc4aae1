pub mod auth;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod normalize;
pub mod presentation;
pub mod session;
pub mod submission;
pub mod transport;

pub use auth::{AuthClient, LoginForm, ProjectForm, SignupForm};
pub use client::PredictionClient;
pub use config::ApiConfig;
pub use context::{ContextBuilder, ContextForm};
pub use error::{
    FormField, MalformedResponseError, RequestError, SubmitError, ValidationError,
    ValidationErrorKind,
};
pub use models::{
    PredictionContext, PredictionRequest, PredictionResponse, PredictionResult, ProjectUpdate,
    RuntimeEnv, ServiceType, SignupRequest, TimeSlot, TokenResponse,
};
pub use normalize::{Band, NormalizedPoint, NormalizedSeries, PredictionShape, normalize};
pub use presentation::{ChartSeries, PredictionView, ResultTab, TableRow, TableView};
pub use session::{
    MemoryStorage, Route, Session, SessionPhase, SessionStorage, SessionStore, guard,
    is_authorized,
};
pub use submission::{
    PredictionOutcome, SubmissionTicket, SubmissionTracker, prepare_submission,
    submit_prediction,
};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, Transport, extract_error_message};
