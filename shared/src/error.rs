use strum_macros::{AsRefStr, Display};

/// Every operator-editable input across the login, signup, project and
/// prediction forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum FormField {
    ServiceId,
    MetricName,
    Timestamp,
    ServiceType,
    RuntimeEnv,
    TimeSlot,
    Weight,
    ExpectedUsers,
    Email,
    Password,
    GithubRepoUrl,
    PrimaryUsageTime,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::ServiceId => "Service ID",
            FormField::MetricName => "Metric Name",
            FormField::Timestamp => "Timestamp",
            FormField::ServiceType => "Service Type",
            FormField::RuntimeEnv => "Runtime Environment",
            FormField::TimeSlot => "Time Slot",
            FormField::Weight => "Weight",
            FormField::ExpectedUsers => "Expected Users",
            FormField::Email => "Email",
            FormField::Password => "Password",
            FormField::GithubRepoUrl => "GitHub Repository URL",
            FormField::PrimaryUsageTime => "Primary Usage Time",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationErrorKind {
    #[error("is required")]
    Missing,
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("'{0}' is not a whole number")]
    NotAnInteger(String),
    #[error("must not be negative")]
    Negative,
    #[error("'{0}' is not a valid date and time")]
    InvalidTimestamp(String),
    /// Falls in a daylight-saving gap of the operator's time zone.
    #[error("'{0}' does not exist in the local time zone")]
    NonexistentLocalTime(String),
    #[error("'{0}' is not one of the allowed values")]
    UnknownVariant(String),
}

/// Malformed form input. The request is never sent.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}: {}", .field.label(), .kind)]
pub struct ValidationError {
    pub field: FormField,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(field: FormField, kind: ValidationErrorKind) -> Self {
        Self { field, kind }
    }

    pub fn missing(field: FormField) -> Self {
        Self::new(field, ValidationErrorKind::Missing)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    /// Non-success status; the message is already extracted from the body or
    /// the status text.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Failed to build request: {0}")]
    Build(String),
}

impl RequestError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A success response whose `predictions` cannot be interpreted as either a
/// flat series or a series of samples.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedResponseError {
    #[error("prediction row {index} is empty")]
    EmptyRow { index: usize },
    #[error("prediction entry {index} is not a number")]
    NonNumeric { index: usize },
    #[error("prediction entry {index} mixes numbers and sequences")]
    MixedShape { index: usize },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error("You must be logged in to request a prediction")]
    Unauthorized,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Request(#[from] RequestError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_the_field() {
        let err = ValidationError::new(
            FormField::Weight,
            ValidationErrorKind::NotANumber("abc".into()),
        );
        assert_eq!(err.to_string(), "Weight: 'abc' is not a number");
        assert_eq!(FormField::ExpectedUsers.as_ref(), "expected_users");
    }

    #[test]
    fn status_error_displays_message_verbatim() {
        let err = RequestError::Status {
            status: 400,
            message: "bad input".into(),
        };
        assert_eq!(err.to_string(), "bad input");
        assert_eq!(SubmitError::from(err).to_string(), "bad input");
    }
}
