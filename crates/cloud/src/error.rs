use aws_smithy_runtime_api::client::result::SdkError;
use aws_smithy_types::error::display::DisplayErrorContext;
use provider_core::ProviderError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{operation} failed: {message}")]
    Service { operation: String, message: String },

    #[error("{operation} timed out")]
    Timeout { operation: String },

    #[error("{operation} response is missing {field}")]
    MissingField { operation: String, field: String },

    #[error("Failed to build request: {0}")]
    Construction(String),
}

impl ApiError {
    pub fn service(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn missing_field(operation: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            operation: operation.into(),
            field: field.into(),
        }
    }

    pub fn operation(&self) -> &str {
        match self {
            Self::Service { operation, .. }
            | Self::Timeout { operation }
            | Self::MissingField { operation, .. } => operation,
            Self::Construction(_) => "request",
        }
    }

    /// Classify an SDK failure. Client-side timeouts and connect timeouts are
    /// kept apart from service errors so the orchestrator sees them as such.
    pub fn from_sdk<E, R>(operation: &str, err: SdkError<E, R>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
        R: std::fmt::Debug + Send + Sync + 'static,
    {
        let timed_out = match &err {
            SdkError::TimeoutError(_) => true,
            SdkError::DispatchFailure(failure) => failure.is_timeout(),
            _ => false,
        };

        if timed_out {
            Self::Timeout {
                operation: operation.to_string(),
            }
        } else {
            Self::service(operation, DisplayErrorContext(&err).to_string())
        }
    }
}

impl From<ApiError> for ProviderError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Timeout { operation } => ProviderError::ExternalCall {
                message: format!("{} timed out", operation),
                operation,
                timed_out: true,
            },
            other => ProviderError::external(other.operation().to_string(), other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
