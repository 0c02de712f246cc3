use thiserror::Error;

use crate::domain::{RequestType, ResourceKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("{request_type} is not a supported operation for {kind}")]
    UnsupportedOperation {
        kind: ResourceKind,
        request_type: RequestType,
    },

    #[error("Unsupported resource kind: {0}")]
    UnsupportedResourceKind(String),

    #[error("Missing PhysicalResourceId for {kind} {request_type} request")]
    MissingPhysicalId {
        kind: ResourceKind,
        request_type: RequestType,
    },

    #[error("Invalid properties for {kind}: {reason}")]
    InvalidProperties { kind: ResourceKind, reason: String },

    #[error("External call {operation} failed: {message}")]
    ExternalCall {
        operation: String,
        message: String,
        timed_out: bool,
    },

    #[error("Operation {operation_id} failed: {reason}")]
    OperationFailed {
        operation_id: String,
        reason: String,
    },
}

impl ProviderError {
    pub fn unsupported(kind: ResourceKind, request_type: RequestType) -> Self {
        Self::UnsupportedOperation { kind, request_type }
    }

    pub fn missing_physical_id(kind: ResourceKind, request_type: RequestType) -> Self {
        Self::MissingPhysicalId { kind, request_type }
    }

    pub fn invalid_properties(kind: ResourceKind, reason: impl Into<String>) -> Self {
        Self::InvalidProperties {
            kind,
            reason: reason.into(),
        }
    }

    pub fn external(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalCall {
            operation: operation.into(),
            message: message.into(),
            timed_out: false,
        }
    }

    pub fn operation_failed(operation_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::OperationFailed {
            operation_id: operation_id.into(),
            reason: reason.into(),
        }
    }

    /// Whether the orchestrator may reasonably retry the lifecycle step.
    ///
    /// Only downstream transport and service errors qualify; everything else
    /// is a contract violation or a terminal external failure.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ExternalCall { .. })
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
