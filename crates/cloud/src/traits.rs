use async_trait::async_trait;
use provider_core::{OperationStatus, Tag};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountCreationState {
    InProgress,
    Succeeded,
    Failed,
}

impl AccountCreationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "IN_PROGRESS" => Some(Self::InProgress),
            "SUCCEEDED" => Some(Self::Succeeded),
            "FAILED" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// Snapshot of an asynchronous account creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAccountStatus {
    pub request_id: String,
    pub state: AccountCreationState,
    pub account_id: Option<String>,
    pub failure_reason: Option<String>,
}

impl CreateAccountStatus {
    pub fn in_progress(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            state: AccountCreationState::InProgress,
            account_id: None,
            failure_reason: None,
        }
    }

    pub fn operation_status(&self) -> OperationStatus {
        match self.state {
            AccountCreationState::InProgress => OperationStatus::InProgress,
            AccountCreationState::Succeeded => OperationStatus::Succeeded,
            AccountCreationState::Failed => OperationStatus::failed(
                self.failure_reason
                    .clone()
                    .unwrap_or_else(|| "UNKNOWN".to_string()),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    Pending,
    Success,
    Failed,
    TemporaryFailure,
    NotStarted,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Success => "Success",
            Self::Failed => "Failed",
            Self::TemporaryFailure => "TemporaryFailure",
            Self::NotStarted => "NotStarted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Success" => Some(Self::Success),
            "Failed" => Some(Self::Failed),
            "TemporaryFailure" => Some(Self::TemporaryFailure),
            "NotStarted" => Some(Self::NotStarted),
            _ => None,
        }
    }

    /// `TemporaryFailure` is retried by the email service itself, so it
    /// counts as still in progress.
    pub fn operation_status(&self) -> OperationStatus {
        match self {
            Self::Success => OperationStatus::Succeeded,
            Self::Failed => OperationStatus::failed("email verification failed"),
            Self::Pending | Self::TemporaryFailure | Self::NotStarted => {
                OperationStatus::InProgress
            }
        }
    }
}

/// Account-management service.
#[async_trait]
pub trait AccountApi: Send + Sync {
    fn name(&self) -> &'static str;

    /// Start creating an account. Returns the status of the new request,
    /// whose `request_id` is the correlation key for later polls.
    async fn create_account(
        &self,
        email: &str,
        account_name: &str,
        tags: &[Tag],
    ) -> Result<CreateAccountStatus>;

    async fn describe_create_account_status(&self, request_id: &str)
        -> Result<CreateAccountStatus>;

    /// Attach tags to a resource. Keys already present are overwritten.
    async fn tag_resource(&self, resource_id: &str, tags: &[Tag]) -> Result<()>;
}

/// Email-identity service.
#[async_trait]
pub trait EmailIdentityApi: Send + Sync {
    fn name(&self) -> &'static str;

    /// Ask the service to send a verification message to `email`.
    async fn verify_email_identity(&self, email: &str) -> Result<()>;

    /// `None` when the service does not know the identity at all.
    async fn verification_status(&self, email: &str) -> Result<Option<VerificationStatus>>;
}
