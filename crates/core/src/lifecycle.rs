use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{OperationStatus, RequestType};

/// Where a logical resource sits from this layer's point of view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResourceState {
    /// No physical id has been minted yet.
    Absent,
    Pending,
    Stable,
    Failed,
    Gone,
}

impl ResourceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Pending => "pending",
            Self::Stable => "stable",
            Self::Failed => "failed",
            Self::Gone => "gone",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stable | Self::Failed | Self::Gone)
    }

    pub fn observed(status: &OperationStatus) -> Self {
        match status {
            OperationStatus::InProgress => Self::Pending,
            OperationStatus::Succeeded => Self::Stable,
            OperationStatus::Failed { .. } => Self::Failed,
        }
    }
}

impl fmt::Display for ResourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct ResourceLifecycle;

impl ResourceLifecycle {
    fn allowed_transitions(from: &ResourceState) -> Vec<ResourceState> {
        match from {
            ResourceState::Absent => vec![ResourceState::Pending],
            ResourceState::Pending => vec![
                ResourceState::Pending,
                ResourceState::Stable,
                ResourceState::Failed,
            ],
            ResourceState::Stable => vec![
                ResourceState::Stable,
                ResourceState::Gone,
                ResourceState::Failed,
            ],
            ResourceState::Failed => vec![],
            ResourceState::Gone => vec![],
        }
    }

    pub fn can_transition(from: &ResourceState, to: &ResourceState) -> bool {
        Self::allowed_transitions(from).contains(to)
    }

    /// State the orchestrator believes the resource is in when it sends a
    /// request of this type.
    pub fn expected_state(request_type: RequestType) -> ResourceState {
        match request_type {
            RequestType::Create => ResourceState::Pending,
            RequestType::Update | RequestType::Delete => ResourceState::Stable,
        }
    }

    /// State implied by a successful Stabilizer answer.
    pub fn settled_state(request_type: RequestType, is_complete: bool) -> ResourceState {
        match (request_type, is_complete) {
            (_, false) => ResourceState::Pending,
            (RequestType::Delete, true) => ResourceState::Gone,
            (_, true) => ResourceState::Stable,
        }
    }
}
