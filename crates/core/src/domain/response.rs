use serde::{Deserialize, Serialize};

use super::{PhysicalResourceId, PropertyBag};

/// What the Provisioner hands back to the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProvisionResponse {
    pub physical_id: PhysicalResourceId,
    pub data: PropertyBag,
}

impl ProvisionResponse {
    pub fn new(physical_id: PhysicalResourceId) -> Self {
        Self {
            physical_id,
            data: PropertyBag::new(),
        }
    }

    pub fn with_data(mut self, data: PropertyBag) -> Self {
        self.data = data;
        self
    }
}

/// Result of one Stabilizer poll.
///
/// `data` is only meaningful once `is_complete` is true.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StabilizationResult {
    pub is_complete: bool,
    pub data: PropertyBag,
}

impl StabilizationResult {
    pub fn pending() -> Self {
        Self {
            is_complete: false,
            data: PropertyBag::new(),
        }
    }

    pub fn complete(data: PropertyBag) -> Self {
        Self {
            is_complete: true,
            data,
        }
    }
}

/// Normalised status of an external operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OperationStatus {
    InProgress,
    Succeeded,
    Failed { reason: String },
}

impl OperationStatus {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}
