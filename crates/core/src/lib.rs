//! Core types for the custom resource provider.
//!
//! Everything the orchestrator hands to a provisioning handler, and everything
//! a handler hands back, is modelled here. The crate performs no I/O.

pub mod domain;
pub mod error;
pub mod lifecycle;

pub use domain::{
    AccountProperties, EmailProperties, LifecycleRequest, OperationStatus, PhysicalResourceId,
    PropertyBag, ProvisionResponse, RequestType, ResourceKind, StabilizationResult, Tag,
    MAX_TAGS_PER_CALL, TRANSPORT_KEYS,
};
pub use error::{ProviderError, Result};
pub use lifecycle::{ResourceLifecycle, ResourceState};
