use async_trait::async_trait;
use provider_core::{
    LifecycleRequest, PhysicalResourceId, ProviderError, ProvisionResponse, ResourceKind, Result,
    StabilizationResult,
};

/// One resource type the orchestrator can delegate to this provider.
///
/// Implementations are stateless: everything a call needs comes from the
/// request. Neither method sleeps, loops or retries; backoff belongs to the
/// orchestrator.
#[async_trait]
pub trait CustomResource: Send + Sync {
    fn kind(&self) -> ResourceKind;

    /// Start or reconcile the external operation for this lifecycle event
    /// and return the physical id the orchestrator tracks it by.
    async fn provision(&self, request: &LifecycleRequest) -> Result<ProvisionResponse>;

    /// Query the external operation once and report whether it has settled.
    async fn stabilize(&self, request: &LifecycleRequest) -> Result<StabilizationResult>;
}

pub fn require_physical_id(request: &LifecycleRequest) -> Result<&PhysicalResourceId> {
    request
        .physical_id
        .as_ref()
        .ok_or_else(|| ProviderError::missing_physical_id(request.resource_kind, request.request_type))
}

/// No-op provisioning: hand the existing id and properties straight back.
pub fn echo(request: &LifecycleRequest) -> Result<ProvisionResponse> {
    let physical_id = require_physical_id(request)?.clone();
    Ok(ProvisionResponse::new(physical_id).with_data(request.properties.without_transport_keys()))
}
