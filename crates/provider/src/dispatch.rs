use async_trait::async_trait;
use cloud_api::{AccountApi, EmailIdentityApi};
use provider_core::{
    LifecycleRequest, ProviderError, ProvisionResponse, RequestType, ResourceKind,
    ResourceLifecycle, ResourceState, Result, StabilizationResult,
};
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::config::ProviderConfig;
use crate::resource::{require_physical_id, CustomResource};
use crate::resources::{AccountResource, EmailResource};

/// Every resource kind the provider supports, one variant each.
pub enum Resource {
    Account(AccountResource),
    EmailIdentity(EmailResource),
}

impl Resource {
    fn inner(&self) -> &dyn CustomResource {
        match self {
            Resource::Account(resource) => resource,
            Resource::EmailIdentity(resource) => resource,
        }
    }
}

#[async_trait]
impl CustomResource for Resource {
    fn kind(&self) -> ResourceKind {
        self.inner().kind()
    }

    async fn provision(&self, request: &LifecycleRequest) -> Result<ProvisionResponse> {
        self.inner().provision(request).await
    }

    async fn stabilize(&self, request: &LifecycleRequest) -> Result<StabilizationResult> {
        self.inner().stabilize(request).await
    }
}

/// Entry point for both orchestrator calls. Routes each request to the
/// resource named by its kind tag.
pub struct ResourceProvider {
    account: Resource,
    email: Resource,
}

impl ResourceProvider {
    pub fn new(
        accounts: Arc<dyn AccountApi>,
        emails: Arc<dyn EmailIdentityApi>,
        config: ProviderConfig,
    ) -> Self {
        debug!(
            account_api = accounts.name(),
            email_api = emails.name(),
            "Building resource provider"
        );
        Self {
            account: Resource::Account(AccountResource::new(accounts)),
            email: Resource::EmailIdentity(EmailResource::new(emails, &config)),
        }
    }

    pub fn resource(&self, kind: ResourceKind) -> &Resource {
        match kind {
            ResourceKind::Account => &self.account,
            ResourceKind::EmailIdentity => &self.email,
        }
    }

    /// Provisioner entry point.
    ///
    /// A Create that already carries a physical id was answered before; the
    /// id is handed back without starting a second external operation.
    pub async fn provision(&self, request: &LifecycleRequest) -> Result<ProvisionResponse> {
        let span = info_span!(
            "provision",
            kind = %request.resource_kind,
            request_type = %request.request_type,
            logical_id = request.logical_id.as_deref().unwrap_or(""),
            request_id = request.request_id.as_deref().unwrap_or(""),
        );

        async move {
            if request.request_type == RequestType::Create {
                if let Some(physical_id) = &request.physical_id {
                    warn!(physical_id = %physical_id, "Create already has a physical id, echoing it");
                    return Ok(ProvisionResponse::new(physical_id.clone()));
                }
            }

            let result = self.resource(request.resource_kind).provision(request).await;
            match &result {
                Ok(response) => info!(physical_id = %response.physical_id, "Provisioned"),
                Err(err) => error!(error = %err, retryable = err.is_retryable(), "Provisioning failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Stabilizer entry point. Exactly one status query per call.
    pub async fn stabilize(&self, request: &LifecycleRequest) -> Result<StabilizationResult> {
        let span = info_span!(
            "stabilize",
            kind = %request.resource_kind,
            request_type = %request.request_type,
            physical_id = request.physical_id.as_ref().map(|id| id.as_str()).unwrap_or(""),
            logical_id = request.logical_id.as_deref().unwrap_or(""),
        );

        async move {
            require_physical_id(request)?;

            let result = self.resource(request.resource_kind).stabilize(request).await;
            Self::log_outcome(request.request_type, &result);
            result
        }
        .instrument(span)
        .await
    }

    fn log_outcome(request_type: RequestType, result: &Result<StabilizationResult>) {
        let from = ResourceLifecycle::expected_state(request_type);
        let to = match result {
            Ok(outcome) => ResourceLifecycle::settled_state(request_type, outcome.is_complete),
            Err(ProviderError::OperationFailed { .. }) => ResourceState::Failed,
            Err(err) => {
                error!(error = %err, retryable = err.is_retryable(), "Stabilization failed");
                return;
            }
        };

        if !ResourceLifecycle::can_transition(&from, &to) {
            warn!(from = %from, to = %to, "Lifecycle transition outside the expected graph");
        }

        match result {
            Ok(outcome) => info!(
                state = %to,
                terminal = to.is_terminal(),
                is_complete = outcome.is_complete,
                "Stabilization polled"
            ),
            Err(err) => error!(state = %to, error = %err, "External operation failed"),
        }
    }
}
