use async_trait::async_trait;
use cloud_api::EmailIdentityApi;
use provider_core::{
    EmailProperties, LifecycleRequest, OperationStatus, PhysicalResourceId, PropertyBag,
    ProviderError, ProvisionResponse, RequestType, ResourceKind, ResourceState, Result,
    StabilizationResult,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::ProviderConfig;
use crate::resource::{echo, require_physical_id, CustomResource};

/// An email identity that must be verified by its owner before it can be
/// used. The identity is keyed by address; the physical id is a constant.
pub struct EmailResource {
    api: Arc<dyn EmailIdentityApi>,
    physical_id: String,
}

impl EmailResource {
    pub fn new(api: Arc<dyn EmailIdentityApi>, config: &ProviderConfig) -> Self {
        Self {
            api,
            physical_id: config.email_physical_id.clone(),
        }
    }

    fn physical_id(&self) -> Result<PhysicalResourceId> {
        PhysicalResourceId::parse(self.physical_id.clone()).ok_or_else(|| {
            ProviderError::invalid_properties(self.kind(), "configured physical id is blank")
        })
    }

    async fn create(&self, request: &LifecycleRequest) -> Result<ProvisionResponse> {
        let props = EmailProperties::from_bag(&request.properties)?;
        let physical_id = self.physical_id()?;

        self.api.verify_email_identity(&props.email).await?;
        info!(email = %props.email, "Verification email requested");

        Ok(ProvisionResponse::new(physical_id))
    }

    fn update(&self, request: &LifecycleRequest) -> Result<ProvisionResponse> {
        let new = EmailProperties::from_bag(&request.properties)?;
        if let Some(old) = EmailProperties::from_optional_bag(request.old_properties.as_ref()) {
            if old.email != new.email {
                warn!(
                    old_email = %old.email,
                    new_email = %new.email,
                    "Email identities are immutable, address change ignored"
                );
            }
        }
        echo(request)
    }

    async fn stabilize_create(&self, request: &LifecycleRequest) -> Result<StabilizationResult> {
        let props = EmailProperties::from_bag(&request.properties)?;
        let status = self.api.verification_status(&props.email).await?;
        let operation = status
            .map(|s| s.operation_status())
            .unwrap_or(OperationStatus::InProgress);
        debug!(
            email = %props.email,
            status = ?status,
            observed = %ResourceState::observed(&operation),
            "Fetched verification status"
        );

        match operation {
            OperationStatus::InProgress => Ok(StabilizationResult::pending()),
            OperationStatus::Succeeded => Ok(StabilizationResult::complete(PropertyBag::new())),
            OperationStatus::Failed { reason } => {
                Err(ProviderError::operation_failed(props.email, reason))
            }
        }
    }
}

#[async_trait]
impl CustomResource for EmailResource {
    fn kind(&self) -> ResourceKind {
        ResourceKind::EmailIdentity
    }

    async fn provision(&self, request: &LifecycleRequest) -> Result<ProvisionResponse> {
        match request.request_type {
            RequestType::Create => self.create(request).await,
            RequestType::Update => self.update(request),
            // Identities are left in place; nothing depends on removing them.
            RequestType::Delete => echo(request),
        }
    }

    async fn stabilize(&self, request: &LifecycleRequest) -> Result<StabilizationResult> {
        require_physical_id(request)?;

        match request.request_type {
            RequestType::Create => self.stabilize_create(request).await,
            RequestType::Update | RequestType::Delete => {
                Ok(StabilizationResult::complete(PropertyBag::new()))
            }
        }
    }
}
