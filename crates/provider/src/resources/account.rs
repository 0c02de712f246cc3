use async_trait::async_trait;
use cloud_api::{AccountApi, CreateAccountStatus};
use provider_core::{
    AccountProperties, LifecycleRequest, OperationStatus, PhysicalResourceId, PropertyBag,
    ProviderError, ProvisionResponse, RequestType, ResourceKind, ResourceState, Result,
    StabilizationResult,
};
use std::sync::Arc;
use tracing::{debug, info};

use crate::resource::{echo, require_physical_id, CustomResource};

/// An account created inside an organization.
///
/// The physical id is the asynchronous create request id; the account id
/// only exists once that request has succeeded.
pub struct AccountResource {
    api: Arc<dyn AccountApi>,
}

impl AccountResource {
    pub const ACCOUNT_ID: &'static str = "AccountId";

    pub fn new(api: Arc<dyn AccountApi>) -> Self {
        Self { api }
    }

    async fn create(&self, request: &LifecycleRequest) -> Result<ProvisionResponse> {
        let props = AccountProperties::from_bag(&request.properties)?;

        let status = self
            .api
            .create_account(&props.email, &props.account_name, &props.tags)
            .await?;

        info!(
            request_id = %status.request_id,
            account_name = %props.account_name,
            "Account creation started"
        );

        let physical_id = PhysicalResourceId::parse(status.request_id)
            .ok_or_else(|| ProviderError::external("CreateAccount", "empty create request id"))?;
        Ok(ProvisionResponse::new(physical_id))
    }

    async fn describe(&self, physical_id: &PhysicalResourceId) -> Result<CreateAccountStatus> {
        let status = self
            .api
            .describe_create_account_status(physical_id.as_str())
            .await?;
        debug!(
            request_id = %physical_id,
            state = status.state.as_str(),
            observed = %ResourceState::observed(&status.operation_status()),
            account_id = ?status.account_id,
            "Described account creation"
        );
        Ok(status)
    }

    /// The account id once the create request has succeeded, `None` while it
    /// is still running.
    fn settled_account_id(
        physical_id: &PhysicalResourceId,
        status: &CreateAccountStatus,
    ) -> Result<Option<String>> {
        match status.operation_status() {
            OperationStatus::InProgress => Ok(None),
            OperationStatus::Succeeded => status
                .account_id
                .clone()
                .filter(|id| !id.is_empty())
                .map(Some)
                .ok_or_else(|| {
                    ProviderError::external(
                        "DescribeCreateAccountStatus",
                        format!("request {} succeeded without an account id", physical_id),
                    )
                }),
            OperationStatus::Failed { reason } => {
                Err(ProviderError::operation_failed(physical_id.as_str(), reason))
            }
        }
    }

    fn output(account_id: String) -> StabilizationResult {
        StabilizationResult::complete(PropertyBag::new().with(Self::ACCOUNT_ID, account_id))
    }

    async fn stabilize_create(&self, physical_id: &PhysicalResourceId) -> Result<StabilizationResult> {
        let status = self.describe(physical_id).await?;
        Ok(match Self::settled_account_id(physical_id, &status)? {
            Some(account_id) => Self::output(account_id),
            None => StabilizationResult::pending(),
        })
    }

    /// Tags can only be attached once the account id is known. The tag call
    /// overwrites existing keys, so repeating it on later polls is harmless.
    async fn stabilize_update(
        &self,
        request: &LifecycleRequest,
        physical_id: &PhysicalResourceId,
    ) -> Result<StabilizationResult> {
        let tags = request.properties.to_tags(ResourceKind::Account)?;
        let status = self.describe(physical_id).await?;

        let Some(account_id) = Self::settled_account_id(physical_id, &status)? else {
            debug!(request_id = %physical_id, "Account not ready, skipping tag update");
            return Ok(StabilizationResult::pending());
        };

        if !tags.is_empty() {
            self.api.tag_resource(&account_id, &tags).await?;
            info!(account_id = %account_id, tag_count = tags.len(), "Updated account tags");
        }

        Ok(Self::output(account_id))
    }
}

#[async_trait]
impl CustomResource for AccountResource {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Account
    }

    async fn provision(&self, request: &LifecycleRequest) -> Result<ProvisionResponse> {
        match request.request_type {
            RequestType::Create => self.create(request).await,
            RequestType::Update => echo(request),
            RequestType::Delete => Err(ProviderError::unsupported(
                self.kind(),
                request.request_type,
            )),
        }
    }

    async fn stabilize(&self, request: &LifecycleRequest) -> Result<StabilizationResult> {
        let physical_id = require_physical_id(request)?;

        match request.request_type {
            RequestType::Create => self.stabilize_create(physical_id).await,
            RequestType::Update => self.stabilize_update(request, physical_id).await,
            RequestType::Delete => Err(ProviderError::unsupported(
                self.kind(),
                request.request_type,
            )),
        }
    }
}
