use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_organizations::types::{
    CreateAccountState as SdkCreateAccountState, CreateAccountStatus as SdkCreateAccountStatus,
    Tag as SdkTag,
};
use aws_sdk_organizations::Client;
use provider_core::Tag;
use tracing::{debug, info};

use crate::error::{ApiError, Result};
use crate::traits::{AccountApi, AccountCreationState, CreateAccountStatus};

const CREATE_ACCOUNT: &str = "CreateAccount";
const DESCRIBE_CREATE_ACCOUNT_STATUS: &str = "DescribeCreateAccountStatus";
const TAG_RESOURCE: &str = "TagResource";

/// `AccountApi` backed by AWS Organizations.
#[derive(Debug, Clone)]
pub struct OrganizationsClient {
    client: Client,
}

impl OrganizationsClient {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    fn sdk_tags(tags: &[Tag]) -> Result<Vec<SdkTag>> {
        tags.iter()
            .map(|tag| {
                SdkTag::builder()
                    .key(&tag.key)
                    .value(&tag.value)
                    .build()
                    .map_err(|e| ApiError::Construction(e.to_string()))
            })
            .collect()
    }

    fn convert_status(
        operation: &str,
        status: Option<&SdkCreateAccountStatus>,
    ) -> Result<CreateAccountStatus> {
        let status =
            status.ok_or_else(|| ApiError::missing_field(operation, "CreateAccountStatus"))?;

        let request_id = status
            .id()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::missing_field(operation, "CreateAccountStatus.Id"))?;

        let state = match status.state() {
            Some(SdkCreateAccountState::InProgress) => AccountCreationState::InProgress,
            Some(SdkCreateAccountState::Succeeded) => AccountCreationState::Succeeded,
            Some(SdkCreateAccountState::Failed) => AccountCreationState::Failed,
            Some(other) => {
                return Err(ApiError::service(
                    operation,
                    format!("unrecognised account creation state {}", other.as_str()),
                ))
            }
            None => return Err(ApiError::missing_field(operation, "CreateAccountStatus.State")),
        };

        Ok(CreateAccountStatus {
            request_id: request_id.to_string(),
            state,
            account_id: status.account_id().map(str::to_string),
            failure_reason: status.failure_reason().map(|r| r.as_str().to_string()),
        })
    }
}

#[async_trait]
impl AccountApi for OrganizationsClient {
    fn name(&self) -> &'static str {
        "organizations"
    }

    async fn create_account(
        &self,
        email: &str,
        account_name: &str,
        tags: &[Tag],
    ) -> Result<CreateAccountStatus> {
        info!(account_name, tag_count = tags.len(), "Creating account");

        let output = self
            .client
            .create_account()
            .email(email)
            .account_name(account_name)
            .set_tags(Some(Self::sdk_tags(tags)?))
            .send()
            .await
            .map_err(|e| ApiError::from_sdk(CREATE_ACCOUNT, e))?;

        let status = Self::convert_status(CREATE_ACCOUNT, output.create_account_status())?;
        debug!(request_id = %status.request_id, state = status.state.as_str(), "Create account requested");
        Ok(status)
    }

    async fn describe_create_account_status(
        &self,
        request_id: &str,
    ) -> Result<CreateAccountStatus> {
        debug!(request_id, "Describing account creation status");

        let output = self
            .client
            .describe_create_account_status()
            .create_account_request_id(request_id)
            .send()
            .await
            .map_err(|e| ApiError::from_sdk(DESCRIBE_CREATE_ACCOUNT_STATUS, e))?;

        Self::convert_status(
            DESCRIBE_CREATE_ACCOUNT_STATUS,
            output.create_account_status(),
        )
    }

    async fn tag_resource(&self, resource_id: &str, tags: &[Tag]) -> Result<()> {
        info!(resource_id, tag_count = tags.len(), "Tagging resource");

        self.client
            .tag_resource()
            .resource_id(resource_id)
            .set_tags(Some(Self::sdk_tags(tags)?))
            .send()
            .await
            .map_err(|e| ApiError::from_sdk(TAG_RESOURCE, e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_organizations::types::CreateAccountFailureReason;

    #[test]
    fn test_sdk_tags() {
        let tags = vec![Tag::new("AccountName", "Dev"), Tag::new("Email", "dev@example.com")];
        let sdk_tags = OrganizationsClient::sdk_tags(&tags).unwrap();

        assert_eq!(sdk_tags.len(), 2);
        assert_eq!(sdk_tags[0].key(), "AccountName");
        assert_eq!(sdk_tags[1].value(), "dev@example.com");
    }

    #[test]
    fn test_convert_succeeded_status() {
        let sdk_status = SdkCreateAccountStatus::builder()
            .id("car-123")
            .state(SdkCreateAccountState::Succeeded)
            .account_id("111122223333")
            .build();

        let status =
            OrganizationsClient::convert_status(DESCRIBE_CREATE_ACCOUNT_STATUS, Some(&sdk_status))
                .unwrap();

        assert_eq!(status.request_id, "car-123");
        assert_eq!(status.state, AccountCreationState::Succeeded);
        assert_eq!(status.account_id.as_deref(), Some("111122223333"));
    }

    #[test]
    fn test_convert_failed_status() {
        let sdk_status = SdkCreateAccountStatus::builder()
            .id("car-9")
            .state(SdkCreateAccountState::Failed)
            .failure_reason(CreateAccountFailureReason::EmailAlreadyExists)
            .build();

        let status =
            OrganizationsClient::convert_status(DESCRIBE_CREATE_ACCOUNT_STATUS, Some(&sdk_status))
                .unwrap();

        assert_eq!(status.state, AccountCreationState::Failed);
        assert_eq!(status.failure_reason.as_deref(), Some("EMAIL_ALREADY_EXISTS"));
    }

    #[test]
    fn test_convert_missing_fields() {
        let err = OrganizationsClient::convert_status(CREATE_ACCOUNT, None).unwrap_err();
        assert_eq!(err, ApiError::missing_field(CREATE_ACCOUNT, "CreateAccountStatus"));

        let no_id = SdkCreateAccountStatus::builder()
            .state(SdkCreateAccountState::InProgress)
            .build();
        assert!(OrganizationsClient::convert_status(CREATE_ACCOUNT, Some(&no_id)).is_err());

        let no_state = SdkCreateAccountStatus::builder().id("car-1").build();
        assert!(OrganizationsClient::convert_status(CREATE_ACCOUNT, Some(&no_state)).is_err());
    }
}
