//! In-memory stand-ins for the external services.
//!
//! Each fake owns its state, counts side-effecting calls and lets a test
//! drive the external status forward the way the real service would.

use async_trait::async_trait;
use provider_core::Tag;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex;

use crate::error::{ApiError, Result};
use crate::traits::{
    AccountApi, AccountCreationState, CreateAccountStatus, EmailIdentityApi, VerificationStatus,
};

#[derive(Debug, Default)]
struct OrganizationsState {
    next_request: u64,
    requests: HashMap<String, CreateAccountStatus>,
    tags: HashMap<String, BTreeMap<String, String>>,
    create_calls: usize,
    describe_calls: usize,
    tag_calls: usize,
    fail_next: Option<ApiError>,
}

#[derive(Debug, Default)]
pub struct InMemoryOrganizations {
    state: Mutex<OrganizationsState>,
}

impl InMemoryOrganizations {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next call of any kind fails with `error`.
    pub async fn fail_next_call(&self, error: ApiError) {
        self.state.lock().await.fail_next = Some(error);
    }

    pub async fn complete_request(&self, request_id: &str, account_id: &str) {
        let mut state = self.state.lock().await;
        if let Some(request) = state.requests.get_mut(request_id) {
            request.state = AccountCreationState::Succeeded;
            request.account_id = Some(account_id.to_string());
        }
    }

    pub async fn fail_request(&self, request_id: &str, reason: &str) {
        let mut state = self.state.lock().await;
        if let Some(request) = state.requests.get_mut(request_id) {
            request.state = AccountCreationState::Failed;
            request.failure_reason = Some(reason.to_string());
        }
    }

    pub async fn create_calls(&self) -> usize {
        self.state.lock().await.create_calls
    }

    pub async fn describe_calls(&self) -> usize {
        self.state.lock().await.describe_calls
    }

    pub async fn tag_calls(&self) -> usize {
        self.state.lock().await.tag_calls
    }

    pub async fn tags_for(&self, resource_id: &str) -> BTreeMap<String, String> {
        self.state
            .lock()
            .await
            .tags
            .get(resource_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl AccountApi for InMemoryOrganizations {
    fn name(&self) -> &'static str {
        "in-memory-organizations"
    }

    async fn create_account(
        &self,
        _email: &str,
        _account_name: &str,
        _tags: &[Tag],
    ) -> Result<CreateAccountStatus> {
        let mut state = self.state.lock().await;
        if let Some(err) = state.fail_next.take() {
            return Err(err);
        }

        state.create_calls += 1;
        state.next_request += 1;
        let request_id = format!("car-{:08}", state.next_request);
        let status = CreateAccountStatus::in_progress(request_id.clone());
        state.requests.insert(request_id, status.clone());
        Ok(status)
    }

    async fn describe_create_account_status(
        &self,
        request_id: &str,
    ) -> Result<CreateAccountStatus> {
        let mut state = self.state.lock().await;
        if let Some(err) = state.fail_next.take() {
            return Err(err);
        }

        state.describe_calls += 1;
        state.requests.get(request_id).cloned().ok_or_else(|| {
            ApiError::service(
                "DescribeCreateAccountStatus",
                format!("CreateAccountStatusNotFoundException: {}", request_id),
            )
        })
    }

    async fn tag_resource(&self, resource_id: &str, tags: &[Tag]) -> Result<()> {
        let mut state = self.state.lock().await;
        if let Some(err) = state.fail_next.take() {
            return Err(err);
        }

        state.tag_calls += 1;
        let existing = state.tags.entry(resource_id.to_string()).or_default();
        for tag in tags {
            existing.insert(tag.key.clone(), tag.value.clone());
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct EmailState {
    identities: HashMap<String, VerificationStatus>,
    verify_calls: usize,
    status_calls: usize,
    fail_next: Option<ApiError>,
}

#[derive(Debug, Default)]
pub struct InMemoryEmailIdentities {
    state: Mutex<EmailState>,
}

impl InMemoryEmailIdentities {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fail_next_call(&self, error: ApiError) {
        self.state.lock().await.fail_next = Some(error);
    }

    /// Simulate the recipient following the verification link, or any other
    /// status change on the service side.
    pub async fn set_status(&self, email: &str, status: VerificationStatus) {
        self.state
            .lock()
            .await
            .identities
            .insert(email.to_string(), status);
    }

    pub async fn verify_calls(&self) -> usize {
        self.state.lock().await.verify_calls
    }

    pub async fn status_calls(&self) -> usize {
        self.state.lock().await.status_calls
    }
}

#[async_trait]
impl EmailIdentityApi for InMemoryEmailIdentities {
    fn name(&self) -> &'static str {
        "in-memory-email-identities"
    }

    async fn verify_email_identity(&self, email: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        if let Some(err) = state.fail_next.take() {
            return Err(err);
        }

        state.verify_calls += 1;
        // Re-requesting verification of a verified identity leaves it verified.
        state
            .identities
            .entry(email.to_string())
            .or_insert(VerificationStatus::Pending);
        Ok(())
    }

    async fn verification_status(&self, email: &str) -> Result<Option<VerificationStatus>> {
        let mut state = self.state.lock().await;
        if let Some(err) = state.fail_next.take() {
            return Err(err);
        }

        state.status_calls += 1;
        Ok(state.identities.get(email).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_account_request_lifecycle() {
        let api = InMemoryOrganizations::new();
        let created = api.create_account("a@b.com", "Dev", &[]).await.unwrap();
        assert_eq!(created.state, AccountCreationState::InProgress);

        let polled = api
            .describe_create_account_status(&created.request_id)
            .await
            .unwrap();
        assert_eq!(polled, created);

        api.complete_request(&created.request_id, "111122223333").await;
        let polled = api
            .describe_create_account_status(&created.request_id)
            .await
            .unwrap();
        assert_eq!(polled.state, AccountCreationState::Succeeded);
        assert_eq!(polled.account_id.as_deref(), Some("111122223333"));
        assert_eq!(api.describe_calls().await, 2);
    }

    #[tokio::test]
    async fn test_request_ids_are_unique() {
        let api = InMemoryOrganizations::new();
        let first = api.create_account("a@b.com", "A", &[]).await.unwrap();
        let second = api.create_account("c@d.com", "B", &[]).await.unwrap();
        assert_ne!(first.request_id, second.request_id);
        assert_eq!(api.create_calls().await, 2);
    }

    #[tokio::test]
    async fn test_unknown_request_is_a_service_error() {
        let api = InMemoryOrganizations::new();
        let err = api.describe_create_account_status("car-missing").await.unwrap_err();
        assert!(matches!(err, ApiError::Service { .. }));
    }

    #[tokio::test]
    async fn test_tag_resource_overwrites() {
        let api = InMemoryOrganizations::new();
        api.tag_resource("111", &[Tag::new("Stage", "dev")]).await.unwrap();
        api.tag_resource("111", &[Tag::new("Stage", "prod"), Tag::new("Team", "core")])
            .await
            .unwrap();

        let tags = api.tags_for("111").await;
        assert_eq!(tags.len(), 2);
        assert_eq!(tags.get("Stage").map(String::as_str), Some("prod"));
    }

    #[tokio::test]
    async fn test_injected_failure_applies_once() {
        let api = InMemoryOrganizations::new();
        api.fail_next_call(ApiError::Timeout {
            operation: "CreateAccount".to_string(),
        })
        .await;

        assert!(api.create_account("a@b.com", "Dev", &[]).await.is_err());
        assert!(api.create_account("a@b.com", "Dev", &[]).await.is_ok());
        assert_eq!(api.create_calls().await, 1);
    }

    #[tokio::test]
    async fn test_email_verification_flow() {
        let api = InMemoryEmailIdentities::new();
        assert_eq!(api.verification_status("a@b.com").await.unwrap(), None);

        api.verify_email_identity("a@b.com").await.unwrap();
        assert_eq!(
            api.verification_status("a@b.com").await.unwrap(),
            Some(VerificationStatus::Pending)
        );

        api.set_status("a@b.com", VerificationStatus::Success).await;
        api.verify_email_identity("a@b.com").await.unwrap();
        assert_eq!(
            api.verification_status("a@b.com").await.unwrap(),
            Some(VerificationStatus::Success)
        );
        assert_eq!(api.verify_calls().await, 2);
    }
}
