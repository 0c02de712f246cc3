use cloud_api::memory::{InMemoryEmailIdentities, InMemoryOrganizations};
use cloud_api::{ApiError, VerificationStatus};
use provider::{ProviderConfig, ResourceProvider};
use provider_core::{
    LifecycleRequest, PhysicalResourceId, PropertyBag, ProviderError, RequestType, ResourceKind,
};
use std::sync::Arc;

struct Harness {
    accounts: Arc<InMemoryOrganizations>,
    emails: Arc<InMemoryEmailIdentities>,
    provider: ResourceProvider,
}

fn setup() -> Harness {
    let accounts = Arc::new(InMemoryOrganizations::new());
    let emails = Arc::new(InMemoryEmailIdentities::new());
    let provider = ResourceProvider::new(
        accounts.clone(),
        emails.clone(),
        ProviderConfig::default(),
    );
    Harness {
        accounts,
        emails,
        provider,
    }
}

fn account_properties(email: &str, name: &str) -> PropertyBag {
    PropertyBag::from([
        ("ServiceToken", "arn:aws:lambda:us-east-1:123456789012:function:on-event"),
        ("Email", email),
        ("AccountName", name),
    ])
}

mod account {
    use super::*;

    async fn create(h: &Harness) -> LifecycleRequest {
        let request = LifecycleRequest::create(
            ResourceKind::Account,
            account_properties("x@y.com", "Dev"),
        );
        let response = h.provider.provision(&request).await.unwrap();
        request.with_physical_id(response.physical_id)
    }

    #[tokio::test]
    async fn test_create_then_poll_until_succeeded() {
        let h = setup();
        let request = create(&h).await;
        let request_id = request.physical_id.clone().unwrap();
        assert!(!request_id.as_str().is_empty());

        let result = h.provider.stabilize(&request).await.unwrap();
        assert!(!result.is_complete);

        h.accounts
            .complete_request(request_id.as_str(), "111122223333")
            .await;

        let result = h.provider.stabilize(&request).await.unwrap();
        assert!(result.is_complete);
        assert_eq!(result.data, PropertyBag::from([("AccountId", "111122223333")]));
    }

    #[tokio::test]
    async fn test_completed_result_is_stable_across_polls() {
        let h = setup();
        let request = create(&h).await;
        let request_id = request.physical_id.clone().unwrap();
        h.accounts
            .complete_request(request_id.as_str(), "111122223333")
            .await;

        let first = h.provider.stabilize(&request).await.unwrap();
        for _ in 0..3 {
            assert_eq!(h.provider.stabilize(&request).await.unwrap(), first);
        }
        assert_eq!(h.accounts.create_calls().await, 1);
    }

    #[tokio::test]
    async fn test_failed_creation_is_reported_not_pending() {
        let h = setup();
        let request = create(&h).await;
        let request_id = request.physical_id.clone().unwrap();
        h.accounts
            .fail_request(request_id.as_str(), "EMAIL_ALREADY_EXISTS")
            .await;

        let err = h.provider.stabilize(&request).await.unwrap_err();
        assert!(matches!(err, ProviderError::OperationFailed { .. }));

        // Terminal: later polls keep failing the same way.
        let again = h.provider.stabilize(&request).await.unwrap_err();
        assert_eq!(err, again);
    }

    #[tokio::test]
    async fn test_update_tags_once_primary_succeeds() {
        let h = setup();
        let created = create(&h).await;
        let request_id = created.physical_id.clone().unwrap();

        let update = LifecycleRequest::new(
            RequestType::Update,
            ResourceKind::Account,
            account_properties("x@y.com", "Dev").with("AccountType", "sandbox"),
        )
        .with_physical_id(request_id.clone())
        .with_old_properties(account_properties("x@y.com", "Dev"));

        let response = h.provider.provision(&update).await.unwrap();
        assert_eq!(response.physical_id, request_id);

        // Polls before the account exists do nothing.
        for _ in 0..2 {
            let result = h.provider.stabilize(&update).await.unwrap();
            assert!(!result.is_complete);
        }
        assert_eq!(h.accounts.tag_calls().await, 0);

        h.accounts
            .complete_request(request_id.as_str(), "111122223333")
            .await;

        let first = h.provider.stabilize(&update).await.unwrap();
        let tags_after_first = h.accounts.tags_for("111122223333").await;
        let second = h.provider.stabilize(&update).await.unwrap();
        let tags_after_second = h.accounts.tags_for("111122223333").await;

        assert!(first.is_complete);
        assert_eq!(first, second);
        assert_eq!(tags_after_first, tags_after_second);
        assert_eq!(
            tags_after_second.get("AccountType").map(String::as_str),
            Some("sandbox")
        );
        assert_eq!(tags_after_second.len(), 3);
    }

    #[tokio::test]
    async fn test_update_provision_is_idempotent() {
        let h = setup();
        let created = create(&h).await;
        let update = created.as_type(RequestType::Update);

        let first = h.provider.provision(&update).await.unwrap();
        let second = h.provider.provision(&update).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(h.accounts.create_calls().await, 1);
        assert_eq!(h.accounts.tag_calls().await, 0);
    }

    #[tokio::test]
    async fn test_delete_is_unsupported() {
        let h = setup();
        let created = create(&h).await;
        let delete = created.as_type(RequestType::Delete);

        let err = h.provider.stabilize(&delete).await.unwrap_err();
        assert_eq!(
            err,
            ProviderError::unsupported(ResourceKind::Account, RequestType::Delete)
        );
        assert!(h.provider.provision(&delete).await.is_err());
    }

    #[tokio::test]
    async fn test_external_timeout_surfaces_as_retryable() {
        let h = setup();
        let request = create(&h).await;
        h.accounts
            .fail_next_call(ApiError::Timeout {
                operation: "DescribeCreateAccountStatus".to_string(),
            })
            .await;

        let err = h.provider.stabilize(&request).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::ExternalCall {
                timed_out: true,
                ..
            }
        ));
        assert!(err.is_retryable());

        // The next poll goes through normally.
        assert!(h.provider.stabilize(&request).await.is_ok());
    }
}

mod email {
    use super::*;

    #[tokio::test]
    async fn test_verification_scenario() {
        let h = setup();
        let create = LifecycleRequest::create(
            ResourceKind::EmailIdentity,
            PropertyBag::from([("Email", "a@b.com")]),
        );

        let response = h.provider.provision(&create).await.unwrap();
        assert_eq!(response.physical_id.as_str(), "validateEmail");

        let poll = LifecycleRequest::create(
            ResourceKind::EmailIdentity,
            PropertyBag::from([("email", "a@b.com")]),
        )
        .with_physical_id(response.physical_id.clone());

        let result = h.provider.stabilize(&poll).await.unwrap();
        assert!(!result.is_complete);

        h.emails
            .set_status("a@b.com", VerificationStatus::Success)
            .await;

        let result = h.provider.stabilize(&poll).await.unwrap();
        assert!(result.is_complete);
        assert_eq!(h.provider.stabilize(&poll).await.unwrap(), result);
    }

    #[tokio::test]
    async fn test_delete_resolves_immediately() {
        let h = setup();
        let id = PhysicalResourceId::parse("validateEmail").unwrap();
        let delete = LifecycleRequest::new(
            RequestType::Delete,
            ResourceKind::EmailIdentity,
            PropertyBag::from([("email", "a@b.com")]),
        )
        .with_physical_id(id.clone());

        let first = h.provider.provision(&delete).await.unwrap();
        let second = h.provider.provision(&delete).await.unwrap();
        assert_eq!(first.physical_id, id);
        assert_eq!(first, second);

        assert!(h.provider.stabilize(&delete).await.unwrap().is_complete);
        assert_eq!(h.emails.verify_calls().await, 0);
    }

    #[tokio::test]
    async fn test_invalid_properties_rejected_before_external_call() {
        let h = setup();
        let create = LifecycleRequest::create(
            ResourceKind::EmailIdentity,
            PropertyBag::from([("email", "a@b.com"), ("Region", "eu-west-1")]),
        );

        let err = h.provider.provision(&create).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidProperties { .. }));
        assert_eq!(h.emails.verify_calls().await, 0);
    }
}

#[tokio::test]
async fn test_missing_physical_id_always_rejected() {
    let h = setup();

    for kind in [ResourceKind::Account, ResourceKind::EmailIdentity] {
        for request_type in [RequestType::Create, RequestType::Update, RequestType::Delete] {
            let request = LifecycleRequest::new(request_type, kind, PropertyBag::new());
            assert_eq!(
                h.provider.stabilize(&request).await.unwrap_err(),
                ProviderError::missing_physical_id(kind, request_type)
            );
        }
    }
}

#[tokio::test]
async fn test_independent_resources_provision_concurrently() {
    let h = setup();

    let requests: Vec<LifecycleRequest> = (0..8)
        .map(|i| {
            LifecycleRequest::create(
                ResourceKind::Account,
                account_properties(&format!("user{}@example.com", i), &format!("Account{}", i)),
            )
        })
        .collect();

    let responses =
        futures::future::join_all(requests.iter().map(|r| h.provider.provision(r))).await;

    let mut ids: Vec<String> = responses
        .into_iter()
        .map(|r| r.unwrap().physical_id.to_string())
        .collect();
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 8);
    assert_eq!(h.accounts.create_calls().await, 8);
}
