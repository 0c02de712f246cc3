use serde::{Deserialize, Serialize};
use std::fmt;

use super::PropertyBag;

/// Lifecycle transition requested by the orchestrator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Create" => Some(Self::Create),
            "Update" => Some(Self::Update),
            "Delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const RESOURCE_TYPE_PREFIX: &str = "Custom::";

/// Resource kinds this provider knows how to manage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// An account created inside an organization.
    Account,
    /// A verified email identity.
    EmailIdentity,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Account => "Account",
            Self::EmailIdentity => "EmailIdentity",
        }
    }

    /// Resource type string the orchestrator uses for this kind.
    pub fn resource_type(&self) -> String {
        format!("{}{}", RESOURCE_TYPE_PREFIX, self.as_str())
    }

    /// Accepts either the bare kind name or the orchestrator resource type
    /// (`Custom::Account`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.strip_prefix(RESOURCE_TYPE_PREFIX).unwrap_or(s) {
            "Account" => Some(Self::Account),
            "EmailIdentity" => Some(Self::EmailIdentity),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque correlation key minted once on Create and owned by the orchestrator
/// for the lifetime of the resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct PhysicalResourceId(String);

impl PhysicalResourceId {
    /// Returns `None` for empty or whitespace-only ids.
    pub fn parse(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PhysicalResourceId {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(value).ok_or_else(|| "PhysicalResourceId must not be empty".to_string())
    }
}

impl From<PhysicalResourceId> for String {
    fn from(id: PhysicalResourceId) -> Self {
        id.0
    }
}

impl fmt::Display for PhysicalResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One invocation from the orchestrator. Built fresh for every call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleRequest {
    pub request_type: RequestType,
    pub resource_kind: ResourceKind,
    pub physical_id: Option<PhysicalResourceId>,
    pub properties: PropertyBag,
    pub old_properties: Option<PropertyBag>,
    pub logical_id: Option<String>,
    pub request_id: Option<String>,
}

impl LifecycleRequest {
    pub fn new(
        request_type: RequestType,
        resource_kind: ResourceKind,
        properties: impl Into<PropertyBag>,
    ) -> Self {
        Self {
            request_type,
            resource_kind,
            physical_id: None,
            properties: properties.into(),
            old_properties: None,
            logical_id: None,
            request_id: None,
        }
    }

    pub fn create(resource_kind: ResourceKind, properties: impl Into<PropertyBag>) -> Self {
        Self::new(RequestType::Create, resource_kind, properties)
    }

    pub fn with_physical_id(mut self, physical_id: PhysicalResourceId) -> Self {
        self.physical_id = Some(physical_id);
        self
    }

    pub fn with_old_properties(mut self, old_properties: impl Into<PropertyBag>) -> Self {
        self.old_properties = Some(old_properties.into());
        self
    }

    pub fn with_logical_id(mut self, logical_id: impl Into<String>) -> Self {
        self.logical_id = Some(logical_id.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Same request, different lifecycle transition.
    pub fn as_type(&self, request_type: RequestType) -> Self {
        Self {
            request_type,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_type_parsing() {
        assert_eq!(RequestType::parse("Create"), Some(RequestType::Create));
        assert_eq!(RequestType::parse("Delete"), Some(RequestType::Delete));
        assert_eq!(RequestType::parse("create"), None);
        assert_eq!(RequestType::Update.to_string(), "Update");
    }

    #[test]
    fn test_resource_kind_parsing() {
        assert_eq!(ResourceKind::parse("Custom::Account"), Some(ResourceKind::Account));
        assert_eq!(ResourceKind::parse("Account"), Some(ResourceKind::Account));
        assert_eq!(
            ResourceKind::parse("Custom::EmailIdentity"),
            Some(ResourceKind::EmailIdentity)
        );
        assert_eq!(ResourceKind::parse("Custom::Bucket"), None);
        assert_eq!(ResourceKind::parse("AWS::S3::Bucket"), None);
    }

    #[test]
    fn test_resource_type_round_trip() {
        for kind in [ResourceKind::Account, ResourceKind::EmailIdentity] {
            assert_eq!(ResourceKind::parse(&kind.resource_type()), Some(kind));
        }
    }

    #[test]
    fn test_physical_id_rejects_blank() {
        assert!(PhysicalResourceId::parse("").is_none());
        assert!(PhysicalResourceId::parse("   ").is_none());
        assert_eq!(
            PhysicalResourceId::parse("car-123").unwrap().as_str(),
            "car-123"
        );
    }

    #[test]
    fn test_physical_id_serde() {
        let id: PhysicalResourceId = serde_json::from_str("\"car-42\"").unwrap();
        assert_eq!(id.to_string(), "car-42");
        assert!(serde_json::from_str::<PhysicalResourceId>("\"\"").is_err());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"car-42\"");
    }

    #[test]
    fn test_request_builder() {
        let id = PhysicalResourceId::parse("car-1").unwrap();
        let request = LifecycleRequest::create(ResourceKind::Account, PropertyBag::new())
            .with_physical_id(id.clone())
            .with_logical_id("DevAccount");

        assert_eq!(request.request_type, RequestType::Create);
        assert_eq!(request.physical_id, Some(id));
        assert_eq!(request.logical_id.as_deref(), Some("DevAccount"));

        let update = request.as_type(RequestType::Update);
        assert_eq!(update.request_type, RequestType::Update);
        assert_eq!(update.physical_id, request.physical_id);
    }
}
