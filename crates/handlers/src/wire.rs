//! CloudFormation custom resource event and response shapes.

use provider_core::{
    LifecycleRequest, PhysicalResourceId, PropertyBag, ProviderError, ProvisionResponse,
    RequestType, ResourceKind, StabilizationResult,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{HandlerError, Result};

/// Event delivered to both the on-event and the is-complete function.
/// Fields this layer does not use (`StackId`, `ResponseURL`, ...) are
/// ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceEvent {
    pub request_type: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub logical_resource_id: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub physical_resource_id: Option<String>,
    #[serde(default)]
    pub resource_properties: BTreeMap<String, Value>,
    #[serde(default)]
    pub old_resource_properties: Option<BTreeMap<String, Value>>,
}

impl CustomResourceEvent {
    /// Resolve the resource kind from `ResourceType`, falling back to
    /// `default_kind` for resource types this provider does not recognise.
    pub fn resource_kind(&self, default_kind: Option<ResourceKind>) -> Result<ResourceKind> {
        let resource_type = self.resource_type.as_deref().unwrap_or_default();
        ResourceKind::parse(resource_type)
            .or(default_kind)
            .ok_or_else(|| {
                ProviderError::UnsupportedResourceKind(resource_type.to_string()).into()
            })
    }

    pub fn into_request(self, default_kind: Option<ResourceKind>) -> Result<LifecycleRequest> {
        let request_type = RequestType::parse(&self.request_type)
            .ok_or_else(|| HandlerError::UnsupportedRequestType(self.request_type.clone()))?;
        let kind = self.resource_kind(default_kind)?;

        let properties = to_property_bag(kind, self.resource_properties)?;
        let old_properties = self
            .old_resource_properties
            .map(|old| to_property_bag(kind, old))
            .transpose()?;

        Ok(LifecycleRequest {
            request_type,
            resource_kind: kind,
            // An empty id on the wire means no id.
            physical_id: self.physical_resource_id.and_then(PhysicalResourceId::parse),
            properties,
            old_properties,
            logical_id: self.logical_resource_id,
            request_id: self.request_id,
        })
    }
}

/// Scalars are stringified the way the control plane itself passes them on;
/// anything structured is rejected.
fn to_property_bag(kind: ResourceKind, raw: BTreeMap<String, Value>) -> Result<PropertyBag> {
    let mut bag = PropertyBag::new();
    for (key, value) in raw {
        let value = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => {
                return Err(ProviderError::invalid_properties(
                    kind,
                    format!("property '{}' must be a string, number or boolean", key),
                )
                .into())
            }
        };
        bag.insert(key, value);
    }
    Ok(bag)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OnEventResponse {
    pub physical_resource_id: String,
    #[serde(default, skip_serializing_if = "PropertyBag::is_empty")]
    pub data: PropertyBag,
}

impl From<ProvisionResponse> for OnEventResponse {
    fn from(response: ProvisionResponse) -> Self {
        Self {
            physical_resource_id: response.physical_id.into(),
            data: response.data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IsCompleteResponse {
    pub is_complete: bool,
    #[serde(default, skip_serializing_if = "PropertyBag::is_empty")]
    pub data: PropertyBag,
}

impl From<StabilizationResult> for IsCompleteResponse {
    fn from(result: StabilizationResult) -> Self {
        Self {
            is_complete: result.is_complete,
            data: result.data,
        }
    }
}
