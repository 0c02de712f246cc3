mod properties;
mod request;
mod response;

pub use properties::{
    AccountProperties, EmailProperties, PropertyBag, Tag, MAX_TAGS_PER_CALL, MAX_TAG_KEY_LEN,
    MAX_TAG_VALUE_LEN, TRANSPORT_KEYS,
};
pub use request::{LifecycleRequest, PhysicalResourceId, RequestType, ResourceKind};
pub use response::{OperationStatus, ProvisionResponse, StabilizationResult};
