//! Provisioner and Stabilizer for resource types the control plane does not
//! manage natively.
//!
//! The orchestrator calls [`ResourceProvider::provision`] once per lifecycle
//! transition and then polls [`ResourceProvider::stabilize`] until the
//! resource settles. Nothing is kept between calls.

pub mod config;
pub mod dispatch;
pub mod resource;
pub mod resources;

pub use config::ProviderConfig;
pub use dispatch::{Resource, ResourceProvider};
pub use provider_core::{ProviderError, Result};
pub use resource::CustomResource;
pub use resources::{AccountResource, EmailResource};
