//! Lambda handlers wiring the custom resource provider to the AWS SDK.

pub mod config;
pub mod error;
pub mod handler;
pub mod telemetry;
pub mod wire;

use cloud_api::{load_sdk_config, OrganizationsClient, SesClient};
use provider::ResourceProvider;
use std::sync::Arc;
use tracing::info;

pub use config::{HandlerConfig, LogFormat};
pub use error::{HandlerError, Result};
pub use handler::{is_complete, on_event};
pub use telemetry::init_tracing;
pub use wire::{CustomResourceEvent, IsCompleteResponse, OnEventResponse};

/// Build a provider backed by the real Organizations and SES clients.
pub async fn build_provider(config: &HandlerConfig) -> ResourceProvider {
    let sdk_config = load_sdk_config(&config.api).await;
    info!(
        region = %config.api.region,
        operation_timeout_ms = config.api.operation_timeout.as_millis() as u64,
        "Loaded AWS configuration"
    );

    ResourceProvider::new(
        Arc::new(OrganizationsClient::new(&sdk_config)),
        Arc::new(SesClient::new(&sdk_config)),
        config.provider.clone(),
    )
}
