//! The two Lambda entry points, free of any runtime plumbing so tests can
//! drive them with plain events.

use provider::ResourceProvider;
use tracing::{debug, error};

use crate::config::HandlerConfig;
use crate::error::Result;
use crate::wire::{CustomResourceEvent, IsCompleteResponse, OnEventResponse};

/// On-event handler: starts (or echoes) the operation for one lifecycle
/// transition.
pub async fn on_event(
    provider: &ResourceProvider,
    config: &HandlerConfig,
    event: CustomResourceEvent,
) -> Result<OnEventResponse> {
    debug!(event = ?event, "Received on-event request");

    let request = match event.into_request(config.default_resource_kind) {
        Ok(request) => request,
        Err(err) => {
            error!(error = %err, "Rejected on-event request");
            return Err(err);
        }
    };

    let response = provider.provision(&request).await?;
    Ok(response.into())
}

/// Is-complete handler: one status query, answered with `IsComplete`.
pub async fn is_complete(
    provider: &ResourceProvider,
    config: &HandlerConfig,
    event: CustomResourceEvent,
) -> Result<IsCompleteResponse> {
    debug!(event = ?event, "Received is-complete request");

    let request = match event.into_request(config.default_resource_kind) {
        Ok(request) => request,
        Err(err) => {
            error!(error = %err, "Rejected is-complete request");
            return Err(err);
        }
    };

    let result = provider.stabilize(&request).await?;
    Ok(result.into())
}
