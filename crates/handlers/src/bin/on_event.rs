use anyhow::Context;
use custom_resource_handlers::{
    build_provider, init_tracing, on_event, CustomResourceEvent, HandlerConfig,
};
use lambda_runtime::{service_fn, LambdaEvent};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Arc::new(HandlerConfig::from_env().context("Failed to load handler configuration")?);
    init_tracing(config.log_format);

    let provider = Arc::new(build_provider(&config).await);
    info!("Starting on-event handler");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<CustomResourceEvent>| {
        let provider = provider.clone();
        let config = config.clone();
        async move {
            on_event(&provider, &config, event.payload)
                .await
                .map_err(lambda_runtime::Error::from)
        }
    }))
    .await
    .map_err(|err| anyhow::anyhow!("Lambda runtime stopped: {}", err))
}
