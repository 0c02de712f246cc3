use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use std::time::Duration;
use tracing::debug;

/// Both external services are global and served from this region.
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub region: String,
    /// Upper bound for one external call, retries included. Keep it below
    /// the orchestrator's per-invocation timeout.
    pub operation_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Default::default()
        }
    }

    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn timeout_config(&self) -> TimeoutConfig {
        TimeoutConfig::builder()
            .operation_timeout(self.operation_timeout)
            .connect_timeout(self.connect_timeout)
            .build()
    }
}

/// Shared SDK configuration for every client built during one cold start.
pub async fn load_sdk_config(config: &ApiConfig) -> SdkConfig {
    debug!(
        region = %config.region,
        operation_timeout_ms = config.operation_timeout.as_millis() as u64,
        connect_timeout_ms = config.connect_timeout.as_millis() as u64,
        "Loading AWS SDK configuration"
    );

    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .timeout_config(config.timeout_config())
        .load()
        .await
}
