use anyhow::{bail, Context, Result};
use cloud_api::config::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_OPERATION_TIMEOUT, DEFAULT_REGION};
use cloud_api::ApiConfig;
use provider::ProviderConfig;
use provider_core::ResourceKind;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" | "text" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Configuration for one Lambda cold start, read from the environment.
#[derive(Debug, Clone, Default)]
pub struct HandlerConfig {
    pub api: ApiConfig,
    pub provider: ProviderConfig,
    /// Kind used for events whose `ResourceType` is not recognised.
    pub default_resource_kind: Option<ResourceKind>,
    pub log_format: LogFormat,
}

impl HandlerConfig {
    /// Environment variables:
    /// - PROVIDER_REGION (falls back to AWS_REGION, then us-east-1)
    /// - PROVIDER_OPERATION_TIMEOUT_MS
    /// - PROVIDER_CONNECT_TIMEOUT_MS
    /// - PROVIDER_DEFAULT_RESOURCE_KIND: `Account` or `EmailIdentity`
    /// - PROVIDER_EMAIL_PHYSICAL_ID
    /// - PROVIDER_LOG_FORMAT: `json` or `pretty`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let region = lookup("PROVIDER_REGION")
            .or_else(|| lookup("AWS_REGION"))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let operation_timeout =
            parse_millis(&lookup, "PROVIDER_OPERATION_TIMEOUT_MS")?.unwrap_or(DEFAULT_OPERATION_TIMEOUT);
        let connect_timeout =
            parse_millis(&lookup, "PROVIDER_CONNECT_TIMEOUT_MS")?.unwrap_or(DEFAULT_CONNECT_TIMEOUT);

        let default_resource_kind = match lookup("PROVIDER_DEFAULT_RESOURCE_KIND") {
            Some(kind) => Some(
                ResourceKind::parse(&kind)
                    .with_context(|| format!("PROVIDER_DEFAULT_RESOURCE_KIND: unknown kind '{}'", kind))?,
            ),
            None => None,
        };

        let log_format = match lookup("PROVIDER_LOG_FORMAT") {
            Some(format) => LogFormat::parse(&format)
                .with_context(|| format!("PROVIDER_LOG_FORMAT: unknown format '{}'", format))?,
            None => LogFormat::default(),
        };

        let mut provider = ProviderConfig::default();
        if let Some(id) = lookup("PROVIDER_EMAIL_PHYSICAL_ID") {
            if id.trim().is_empty() {
                bail!("PROVIDER_EMAIL_PHYSICAL_ID must not be empty");
            }
            provider = provider.with_email_physical_id(id);
        }

        Ok(Self {
            api: ApiConfig::new(region)
                .with_operation_timeout(operation_timeout)
                .with_connect_timeout(connect_timeout),
            provider,
            default_resource_kind,
            log_format,
        })
    }
}

fn parse_millis<F>(lookup: &F, key: &str) -> Result<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let millis: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{} is not a number of milliseconds: '{}'", key, raw))?;
    if millis == 0 {
        bail!("{} must be greater than zero", key);
    }
    Ok(Some(Duration::from_millis(millis)))
}
