use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_ses::types::VerificationStatus as SdkVerificationStatus;
use aws_sdk_ses::Client;
use tracing::{debug, info};

use crate::error::{ApiError, Result};
use crate::traits::{EmailIdentityApi, VerificationStatus};

const VERIFY_EMAIL_IDENTITY: &str = "VerifyEmailIdentity";
const GET_IDENTITY_VERIFICATION_ATTRIBUTES: &str = "GetIdentityVerificationAttributes";

/// `EmailIdentityApi` backed by Amazon SES.
#[derive(Debug, Clone)]
pub struct SesClient {
    client: Client,
}

impl SesClient {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    fn convert_status(status: &SdkVerificationStatus) -> Result<VerificationStatus> {
        match status {
            SdkVerificationStatus::Pending => Ok(VerificationStatus::Pending),
            SdkVerificationStatus::Success => Ok(VerificationStatus::Success),
            SdkVerificationStatus::Failed => Ok(VerificationStatus::Failed),
            SdkVerificationStatus::TemporaryFailure => Ok(VerificationStatus::TemporaryFailure),
            SdkVerificationStatus::NotStarted => Ok(VerificationStatus::NotStarted),
            other => Err(ApiError::service(
                GET_IDENTITY_VERIFICATION_ATTRIBUTES,
                format!("unrecognised verification status {}", other.as_str()),
            )),
        }
    }
}

#[async_trait]
impl EmailIdentityApi for SesClient {
    fn name(&self) -> &'static str {
        "ses"
    }

    async fn verify_email_identity(&self, email: &str) -> Result<()> {
        info!(email, "Requesting email identity verification");

        self.client
            .verify_email_identity()
            .email_address(email)
            .send()
            .await
            .map_err(|e| ApiError::from_sdk(VERIFY_EMAIL_IDENTITY, e))?;

        Ok(())
    }

    async fn verification_status(&self, email: &str) -> Result<Option<VerificationStatus>> {
        debug!(email, "Fetching identity verification attributes");

        let output = self
            .client
            .get_identity_verification_attributes()
            .identities(email)
            .send()
            .await
            .map_err(|e| ApiError::from_sdk(GET_IDENTITY_VERIFICATION_ATTRIBUTES, e))?;

        output
            .verification_attributes()
            .get(email)
            .map(|attributes| Self::convert_status(attributes.verification_status()))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_status() {
        assert_eq!(
            SesClient::convert_status(&SdkVerificationStatus::Success).unwrap(),
            VerificationStatus::Success
        );
        assert_eq!(
            SesClient::convert_status(&SdkVerificationStatus::TemporaryFailure).unwrap(),
            VerificationStatus::TemporaryFailure
        );
        assert!(SesClient::convert_status(&SdkVerificationStatus::from("Exploded")).is_err());
    }
}
