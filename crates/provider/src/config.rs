/// Physical id the email identity resource has always been registered under.
pub const DEFAULT_EMAIL_PHYSICAL_ID: &str = "validateEmail";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Physical id returned for every email identity. The identity itself is
    /// keyed by address, so the id only needs to be stable.
    pub email_physical_id: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            email_physical_id: DEFAULT_EMAIL_PHYSICAL_ID.to_string(),
        }
    }
}

impl ProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_email_physical_id(mut self, id: impl Into<String>) -> Self {
        self.email_physical_id = id.into();
        self
    }
}
