//! Boundary to the external resource APIs.
//!
//! The provider only ever talks to these traits. Production code uses the
//! AWS SDK backed clients; tests use the in-memory fakes from [`memory`].

pub mod config;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod organizations;
pub mod ses;
pub mod traits;

pub use config::{load_sdk_config, ApiConfig};
pub use error::{ApiError, Result};
pub use organizations::OrganizationsClient;
pub use ses::SesClient;
pub use traits::{
    AccountApi, AccountCreationState, CreateAccountStatus, EmailIdentityApi, VerificationStatus,
};
