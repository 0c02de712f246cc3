use provider_core::ProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0} is not a supported operation")]
    UnsupportedRequestType(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl HandlerError {
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Provider(err) => err.is_retryable(),
            Self::UnsupportedRequestType(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, HandlerError>;
