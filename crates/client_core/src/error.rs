use shared::{domain::ProductId, error::ApiError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("product {0} not found")]
    NotFound(ProductId),
    #[error("product has no id")]
    MissingId,
    #[error("request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }

    pub(crate) fn rejected(status: u16, body: Option<ApiError>) -> Self {
        let message = body
            .map(|err| err.message)
            .unwrap_or_else(|| "no error body".to_string());
        ServiceError::Rejected { status, message }
    }
}

#[derive(Debug, Error)]
pub enum ClientConfigError {
    #[error("failed to load client configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid api url '{url}': {source}")]
    InvalidApiUrl {
        url: String,
        source: url::ParseError,
    },
}
