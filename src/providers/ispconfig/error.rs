use crate::providers::ispconfig::types::Method;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ISPConfigProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{method} returned HTTP {status}: {body}")]
    Status {
        method: Method,
        status: StatusCode,
        body: String,
    },

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("{method} failed ({code}): {message}")]
    Remote {
        method: Method,
        code: String,
        message: String,
    },

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Malformed {method} response: {reason}")]
    MalformedResponse { method: Method, reason: String },
}

use crate::error::Error;

pub fn map_error(e: ISPConfigProviderError) -> Error {
    use ISPConfigProviderError::*;
    match e {
        Http(err) => Error::ProviderError(err.to_string()),
        Json(err) => Error::ProviderError(err.to_string()),
        e @ Status { .. } => Error::ProviderError(e.to_string()),
        Credential(msg) => Error::CredentialError(msg),
        e @ Remote {
            method: Method::Login,
            ..
        } => Error::CredentialError(e.to_string()),
        e @ Remote {
            method: Method::ZoneGetId | Method::ZoneGet,
            ..
        } => Error::NotFound(e.to_string()),
        e @ Remote { .. } => Error::ProviderError(e.to_string()),
        NotAuthenticated => Error::CredentialError("Not logged in".to_string()),
        e @ MalformedResponse { .. } => Error::MalformedResponse(e.to_string()),
    }
}
