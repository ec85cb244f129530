use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Could not obtain an LWA access token: {0}")]
    Authentication(String),
    #[error("Invalid REST request: {0}")]
    RestRequestError(String),
    #[error("Invalid REST response: {0}")]
    RestResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Request was throttled. {0}")]
    Throttled(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
}

#[derive(Debug, Error)]
#[error("Invalid configuration. {0}")]
pub struct ConfigurationError(pub String);
