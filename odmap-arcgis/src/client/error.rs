#[derive(thiserror::Error, Debug)]
pub enum FeatureServiceError {
    #[error("Invalid input: {0}")]
    InvalidUserInput(String),
    #[error("Failed to build http client: {0}")]
    ClientBuildError(String),
    #[error("Request to '{url}' failed: {message}")]
    RequestError { url: String, message: String },
    #[error("feature service error {code}: {message}")]
    ServiceError { code: i64, message: String },
    #[error("Failed to decode response from '{url}': {message}")]
    DecodeError { url: String, message: String },
    #[error("Invalid trip row: {0}")]
    InvalidRow(String),
}
