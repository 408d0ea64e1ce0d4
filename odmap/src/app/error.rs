use std::path::PathBuf;

use odmap_arcgis::client::FeatureServiceError;
use odmap_core::model::OdError;

#[derive(thiserror::Error, Debug)]
pub enum OdAppError {
    #[error("Invalid input: {0}")]
    InvalidUserInput(String),
    #[error(transparent)]
    Od(#[from] OdError),
    #[error(transparent)]
    FeatureService(#[from] FeatureServiceError),
    #[error("Error reading from '{path}': {message}")]
    ReadError { path: PathBuf, message: String },
    #[error("Error writing to '{path}': {message}")]
    WriteError { path: PathBuf, message: String },
    #[error("Error creating a runtime to handle async code: {0}")]
    TokioError(String),
}
