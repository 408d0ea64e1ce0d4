use crate::model::BlockGroupId;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum OdError {
    #[error("Please select a Day of Week first")]
    MissingDay,
    #[error("Please select a Time Period")]
    MissingTime,
    #[error("unknown day code '{0}'")]
    InvalidDay(String),
    #[error("unknown time period code '{0}'")]
    InvalidTime(String),
    #[error("unknown trip mode '{0}'")]
    InvalidMode(String),
    #[error("feature on layer '{layer_id}' has no '{field}' attribute")]
    MissingAttribute { layer_id: String, field: String },
    #[error("invalid trip row for origin {origin}: {message}")]
    InvalidTripRow {
        origin: BlockGroupId,
        message: String,
    },
    #[error("invalid class breaks: {0}")]
    InvalidClassBreaks(String),
}

impl OdError {
    /// true for the errors that a viewer shows as a blocking prompt before
    /// any query is issued.
    pub fn is_user_prompt(&self) -> bool {
        matches!(self, OdError::MissingDay | OdError::MissingTime)
    }
}
