use serde::{Deserialize, Serialize};

use crate::client::FeatureServiceError;

/// the body of an ArcGIS error envelope, `{"error": {...}}`. services report
/// most failures this way with an HTTP 200 status.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
}

/// any response of the feature service: either the expected payload or an
/// error envelope.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum ServiceResponse<T> {
    Failure { error: ServiceErrorBody },
    Success(T),
}

impl<T> ServiceResponse<T> {
    pub fn into_result(self) -> Result<T, FeatureServiceError> {
        match self {
            ServiceResponse::Success(payload) => Ok(payload),
            ServiceResponse::Failure { error } if error.details.is_empty() => {
                Err(FeatureServiceError::ServiceError {
                    code: error.code,
                    message: error.message,
                })
            }
            ServiceResponse::Failure { error } => Err(FeatureServiceError::ServiceError {
                code: error.code,
                message: format!("{} ({})", error.message, error.details.join("; ")),
            }),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::response::{CountResult, FeatureSet};

    #[test]
    fn test_error_envelope() {
        let body = r#"{"error":{"code":400,"message":"Unable to complete operation.","details":["'where' parameter is invalid"]}}"#;
        let response: ServiceResponse<FeatureSet> = serde_json::from_str(body).unwrap();
        match response.into_result() {
            Err(FeatureServiceError::ServiceError { code, message }) => {
                assert_eq!(code, 400);
                assert_eq!(
                    message,
                    "Unable to complete operation. ('where' parameter is invalid)"
                );
            }
            other => panic!("expected service error, found {other:?}"),
        }
    }

    #[test]
    fn test_success_payload() {
        let body = r#"{"count":42}"#;
        let response: ServiceResponse<CountResult> = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_result().unwrap().count, 42);
    }

    #[test]
    fn test_error_envelope_without_details() {
        let body = r#"{"error":{"code":498,"message":"Invalid token."}}"#;
        let response: ServiceResponse<CountResult> = serde_json::from_str(body).unwrap();
        let error = response.into_result().unwrap_err();
        assert_eq!(
            error.to_string(),
            "feature service error 498: Invalid token."
        );
    }
}
