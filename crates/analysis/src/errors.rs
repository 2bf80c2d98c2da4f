//! Error types for the analysis client.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The request could not be sent or the connection failed.
    #[error("Request to {endpoint} failed: {message}")]
    Request {
        endpoint: &'static str,
        message: String,
    },

    /// The service answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    /// The reply was not the expected JSON object.
    #[error("Could not decode {endpoint} response: {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },

    #[error("{endpoint} timed out")]
    Timeout { endpoint: &'static str },

    #[error("Invalid analysis service URL: {0}")]
    InvalidUrl(String),
}

impl AnalysisError {
    pub(crate) fn from_reqwest(endpoint: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AnalysisError::Timeout { endpoint }
        } else if err.is_decode() {
            AnalysisError::Decode {
                endpoint,
                message: err.to_string(),
            }
        } else {
            AnalysisError::Request {
                endpoint,
                message: err.to_string(),
            }
        }
    }
}

impl From<AnalysisError> for babyassist_core::Error {
    fn from(err: AnalysisError) -> Self {
        babyassist_core::Error::Analysis(err.to_string())
    }
}
