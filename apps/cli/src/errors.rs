use reqwest::StatusCode;
use thiserror::Error;

use crate::match_client::ApiError;
use crate::resume::DocumentError;

/// Workflow-level error type.
/// Every variant is terminal for the attempt that raised it: the session
/// surfaces it as an error notice and stays ready for the next user action.
#[derive(Debug, Error)]
pub enum AppError {
    /// Pre-flight input validation; no request was sent.
    #[error("{0}")]
    InvalidInput(String),

    /// The backend rejected the request as invalid (HTTP 422).
    #[error("Validation Error (422): {0}. Please check your inputs.")]
    Validation(String),

    /// Any other non-success HTTP status.
    #[error("Server error: {status}")]
    Server { status: StatusCode },

    /// The request never produced an HTTP status (connect/DNS/IO failure).
    #[error("Failed to fetch: {0}")]
    Transport(String),

    /// Resume document could not be read or parsed.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// A success response whose body matched neither accepted shape.
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

const VALIDATION_TIPS: &[&str] = &[
    "Ensure your GitHub username is spelled correctly",
    "Check that your PDF file is valid",
    "The request may have validation issues (see logs for details)",
];

const CONNECTION_TIPS: &[&str] = &[
    "Check that the API server is running at http://localhost:8080",
    "Verify your network connection",
    "Try again in a few moments",
];

const ENDPOINT_TIPS: &[&str] = &[
    "The API endpoint may have changed",
    "Check that the server is properly configured",
    "Contact the administrator for assistance",
];

impl AppError {
    /// Troubleshooting tips shown under the error notice, selected by error
    /// class rather than by substring-matching the rendered message.
    pub fn tips(&self) -> &'static [&'static str] {
        match self {
            AppError::Validation(_) => VALIDATION_TIPS,
            AppError::Transport(_) => CONNECTION_TIPS,
            AppError::Server { status } if *status == StatusCode::METHOD_NOT_ALLOWED => {
                ENDPOINT_TIPS
            }
            _ => &[],
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http(e) => AppError::Transport(e.to_string()),
            ApiError::Validation { detail } => AppError::Validation(detail),
            ApiError::Server { status } => AppError::Server { status },
            ApiError::Decode(e) => AppError::Decode(e.to_string()),
        }
    }
}
