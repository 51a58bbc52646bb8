use axum::http::StatusCode;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Why a subscription request did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("subscription endpoint answered {status}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to reach subscription endpoint")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
#[error("invalid subscription endpoint `{url}`")]
pub struct InvalidEndpoint {
    pub url: String,
}
