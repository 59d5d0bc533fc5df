use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ResultMsg;
use service::auth::errors::AuthError;
use tracing::error;

use crate::protocol::{ProtocolError, MALFORMED_MSG};

/// Failure on the HTTP surface, rendered as `{ "result": false, "msg": ... }`.
#[derive(Debug)]
pub enum ApiError {
    Auth(AuthError),
    /// Body was not JSON or not a credentials object.
    Malformed,
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        ApiError::Auth(e)
    }
}

impl From<ProtocolError> for ApiError {
    fn from(e: ProtocolError) -> Self {
        match e {
            ProtocolError::InvalidField(v) => ApiError::Auth(AuthError::Validation(v)),
            ProtocolError::Malformed(_) | ProtocolError::UnknownEvent(_) | ProtocolError::BinaryFrame => ApiError::Malformed,
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Malformed => StatusCode::BAD_REQUEST,
            ApiError::Auth(e) => match e {
                AuthError::Validation(_) => StatusCode::BAD_REQUEST,
                AuthError::Conflict => StatusCode::CONFLICT,
                AuthError::AccountNotFound | AuthError::PasswordMismatch => StatusCode::UNAUTHORIZED,
                AuthError::HashError(_) | AuthError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn client_message(&self) -> String {
        match self {
            ApiError::Malformed => MALFORMED_MSG.to_string(),
            ApiError::Auth(e) => e.client_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Auth(e) = &self {
            if status.is_server_error() {
                error!(code = e.code(), error = %e, "auth request failed internally");
            }
        }
        let body: ResultMsg = ResultMsg::fail(self.client_message());
        (status, Json(body)).into_response()
    }
}
