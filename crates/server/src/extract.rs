//! Request body extraction for the HTTP auth routes.

use axum::extract::{FromRequest, Request};
use axum::{async_trait, Json};
use serde_json::Value;
use tracing::debug;

use crate::errors::ApiError;
use crate::protocol::{decode_credentials, Credentials};

/// `{username, password}` JSON body, decoded with the same rules as socket
/// payloads. Any rejection is answered with a `ResultMsg` body.
#[derive(Debug)]
pub struct CredentialsBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for CredentialsBody<T>
where
    S: Send + Sync,
    T: Credentials + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await.map_err(|rejection| {
            debug!(%rejection, "request body rejected");
            ApiError::Malformed
        })?;
        Ok(CredentialsBody(decode_credentials(value)?))
    }
}
