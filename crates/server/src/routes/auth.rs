use axum::{extract::State, Json};

use common::types::ResultMsg;
use service::auth::domain::{AccountProfile, LoginInput, RegisterInput};

use crate::errors::ApiError;
use crate::extract::CredentialsBody;
use crate::observability;
use crate::routes::ServerState;

/// `POST /player/register`
pub async fn register(
    State(state): State<ServerState>,
    CredentialsBody(input): CredentialsBody<RegisterInput>,
) -> Result<Json<ResultMsg>, ApiError> {
    let res = state.auth().register(input).await;
    observability::record_request("register", res.is_ok());
    res?;
    Ok(Json(ResultMsg::ok("Registration successful.")))
}

/// `POST /player/login`
pub async fn login(
    State(state): State<ServerState>,
    CredentialsBody(input): CredentialsBody<LoginInput>,
) -> Result<Json<ResultMsg<AccountProfile>>, ApiError> {
    let res = state.auth().login(input).await;
    observability::record_request("login", res.is_ok());
    let profile = res?;
    Ok(Json(ResultMsg::ok("Login successful.").with_user(profile)))
}
