//! Auth Handlers

use axum::{extract::State, Json};

use crate::infrastructure::driving_adapters::api_rest::dto::{LoginDto, LoginResponseDto};
use crate::infrastructure::driving_adapters::api_rest::extract::ValidatedJson;
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

/// POST /auth/login - Exchange operator credentials for a bearer token
///
/// # Responses
///
/// * 200 OK - `{accessToken, tokenType, expiresIn}`
/// * 400 Bad Request - Missing username or password
/// * 401 Unauthorized - Unknown user or wrong password
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginDto>,
) -> Result<Json<LoginResponseDto>, ApiError> {
    let token = state.login_operator_use_case.execute(&dto.username, &dto.password).await?;
    Ok(Json(token.into()))
}
