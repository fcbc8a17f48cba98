//! Bank Connection Handlers

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use uuid::Uuid;

use super::request_metadata;
use crate::domain::gateways::BankConnectionQuery;
use crate::domain::models::bank_connection::BankConnectionId;
use crate::infrastructure::driving_adapters::api_rest::dto::{
    BankConnectionListResponseDto, CreateBankConnectionDto, CreateBankConnectionResponseDto, ListQueryDto,
    MessageResponseDto,
};
use crate::infrastructure::driving_adapters::api_rest::extract::ValidatedJson;
use crate::infrastructure::driving_adapters::api_rest::middleware::JwtAuth;
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

/// POST /bank-connections - Record the bank an approved applicant will use
///
/// # Responses
///
/// * 201 Created - Follow-up stored
/// * 400 Bad Request - Validation error or unexpected field (credentials are refused)
/// * 409 Conflict - The linked application already has a follow-up
/// * 429 Too Many Requests - Per-IP submission limit reached
/// * 503 Service Unavailable - Record store unreachable
#[axum::debug_handler]
pub async fn create_bank_connection(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(dto): ValidatedJson<CreateBankConnectionDto>,
) -> Result<(StatusCode, Json<CreateBankConnectionResponseDto>), ApiError> {
    let connection = state
        .create_bank_connection_use_case
        .execute(dto.into_domain(request_metadata(&headers)))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateBankConnectionResponseDto {
            success: true,
            message: "Bank connection submitted successfully".to_string(),
            connection_id: connection.id().to_string(),
        }),
    ))
}

/// GET /bank-connections - Page through follow-ups, newest first
///
/// # Responses
///
/// * 200 OK - `{connections, total, page, totalPages}`
/// * 400 Bad Request - Invalid page or limit
/// * 401 Unauthorized - Missing or invalid JWT token
#[axum::debug_handler]
pub async fn list_bank_connections(
    _auth: JwtAuth,
    State(state): State<AppState>,
    query: Result<Query<ListQueryDto>, QueryRejection>,
) -> Result<Json<BankConnectionListResponseDto>, ApiError> {
    let Query(query) = query?;

    let page = state
        .list_bank_connections_use_case
        .execute(BankConnectionQuery {
            page: query.page_request()?,
            status: query.status_filter().map(str::to_string),
        })
        .await?;

    Ok(Json(page.into()))
}

/// DELETE /bank-connections/:id
///
/// # Responses
///
/// * 200 OK - Follow-up deleted
/// * 400 Bad Request - Malformed id
/// * 401 Unauthorized - Missing or invalid JWT token
/// * 404 Not Found - Follow-up does not exist
#[axum::debug_handler]
pub async fn delete_bank_connection(
    _auth: JwtAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponseDto>, ApiError> {
    let id = BankConnectionId::from_uuid(Uuid::parse_str(&id)?);
    state.delete_bank_connection_use_case.execute(&id).await?;

    Ok(Json(MessageResponseDto {
        success: true,
        message: "Bank connection deleted successfully".to_string(),
    }))
}
