//! Loan Application Handlers
//!
//! `POST /applications` is public; every other route requires an operator token.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use uuid::Uuid;

use super::request_metadata;
use crate::domain::gateways::ApplicationQuery;
use crate::domain::models::application::{ApplicationId, ApplicationStatus};
use crate::infrastructure::driving_adapters::api_rest::dto::{
    ApplicationListResponseDto, ApplicationResponseDto, ApplicationStatsDto, ListQueryDto, MessageResponseDto,
    SubmitApplicationDto, SubmitApplicationResponseDto, UpdateStatusDto, UpdateStatusResponseDto,
};
use crate::infrastructure::driving_adapters::api_rest::extract::ValidatedJson;
use crate::infrastructure::driving_adapters::api_rest::middleware::JwtAuth;
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

fn parse_id(id: &str) -> Result<ApplicationId, ApiError> {
    Ok(ApplicationId::from_uuid(Uuid::parse_str(id)?))
}

/// POST /applications - Submit a loan application
///
/// # Responses
///
/// * 201 Created - Application stored with status `new`
/// * 400 Bad Request - Malformed body or validation error
/// * 429 Too Many Requests - Per-IP submission limit reached
/// * 503 Service Unavailable - Record store unreachable
#[axum::debug_handler]
pub async fn submit_application(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(dto): ValidatedJson<SubmitApplicationDto>,
) -> Result<(StatusCode, Json<SubmitApplicationResponseDto>), ApiError> {
    let application = state
        .submit_application_use_case
        .execute(dto.into_domain(request_metadata(&headers)))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitApplicationResponseDto {
            success: true,
            message: "Application submitted successfully".to_string(),
            application_id: application.id().to_string(),
        }),
    ))
}

/// GET /applications - Page through applications, newest first
///
/// # Responses
///
/// * 200 OK - `{applications, total, page, totalPages}`
/// * 400 Bad Request - Invalid page, limit or status
/// * 401 Unauthorized - Missing or invalid JWT token
#[axum::debug_handler]
pub async fn list_applications(
    _auth: JwtAuth,
    State(state): State<AppState>,
    query: Result<Query<ListQueryDto>, QueryRejection>,
) -> Result<Json<ApplicationListResponseDto>, ApiError> {
    let Query(query) = query?;
    let status = query.status_filter().map(str::parse::<ApplicationStatus>).transpose()?;

    let page = state
        .list_applications_use_case
        .execute(ApplicationQuery {
            page: query.page_request()?,
            status,
        })
        .await?;

    Ok(Json(page.into()))
}

/// GET /applications/stats - Aggregate counts and amounts
///
/// # Responses
///
/// * 200 OK - Per-status counts, total and average loan amount
/// * 401 Unauthorized - Missing or invalid JWT token
#[axum::debug_handler]
pub async fn get_application_stats(
    _auth: JwtAuth,
    State(state): State<AppState>,
) -> Result<Json<ApplicationStatsDto>, ApiError> {
    let stats = state.get_application_stats_use_case.execute().await?;
    Ok(Json(stats.into()))
}

/// GET /applications/:id - Get an application by ID
///
/// # Responses
///
/// * 200 OK - Application found
/// * 400 Bad Request - Malformed id
/// * 401 Unauthorized - Missing or invalid JWT token
/// * 404 Not Found - Application does not exist
#[axum::debug_handler]
pub async fn get_application_by_id(
    _auth: JwtAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApplicationResponseDto>, ApiError> {
    let id = parse_id(&id)?;
    let application = state.get_application_by_id_use_case.execute(&id).await?;
    Ok(Json(application.into()))
}

/// PUT /applications/:id - Set the application status
///
/// Approving ensures a single bank connection follow-up exists for the applicant.
///
/// # Responses
///
/// * 200 OK - Status applied (`changed` is false when it already had that value)
/// * 400 Bad Request - Unknown status or malformed id
/// * 401 Unauthorized - Missing or invalid JWT token
/// * 404 Not Found - Application does not exist
#[axum::debug_handler]
pub async fn update_application_status(
    JwtAuth(operator): JwtAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateStatusDto>,
) -> Result<Json<UpdateStatusResponseDto>, ApiError> {
    let id = parse_id(&id)?;
    let status: ApplicationStatus = dto.status.trim().parse()?;

    tracing::info!(operator = %operator.username, application_id = %id, status = %status, "Status change requested");
    let change = state.update_application_status_use_case.execute(&id, status).await?;

    let message = if change.changed {
        "Application status updated"
    } else {
        "Application status unchanged"
    };

    Ok(Json(UpdateStatusResponseDto {
        success: true,
        message: message.to_string(),
        status: change.application.status().to_string(),
        changed: change.changed,
        bank_connection_id: change.bank_connection.map(|c| c.id().to_string()),
    }))
}

/// DELETE /applications/:id - Hard delete an application
///
/// # Responses
///
/// * 200 OK - Application deleted
/// * 400 Bad Request - Malformed id
/// * 401 Unauthorized - Missing or invalid JWT token
/// * 404 Not Found - Application does not exist
#[axum::debug_handler]
pub async fn delete_application(
    _auth: JwtAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponseDto>, ApiError> {
    let id = parse_id(&id)?;
    state.delete_application_use_case.execute(&id).await?;

    Ok(Json(MessageResponseDto {
        success: true,
        message: "Application deleted successfully".to_string(),
    }))
}
