//! Vacation request handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, patch, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::{AppResult, ValidatedJson};
use domain::{User, VacationRequest, VacationWithEmployee};
use supabase_rest::CallerIdentity;

use crate::service::{BalanceReport, EligibilityReport};
use crate::state::AppState;

/// Caller profile as exposed by `/me`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "rol")]
    pub role: String,
    #[serde(rename = "cargo", skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role.as_str().to_string(),
            position: user.position,
        }
    }
}

/// New vacation request payload.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVacationRequest {
    #[serde(rename = "fecha_inicio")]
    #[schema(example = "2025-03-01")]
    pub start_date: NaiveDate,
    #[serde(rename = "fecha_fin")]
    #[schema(example = "2025-03-10")]
    pub end_date: NaiveDate,
    /// Management year the request counts against
    #[validate(range(min = 2020, max = 2100, message = "Management year must be between 2020 and 2100"))]
    #[schema(example = 2025)]
    pub gestion: i32,
}

/// Approve/reject payload.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DecisionRequest {
    /// `true` approves, `false` rejects
    pub approved: bool,
    /// Reason shown to the employee on rejection
    #[serde(rename = "motivo_rechazo")]
    #[validate(length(min = 1, message = "Rejection reason cannot be empty"))]
    pub rejection_reason: Option<String>,
}

/// Create vacation routes (all require authentication).
pub fn vacation_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/eligibility", get(eligibility))
        .route("/balance/:gestion", get(balance))
        .route("/request", post(submit_request))
        .route("/my-vacations", get(my_vacations))
        .route("/all", get(all_vacations))
        .route("/:id/approve", patch(decide))
        .route("/:id", delete(withdraw))
}

/// Get the caller's directory profile
#[utoipa::path(
    get,
    path = "/api/vacations/me",
    tag = "Vacations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Tenant or user not found")
    )
)]
pub async fn me(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
) -> AppResult<Json<ProfileResponse>> {
    let user = state.vacations.profile(&caller.email).await?;
    Ok(Json(ProfileResponse::from(user)))
}

/// Check vacation eligibility
#[utoipa::path(
    get,
    path = "/api/vacations/eligibility",
    tag = "Vacations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Eligibility and seniority", body = EligibilityReport),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "No active contract")
    )
)]
pub async fn eligibility(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
) -> AppResult<Json<EligibilityReport>> {
    let report = state.vacations.eligibility(&caller.email).await?;
    Ok(Json(report))
}

/// Get the vacation balance for a management year
#[utoipa::path(
    get,
    path = "/api/vacations/balance/{gestion}",
    tag = "Vacations",
    security(("bearer_auth" = [])),
    params(
        ("gestion" = i32, Path, description = "Management year (2020-2100)")
    ),
    responses(
        (status = 200, description = "Balance for the year", body = BalanceReport),
        (status = 400, description = "Management year out of range"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "No active contract")
    )
)]
pub async fn balance(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
    Path(gestion): Path<i32>,
) -> AppResult<Json<BalanceReport>> {
    let report = state.vacations.balance(&caller.email, gestion).await?;
    Ok(Json(report))
}

/// Submit a new vacation request
#[utoipa::path(
    post,
    path = "/api/vacations/request",
    tag = "Vacations",
    security(("bearer_auth" = [])),
    request_body = CreateVacationRequest,
    responses(
        (status = 201, description = "Request created as pending", body = VacationRequest),
        (status = 400, description = "Validation error or invalid date range"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Not eligible, no contract, or insufficient balance")
    )
)]
pub async fn submit_request(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateVacationRequest>,
) -> AppResult<(StatusCode, Json<VacationRequest>)> {
    let request = state
        .vacations
        .submit(
            &caller.email,
            payload.start_date,
            payload.end_date,
            payload.gestion,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// List the caller's own requests
#[utoipa::path(
    get,
    path = "/api/vacations/my-vacations",
    tag = "Vacations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's requests, newest first", body = Vec<VacationRequest>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn my_vacations(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<VacationRequest>>> {
    let requests = state.vacations.my_requests(&caller.email).await?;
    Ok(Json(requests))
}

/// List every request with employee data (oversight roles only)
#[utoipa::path(
    get,
    path = "/api/vacations/all",
    tag = "Vacations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All requests with employee data", body = Vec<VacationWithEmployee>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn all_vacations(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<VacationWithEmployee>>> {
    let requests = state.vacations.all_requests(&caller.email).await?;
    Ok(Json(requests))
}

/// Approve or reject a pending request (oversight roles only)
#[utoipa::path(
    patch,
    path = "/api/vacations/{id}/approve",
    tag = "Vacations",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    request_body = DecisionRequest,
    responses(
        (status = 200, description = "Updated request", body = VacationRequest),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already processed")
    )
)]
pub async fn decide(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<DecisionRequest>,
) -> AppResult<Json<VacationRequest>> {
    let request = state
        .vacations
        .decide(&caller.email, id, payload.approved, payload.rejection_reason)
        .await?;
    Ok(Json(request))
}

/// Withdraw one of the caller's own pending requests
#[utoipa::path(
    delete,
    path = "/api/vacations/{id}",
    tag = "Vacations",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    responses(
        (status = 204, description = "Request withdrawn"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found, already processed, or not yours")
    )
)]
pub async fn withdraw(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.vacations.withdraw(&caller.email, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
