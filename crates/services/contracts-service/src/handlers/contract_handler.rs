//! Contract handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::{AppResult, ValidatedJson};
use domain::{Contract, ContractWithEmployee, DEFAULT_PROBATION_DAYS};
use supabase_rest::CallerIdentity;

use crate::service::ActiveContractStats;
use crate::state::AppState;
use crate::store::{ContractPatch, NewContractRow};

/// New contract payload.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateContractRequest {
    #[serde(rename = "usuario_id")]
    pub user_id: Uuid,
    #[serde(rename = "fecha_inicio")]
    #[schema(example = "2023-01-15")]
    pub start_date: NaiveDate,
    #[serde(rename = "salario")]
    #[validate(range(min = 0.0, message = "Salary cannot be negative"))]
    #[schema(example = 7500.0)]
    pub salary: f64,
    /// Probation period in days, 30 when omitted
    #[serde(rename = "tiempo_prueba", default = "default_probation")]
    #[validate(range(min = 0, message = "Probation days cannot be negative"))]
    pub probation_days: i32,
}

fn default_probation() -> i32 {
    DEFAULT_PROBATION_DAYS
}

impl From<CreateContractRequest> for NewContractRow {
    fn from(payload: CreateContractRequest) -> Self {
        Self {
            user_id: payload.user_id,
            start_date: payload.start_date,
            salary: payload.salary,
            probation_days: payload.probation_days,
            // new contracts always start active
            active: true,
        }
    }
}

/// Partial contract update payload.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateContractRequest {
    #[serde(rename = "fecha_inicio")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "salario")]
    #[validate(range(min = 0.0, message = "Salary cannot be negative"))]
    pub salary: Option<f64>,
    #[serde(rename = "tiempo_prueba")]
    #[validate(range(min = 0, message = "Probation days cannot be negative"))]
    pub probation_days: Option<i32>,
    #[serde(rename = "activo")]
    pub active: Option<bool>,
}

impl From<UpdateContractRequest> for ContractPatch {
    fn from(payload: UpdateContractRequest) -> Self {
        Self {
            start_date: payload.start_date,
            salary: payload.salary,
            probation_days: payload.probation_days,
            active: payload.active,
        }
    }
}

/// Create contract routes (all require authentication).
pub fn contract_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contracts).post(create_contract))
        .route("/stats/activos", get(active_stats))
        .route("/usuario/:user_id", get(contract_history))
        .route(
            "/:id",
            get(get_contract).put(update_contract).delete(delete_contract),
        )
}

/// List all contracts with employee data
#[utoipa::path(
    get,
    path = "/api/contracts",
    tag = "Contracts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Contracts, newest first", body = Vec<ContractWithEmployee>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_contracts(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ContractWithEmployee>>> {
    let contracts = state.contracts.list(&caller.email).await?;
    Ok(Json(contracts))
}

/// Get one contract with employee data
#[utoipa::path(
    get,
    path = "/api/contracts/{id}",
    tag = "Contracts",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Contract ID")
    ),
    responses(
        (status = 200, description = "Contract", body = ContractWithEmployee),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Contract not found")
    )
)]
pub async fn get_contract(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ContractWithEmployee>> {
    let contract = state.contracts.get(&caller.email, id).await?;
    Ok(Json(contract))
}

/// List one employee's contract history
#[utoipa::path(
    get,
    path = "/api/contracts/usuario/{user_id}",
    tag = "Contracts",
    security(("bearer_auth" = [])),
    params(
        ("user_id" = Uuid, Path, description = "Employee user ID")
    ),
    responses(
        (status = 200, description = "Employee's contracts, newest first", body = Vec<ContractWithEmployee>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn contract_history(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<ContractWithEmployee>>> {
    let contracts = state.contracts.history(&caller.email, user_id).await?;
    Ok(Json(contracts))
}

/// Create a contract
#[utoipa::path(
    post,
    path = "/api/contracts",
    tag = "Contracts",
    security(("bearer_auth" = [])),
    request_body = CreateContractRequest,
    responses(
        (status = 201, description = "Contract created", body = Contract),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn create_contract(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateContractRequest>,
) -> AppResult<(StatusCode, Json<Contract>)> {
    let contract = state.contracts.create(&caller.email, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(contract)))
}

/// Partially update a contract
#[utoipa::path(
    put,
    path = "/api/contracts/{id}",
    tag = "Contracts",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Contract ID")
    ),
    request_body = UpdateContractRequest,
    responses(
        (status = 200, description = "Updated contract", body = Contract),
        (status = 400, description = "Validation error or empty update"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Contract not found")
    )
)]
pub async fn update_contract(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateContractRequest>,
) -> AppResult<Json<Contract>> {
    let contract = state
        .contracts
        .update(&caller.email, id, payload.into())
        .await?;
    Ok(Json(contract))
}

/// Delete a contract
#[utoipa::path(
    delete,
    path = "/api/contracts/{id}",
    tag = "Contracts",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Contract ID")
    ),
    responses(
        (status = 204, description = "Contract deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Contract not found")
    )
)]
pub async fn delete_contract(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.contracts.remove(&caller.email, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Count active contracts
#[utoipa::path(
    get,
    path = "/api/contracts/stats/activos",
    tag = "Contracts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active contract count", body = ActiveContractStats),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn active_stats(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
) -> AppResult<Json<ActiveContractStats>> {
    let stats = state.contracts.active_stats(&caller.email).await?;
    Ok(Json(stats))
}
