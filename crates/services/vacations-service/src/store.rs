//! Row access for the vacations service.
//!
//! All queries target the global tables `contratos`,
//! `solicitudes_vacaciones` and `usuarios`. The trait exists so the service
//! layer can be tested without a live data service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde_json::json;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Contract, User, VacationRequest, VacationStatus};
use supabase_rest::{filter, Supabase, Tier};

const CONTRACTS_TABLE: &str = "contratos";
const REQUESTS_TABLE: &str = "solicitudes_vacaciones";
const USERS_TABLE: &str = "usuarios";

/// Persistence operations needed by the vacation workflow.
#[async_trait]
pub trait VacationStore: Send + Sync {
    /// Most recent active contract for an employee
    async fn active_contract(&self, user_id: Uuid) -> AppResult<Option<Contract>>;

    /// Approved requests counting against a management year
    async fn approved_requests(
        &self,
        employee_id: Uuid,
        gestion: i32,
    ) -> AppResult<Vec<VacationRequest>>;

    /// One employee's requests, newest first
    async fn requests_for_employee(&self, employee_id: Uuid) -> AppResult<Vec<VacationRequest>>;

    /// Every request in the system, newest first
    async fn all_requests(&self) -> AppResult<Vec<VacationRequest>>;

    async fn find_request(&self, id: Uuid) -> AppResult<Option<VacationRequest>>;

    /// Insert a new `pendiente` row and return its stored representation
    async fn insert_request(
        &self,
        employee_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        days: i64,
        gestion: i32,
    ) -> AppResult<VacationRequest>;

    /// Record an approve/reject decision; `None` when no row matched
    async fn apply_decision(
        &self,
        id: Uuid,
        status: VacationStatus,
        decided_by: Uuid,
        rejection_reason: Option<String>,
    ) -> AppResult<Option<VacationRequest>>;

    /// Delete a request if it is still pending and owned by the employee.
    /// Returns whether a row was actually deleted.
    async fn delete_pending(&self, id: Uuid, employee_id: Uuid) -> AppResult<bool>;

    /// Platform user rows for the given ids, for the oversight listing join
    async fn employees_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>>;
}

/// Store backed by the hosted data service.
pub struct SupabaseVacationStore {
    db: Arc<Supabase>,
}

impl SupabaseVacationStore {
    pub fn new(db: Arc<Supabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VacationStore for SupabaseVacationStore {
    async fn active_contract(&self, user_id: Uuid) -> AppResult<Option<Contract>> {
        let mut contracts: Vec<Contract> = self
            .db
            .select(
                Tier::Read,
                CONTRACTS_TABLE,
                &[
                    ("usuario_id", filter::eq(user_id)),
                    ("activo", filter::eq(true)),
                    ("select", "*".to_string()),
                    ("order", filter::desc("fecha_inicio")),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(contracts.pop())
    }

    async fn approved_requests(
        &self,
        employee_id: Uuid,
        gestion: i32,
    ) -> AppResult<Vec<VacationRequest>> {
        self.db
            .select(
                Tier::Read,
                REQUESTS_TABLE,
                &[
                    ("empleado_id", filter::eq(employee_id)),
                    ("gestion", filter::eq(gestion)),
                    ("estado", filter::eq(VacationStatus::Approved)),
                    ("select", "*".to_string()),
                ],
            )
            .await
    }

    async fn requests_for_employee(&self, employee_id: Uuid) -> AppResult<Vec<VacationRequest>> {
        self.db
            .select(
                Tier::Read,
                REQUESTS_TABLE,
                &[
                    ("empleado_id", filter::eq(employee_id)),
                    ("select", "*".to_string()),
                    ("order", filter::desc("created_at")),
                ],
            )
            .await
    }

    async fn all_requests(&self) -> AppResult<Vec<VacationRequest>> {
        self.db
            .select(
                Tier::Service,
                REQUESTS_TABLE,
                &[
                    ("select", "*".to_string()),
                    ("order", filter::desc("created_at")),
                ],
            )
            .await
    }

    async fn find_request(&self, id: Uuid) -> AppResult<Option<VacationRequest>> {
        let mut requests: Vec<VacationRequest> = self
            .db
            .select(
                Tier::Read,
                REQUESTS_TABLE,
                &[
                    ("id", filter::eq(id)),
                    ("select", "*".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(requests.pop())
    }

    async fn insert_request(
        &self,
        employee_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        days: i64,
        gestion: i32,
    ) -> AppResult<VacationRequest> {
        let body = json!({
            "empleado_id": employee_id,
            "fecha_inicio": start,
            "fecha_fin": end,
            "dias_solicitados": days,
            "gestion": gestion,
            "estado": VacationStatus::Pending,
        });
        let mut rows: Vec<VacationRequest> = self.db.insert(REQUESTS_TABLE, &body).await?;
        rows.pop()
            .ok_or_else(|| AppError::internal("insert returned no representation"))
    }

    async fn apply_decision(
        &self,
        id: Uuid,
        status: VacationStatus,
        decided_by: Uuid,
        rejection_reason: Option<String>,
    ) -> AppResult<Option<VacationRequest>> {
        let body = json!({
            "estado": status,
            "aprobado_por": decided_by,
            "fecha_aprobacion": Utc::now(),
            "motivo_rechazo": rejection_reason,
        });
        let mut rows: Vec<VacationRequest> = self
            .db
            .update(REQUESTS_TABLE, &[("id", filter::eq(id))], &body)
            .await?;
        Ok(rows.pop())
    }

    async fn delete_pending(&self, id: Uuid, employee_id: Uuid) -> AppResult<bool> {
        let deleted: Vec<VacationRequest> = self
            .db
            .delete(
                REQUESTS_TABLE,
                &[
                    ("id", filter::eq(id)),
                    ("empleado_id", filter::eq(employee_id)),
                    ("estado", filter::eq(VacationStatus::Pending)),
                ],
            )
            .await?;
        Ok(!deleted.is_empty())
    }

    async fn employees_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.db
            .select(
                Tier::Service,
                USERS_TABLE,
                &[("id", filter::one_of(ids)), ("select", "*".to_string())],
            )
            .await
    }
}
