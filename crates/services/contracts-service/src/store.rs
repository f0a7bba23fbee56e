//! Row access for the contracts service.
//!
//! All queries target the global `contratos` and `usuarios` tables. The
//! trait exists so the desk can be tested without a live data service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Contract, User};
use supabase_rest::{filter, Supabase, Tier};

const CONTRACTS_TABLE: &str = "contratos";
const USERS_TABLE: &str = "usuarios";

/// Insert payload for a new contract.
#[derive(Debug, Clone, Serialize)]
pub struct NewContractRow {
    #[serde(rename = "usuario_id")]
    pub user_id: Uuid,
    #[serde(rename = "fecha_inicio")]
    pub start_date: NaiveDate,
    #[serde(rename = "salario")]
    pub salary: f64,
    #[serde(rename = "tiempo_prueba")]
    pub probation_days: i32,
    #[serde(rename = "activo")]
    pub active: bool,
}

/// Partial update for a contract; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContractPatch {
    #[serde(rename = "fecha_inicio", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "salario", skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(rename = "tiempo_prueba", skip_serializing_if = "Option::is_none")]
    pub probation_days: Option<i32>,
    #[serde(rename = "activo", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl ContractPatch {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.salary.is_none()
            && self.probation_days.is_none()
            && self.active.is_none()
    }
}

/// Persistence operations needed by the contract desk.
#[async_trait]
pub trait ContractStore: Send + Sync {
    /// Every contract, newest first
    async fn list_contracts(&self) -> AppResult<Vec<Contract>>;

    async fn find_contract(&self, id: Uuid) -> AppResult<Option<Contract>>;

    /// One employee's contract history, newest first
    async fn contracts_for_user(&self, user_id: Uuid) -> AppResult<Vec<Contract>>;

    async fn insert_contract(&self, row: NewContractRow) -> AppResult<Contract>;

    /// Apply a partial update; `None` when no row matched
    async fn update_contract(&self, id: Uuid, patch: ContractPatch)
        -> AppResult<Option<Contract>>;

    /// Delete one contract; returns whether a row was actually deleted
    async fn delete_contract(&self, id: Uuid) -> AppResult<bool>;

    /// Number of contracts currently flagged active
    async fn count_active(&self) -> AppResult<i64>;

    async fn find_user(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Platform user directory, newest first
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Platform user rows for the listing join
    async fn users_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>>;
}

/// Store backed by the hosted data service.
pub struct SupabaseContractStore {
    db: Arc<Supabase>,
}

impl SupabaseContractStore {
    pub fn new(db: Arc<Supabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContractStore for SupabaseContractStore {
    async fn list_contracts(&self) -> AppResult<Vec<Contract>> {
        self.db
            .select(
                Tier::Service,
                CONTRACTS_TABLE,
                &[
                    ("select", "*".to_string()),
                    ("order", filter::desc("created_at")),
                ],
            )
            .await
    }

    async fn find_contract(&self, id: Uuid) -> AppResult<Option<Contract>> {
        let mut contracts: Vec<Contract> = self
            .db
            .select(
                Tier::Read,
                CONTRACTS_TABLE,
                &[
                    ("id", filter::eq(id)),
                    ("select", "*".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(contracts.pop())
    }

    async fn contracts_for_user(&self, user_id: Uuid) -> AppResult<Vec<Contract>> {
        self.db
            .select(
                Tier::Read,
                CONTRACTS_TABLE,
                &[
                    ("usuario_id", filter::eq(user_id)),
                    ("select", "*".to_string()),
                    ("order", filter::desc("fecha_inicio")),
                ],
            )
            .await
    }

    async fn insert_contract(&self, row: NewContractRow) -> AppResult<Contract> {
        let mut rows: Vec<Contract> = self.db.insert(CONTRACTS_TABLE, &row).await?;
        rows.pop()
            .ok_or_else(|| AppError::internal("insert returned no representation"))
    }

    async fn update_contract(
        &self,
        id: Uuid,
        patch: ContractPatch,
    ) -> AppResult<Option<Contract>> {
        let mut rows: Vec<Contract> = self
            .db
            .update(CONTRACTS_TABLE, &[("id", filter::eq(id))], &patch)
            .await?;
        Ok(rows.pop())
    }

    async fn delete_contract(&self, id: Uuid) -> AppResult<bool> {
        let deleted: Vec<Contract> = self
            .db
            .delete(CONTRACTS_TABLE, &[("id", filter::eq(id))])
            .await?;
        Ok(!deleted.is_empty())
    }

    async fn count_active(&self) -> AppResult<i64> {
        let rows: Vec<serde_json::Value> = self
            .db
            .select(
                Tier::Read,
                CONTRACTS_TABLE,
                &[
                    ("activo", filter::eq(true)),
                    ("select", "id".to_string()),
                ],
            )
            .await?;
        Ok(rows.len() as i64)
    }

    async fn find_user(&self, id: Uuid) -> AppResult<Option<User>> {
        let mut users: Vec<User> = self
            .db
            .select(
                Tier::Service,
                USERS_TABLE,
                &[
                    ("id", filter::eq(id)),
                    ("select", "*".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(users.pop())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.db
            .select(
                Tier::Service,
                USERS_TABLE,
                &[
                    ("select", "*".to_string()),
                    ("order", filter::desc("created_at")),
                ],
            )
            .await
    }

    async fn users_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>> {
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
