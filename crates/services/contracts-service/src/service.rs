//! Contract desk - business logic over the store and the directory.
//!
//! Every operation here is an administration task and runs behind the same
//! capability check; there is no self-service surface in this service.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{Capability, Contract, ContractWithEmployee, EmployeeSummary, User};
use supabase_rest::{resolve_membership, Membership, TenantDirectory, UserScope};

use crate::store::{ContractPatch, ContractStore, NewContractRow};

/// Count of contracts currently flagged active.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActiveContractStats {
    #[serde(rename = "total_activos")]
    pub total_active: i64,
}

/// Employment contract administration.
pub struct ContractDesk {
    store: Arc<dyn ContractStore>,
    directory: Arc<dyn TenantDirectory>,
}

impl ContractDesk {
    pub fn new(store: Arc<dyn ContractStore>, directory: Arc<dyn TenantDirectory>) -> Self {
        Self { store, directory }
    }

    /// Resolve the caller and check the administration capability.
    async fn administrator(&self, email: &str) -> AppResult<Membership> {
        let member =
            resolve_membership(self.directory.as_ref(), email, UserScope::Platform).await?;
        member.require(Capability::AdministerContracts)?;
        Ok(member)
    }

    /// All contracts with employee data merged in, newest first.
    pub async fn list(&self, email: &str) -> AppResult<Vec<ContractWithEmployee>> {
        self.administrator(email).await?;
        let contracts = self.store.list_contracts().await?;
        self.join_employees(contracts).await
    }

    pub async fn get(&self, email: &str, id: Uuid) -> AppResult<ContractWithEmployee> {
        self.administrator(email).await?;
        let contract = self.store.find_contract(id).await?.ok_or_not_found()?;
        let mut joined = self.join_employees(vec![contract]).await?;
        joined
            .pop()
            .ok_or_else(|| AppError::internal("join dropped the fetched contract"))
    }

    /// One employee's contract history, newest first.
    pub async fn history(&self, email: &str, user_id: Uuid) -> AppResult<Vec<ContractWithEmployee>> {
        self.administrator(email).await?;
        let contracts = self.store.contracts_for_user(user_id).await?;
        self.join_employees(contracts).await
    }

    /// Create a contract after verifying the employee exists.
    pub async fn create(&self, email: &str, row: NewContractRow) -> AppResult<Contract> {
        self.administrator(email).await?;
        self.store
            .find_user(row.user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;
        self.store.insert_contract(row).await
    }

    pub async fn update(&self, email: &str, id: Uuid, patch: ContractPatch) -> AppResult<Contract> {
        self.administrator(email).await?;
        if patch.is_empty() {
            return Err(AppError::validation("No fields provided to update"));
        }
        self.store
            .update_contract(id, patch)
            .await?
            .ok_or_not_found()
    }

    pub async fn remove(&self, email: &str, id: Uuid) -> AppResult<()> {
        self.administrator(email).await?;
        if self.store.delete_contract(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }

    pub async fn active_stats(&self, email: &str) -> AppResult<ActiveContractStats> {
        self.administrator(email).await?;
        let total_active = self.store.count_active().await?;
        Ok(ActiveContractStats { total_active })
    }

    /// Platform user directory, newest first.
    pub async fn directory_users(&self, email: &str) -> AppResult<Vec<User>> {
        self.administrator(email).await?;
        self.store.list_users().await
    }

    /// One bulk user fetch plus a hash index instead of a lookup per row.
    async fn join_employees(
        &self,
        contracts: Vec<Contract>,
    ) -> AppResult<Vec<ContractWithEmployee>> {
        let mut ids: Vec<Uuid> = contracts.iter().map(|c| c.user_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let users = self.store.users_by_ids(ids).await?;
        let by_id: HashMap<Uuid, EmployeeSummary> = users
            .iter()
            .map(|user| (user.id, EmployeeSummary::from(user)))
            .collect();

        Ok(contracts
            .into_iter()
            .map(|contract| {
                let employee = by_id.get(&contract.user_id).cloned();
                ContractWithEmployee { contract, employee }
            })
            .collect())
    }
}
