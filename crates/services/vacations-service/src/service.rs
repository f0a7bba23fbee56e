//! Vacation workflow - business logic over the store and the directory.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    is_eligible, validate_request, years_of_service, Capability, EmployeeSummary, User,
    VacationBalance, VacationRequest, VacationStatus, VacationWithEmployee, MAX_GESTION,
    MIN_GESTION,
};
use supabase_rest::{resolve_membership, Membership, TenantDirectory, UserScope};

use crate::store::VacationStore;

/// Eligibility answer for the calling employee.
#[derive(Debug, Serialize, ToSchema)]
pub struct EligibilityReport {
    pub eligible: bool,
    pub years_of_service: i64,
}

/// Balance for one employee and management year, computed fresh per call.
#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceReport {
    #[serde(rename = "empleado_id")]
    pub employee_id: Uuid,
    #[serde(rename = "nombre")]
    pub employee_name: String,
    pub gestion: i32,
    pub years_of_service: i64,
    #[serde(rename = "dias_disponibles")]
    pub available: i64,
    #[serde(rename = "dias_usados")]
    pub used: i64,
    #[serde(rename = "dias_restantes")]
    pub remaining: i64,
}

/// Vacation request workflow.
pub struct VacationDesk {
    store: Arc<dyn VacationStore>,
    directory: Arc<dyn TenantDirectory>,
}

impl VacationDesk {
    pub fn new(store: Arc<dyn VacationStore>, directory: Arc<dyn TenantDirectory>) -> Self {
        Self { store, directory }
    }

    /// Resolve the caller against the platform user table.
    async fn member(&self, email: &str) -> AppResult<Membership> {
        resolve_membership(self.directory.as_ref(), email, UserScope::Platform).await
    }

    /// Caller's directory profile.
    pub async fn profile(&self, email: &str) -> AppResult<User> {
        Ok(self.member(email).await?.user)
    }

    pub async fn eligibility(&self, email: &str) -> AppResult<EligibilityReport> {
        let member = self.member(email).await?;
        let years = self.seniority(member.user_id()).await?;
        Ok(EligibilityReport {
            eligible: is_eligible(years),
            years_of_service: years,
        })
    }

    pub async fn balance(&self, email: &str, gestion: i32) -> AppResult<BalanceReport> {
        ensure_gestion(gestion)?;
        let member = self.member(email).await?;
        let (years, balance) = self.balance_for(member.user_id(), gestion).await?;
        Ok(BalanceReport {
            employee_id: member.user_id(),
            employee_name: member.user.full_name(),
            gestion,
            years_of_service: years,
            available: balance.available,
            used: balance.used,
            remaining: balance.remaining,
        })
    }

    /// Validate and submit a new request as `pendiente`.
    ///
    /// The balance check and the insert are not atomic; concurrent
    /// submissions can momentarily overdraw and are reconciled at approval
    /// time by whoever reviews them.
    pub async fn submit(
        &self,
        email: &str,
        start: NaiveDate,
        end: NaiveDate,
        gestion: i32,
    ) -> AppResult<VacationRequest> {
        ensure_gestion(gestion)?;
        let member = self.member(email).await?;
        let (years, balance) = self.balance_for(member.user_id(), gestion).await?;
        let days = validate_request(years, start, end, balance)?;
        self.store
            .insert_request(member.user_id(), start, end, days, gestion)
            .await
    }

    /// Caller's own requests, newest first.
    pub async fn my_requests(&self, email: &str) -> AppResult<Vec<VacationRequest>> {
        let member = self.member(email).await?;
        self.store.requests_for_employee(member.user_id()).await
    }

    /// Every request, each merged with its employee record.
    ///
    /// One bulk user fetch plus a hash index instead of a lookup per row.
    pub async fn all_requests(&self, email: &str) -> AppResult<Vec<VacationWithEmployee>> {
        let member = self.member(email).await?;
        member.require(Capability::ViewAllVacations)?;

        let requests = self.store.all_requests().await?;
        let mut ids: Vec<Uuid> = requests.iter().map(|r| r.employee_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let employees = self.store.employees_by_ids(ids).await?;
        let by_id: HashMap<Uuid, EmployeeSummary> = employees
            .iter()
            .map(|user| (user.id, EmployeeSummary::from(user)))
            .collect();

        Ok(requests
            .into_iter()
            .map(|request| {
                let employee = by_id.get(&request.employee_id).cloned();
                VacationWithEmployee { request, employee }
            })
            .collect())
    }

    /// Approve or reject a pending request.
    pub async fn decide(
        &self,
        email: &str,
        id: Uuid,
        approve: bool,
        rejection_reason: Option<String>,
    ) -> AppResult<VacationRequest> {
        let member = self.member(email).await?;
        member.require(Capability::ApproveVacations)?;

        let request = self.store.find_request(id).await?.ok_or_not_found()?;
        request.ensure_pending()?;

        let status = if approve {
            VacationStatus::Approved
        } else {
            VacationStatus::Rejected
        };
        // Rejection reasons are only meaningful on rejections
        let reason = if approve { None } else { rejection_reason };

        self.store
            .apply_decision(id, status, member.user_id(), reason)
            .await?
            .ok_or_not_found()
    }

    /// Withdraw one of the caller's own pending requests.
    ///
    /// The answer deliberately does not reveal whether the row is missing,
    /// processed, or owned by someone else.
    pub async fn withdraw(&self, email: &str, id: Uuid) -> AppResult<()> {
        let member = self.member(email).await?;
        if self.store.delete_pending(id, member.user_id()).await? {
            Ok(())
        } else {
            Err(AppError::NotFoundOrUnauthorized)
        }
    }

    async fn seniority(&self, user_id: Uuid) -> AppResult<i64> {
        let contract = self
            .store
            .active_contract(user_id)
            .await?
            .ok_or(AppError::NoActiveContract)?;
        Ok(years_of_service(contract.start_date, Utc::now().date_naive()))
    }

    async fn balance_for(&self, user_id: Uuid, gestion: i32) -> AppResult<(i64, VacationBalance)> {
        let years = self.seniority(user_id).await?;
        let approved = self.store.approved_requests(user_id, gestion).await?;
        let used: i64 = approved.iter().map(|r| r.requested_days).sum();
        Ok((years, VacationBalance::compute(years, used)))
    }
}

fn ensure_gestion(gestion: i32) -> AppResult<()> {
    if (MIN_GESTION..=MAX_GESTION).contains(&gestion) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Management year must be between {MIN_GESTION} and {MAX_GESTION}"
        )))
    }
}
