//! Employment contract entities.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::EmployeeSummary;

/// An employment contract row from the `contratos` table.
///
/// The eligibility logic assumes at most one active contract per user and
/// picks the most recent by start date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Contract {
    pub id: Uuid,
    #[serde(rename = "usuario_id")]
    pub user_id: Uuid,
    #[serde(rename = "fecha_inicio")]
    pub start_date: NaiveDate,
    #[serde(rename = "salario")]
    pub salary: f64,
    /// Probation period length in days
    #[serde(rename = "tiempo_prueba")]
    pub probation_days: i32,
    #[serde(rename = "activo")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Denormalized read view joining contract and employee fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ContractWithEmployee {
    #[serde(flatten)]
    pub contract: Contract,
    /// Employee fields, absent when the user row no longer exists
    #[serde(rename = "empleado", skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeSummary>,
}
