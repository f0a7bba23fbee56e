//! Vacation request entities.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::user::EmployeeSummary;

/// Lifecycle of a vacation request.
///
/// Created `pendiente`; transitions to `aprobada` or `rechazada` exactly
/// once. Terminal states are immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum VacationStatus {
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "aprobada")]
    Approved,
    #[serde(rename = "rechazada")]
    Rejected,
}

impl VacationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VacationStatus::Pending => "pendiente",
            VacationStatus::Approved => "aprobada",
            VacationStatus::Rejected => "rechazada",
        }
    }
}

impl std::fmt::Display for VacationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A vacation request row from `solicitudes_vacaciones`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VacationRequest {
    pub id: Uuid,
    #[serde(rename = "empleado_id")]
    pub employee_id: Uuid,
    #[serde(rename = "fecha_inicio")]
    pub start_date: NaiveDate,
    #[serde(rename = "fecha_fin")]
    pub end_date: NaiveDate,
    /// Inclusive day span between start and end dates
    #[serde(rename = "dias_solicitados")]
    pub requested_days: i64,
    /// Management year the request counts against
    pub gestion: i32,
    #[serde(rename = "estado")]
    pub status: VacationStatus,
    #[serde(rename = "aprobado_por", default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<Uuid>,
    #[serde(rename = "fecha_aprobacion", default, skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
    #[serde(rename = "motivo_rechazo", default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl VacationRequest {
    /// Guard for the single pending → approved/rejected transition.
    pub fn ensure_pending(&self) -> DomainResult<()> {
        if self.status == VacationStatus::Pending {
            Ok(())
        } else {
            Err(DomainError::AlreadyProcessed(self.status.to_string()))
        }
    }
}

/// Request merged with its employee record for the oversight listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VacationWithEmployee {
    #[serde(flatten)]
    pub request: VacationRequest,
    /// Absent when the employee row no longer exists
    #[serde(rename = "empleado", skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeSummary>,
}
