//! Course and enrollment entities (tenant-prefixed tables).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::Role;

/// A course row from `{schema}_cursos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Course {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "creditos")]
    pub credits: i32,
    #[serde(rename = "horario", default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// An enrollment row from `{schema}_inscripciones`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Enrollment {
    pub id: i64,
    #[serde(rename = "curso_id")]
    pub course_id: i64,
    #[serde(rename = "usuario_id")]
    pub user_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One roster entry: enrollment merged with its user record.
///
/// Built by the application-level join in the courses service; the
/// persistence layer exposes no cross-entity join for tenant-scoped tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EnrollmentDetail {
    #[serde(rename = "inscripcion_id")]
    pub enrollment_id: i64,
    #[serde(rename = "usuario_id")]
    pub user_id: Uuid,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido", default)]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "rol")]
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub role: Role,
    #[serde(rename = "fecha_inscripcion", skip_serializing_if = "Option::is_none")]
    pub enrolled_at: Option<DateTime<Utc>>,
}
