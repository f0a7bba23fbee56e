//! User directory entities.
//!
//! Users are read-only from this system's perspective; rows live either in
//! the platform-wide `usuarios` table (employment services) or in the
//! tenant-prefixed `{schema}_usuarios` tables (academic services). Wire
//! column names stay in Spanish to match the hosted tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::{Capability, Role};

/// A user's profile within a tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido", default)]
    pub last_name: String,
    #[serde(rename = "rol")]
    pub role: Role,
    /// Job title, if recorded
    #[serde(rename = "cargo", default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Check the capability table for this user's role.
    pub fn can(&self, capability: Capability) -> bool {
        self.role.allows(capability)
    }

    /// Display name, `"{first} {last}"` with a trailing space trimmed when
    /// the last name is empty.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim_end()
            .to_string()
    }
}

/// Compact user view merged into denormalized responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EmployeeSummary {
    pub id: Uuid,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido", default)]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "cargo", default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl From<&User> for EmployeeSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            position: user.position.clone(),
        }
    }
}
