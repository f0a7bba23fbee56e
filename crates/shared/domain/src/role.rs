//! Roles and the capability table.
//!
//! Roles are a closed enumeration parsed case-insensitively from the strings
//! stored in the user directory (Spanish or English forms). Authorization
//! decisions go through [`Role::allows`] instead of ad-hoc string matching in
//! handlers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// User roles within a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Director,
    Admin,
    Administrator,
    Teacher,
    Student,
    Employee,
}

/// Operations that require an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Create a course in the tenant catalog
    CreateCourse,
    /// Create or delete enrollments, view course rosters
    ManageEnrollments,
    /// Full CRUD over employment contracts and the user directory
    AdministerContracts,
    /// Approve or reject vacation requests
    ApproveVacations,
    /// List every employee's vacation requests
    ViewAllVacations,
}

impl Role {
    /// Parse a stored role string. Unknown values fall back to the least
    /// privileged role.
    pub fn parse(s: &str) -> Role {
        match s.trim().to_lowercase().as_str() {
            "director" => Role::Director,
            "admin" => Role::Admin,
            "administrador" | "administrator" => Role::Administrator,
            "profesor" | "docente" | "teacher" => Role::Teacher,
            "estudiante" | "student" => Role::Student,
            _ => Role::Employee,
        }
    }

    /// Canonical stored form of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Director => "director",
            Role::Admin => "admin",
            Role::Administrator => "administrador",
            Role::Teacher => "profesor",
            Role::Student => "estudiante",
            Role::Employee => "empleado",
        }
    }

    /// Capability table: which roles may perform which privileged operations.
    ///
    /// Vacation approval and oversight additionally accept the
    /// "administrador" role; everything else is restricted to directors and
    /// admins.
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::CreateCourse
            | Capability::ManageEnrollments
            | Capability::AdministerContracts => {
                matches!(self, Role::Director | Role::Admin)
            }
            Capability::ApproveVacations | Capability::ViewAllVacations => {
                matches!(self, Role::Director | Role::Admin | Role::Administrator)
            }
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Role::parse(s)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Role::parse(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Role::parse("Director"), Role::Director);
        assert_eq!(Role::parse("ADMIN"), Role::Admin);
        assert_eq!(Role::parse("Administrador"), Role::Administrator);
    }

    #[test]
    fn unknown_roles_default_to_employee() {
        assert_eq!(Role::parse("intern"), Role::Employee);
        assert_eq!(Role::parse(""), Role::Employee);
    }

    #[test]
    fn capability_table_restricts_course_creation() {
        assert!(Role::Director.allows(Capability::CreateCourse));
        assert!(Role::Admin.allows(Capability::CreateCourse));
        assert!(!Role::Administrator.allows(Capability::CreateCourse));
        assert!(!Role::Teacher.allows(Capability::CreateCourse));
        assert!(!Role::Student.allows(Capability::CreateCourse));
    }

    #[test]
    fn administrator_may_approve_vacations_but_not_manage_contracts() {
        assert!(Role::Administrator.allows(Capability::ApproveVacations));
        assert!(Role::Administrator.allows(Capability::ViewAllVacations));
        assert!(!Role::Administrator.allows(Capability::AdministerContracts));
    }
}
