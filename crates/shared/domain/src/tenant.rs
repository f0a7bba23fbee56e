//! Tenant entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An isolated customer/organization partition.
///
/// Provisioned out of band; this system only ever reads tenants. The
/// `schema_name` is the table-name prefix that implements tenant isolation
/// for the academic tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    /// Email domain that maps callers to this tenant
    pub domain: String,
    pub schema_name: String,
}

impl Tenant {
    /// Table name for a tenant-scoped entity, e.g. `acme_cursos`.
    pub fn table(&self, entity: &str) -> String {
        format!("{}_{}", self.schema_name, entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_tables_with_schema_name() {
        let tenant = Tenant {
            id: Uuid::new_v4(),
            domain: "acme.edu".to_string(),
            schema_name: "acme".to_string(),
        };
        assert_eq!(tenant.table("cursos"), "acme_cursos");
        assert_eq!(tenant.table("inscripciones"), "acme_inscripciones");
    }
}
