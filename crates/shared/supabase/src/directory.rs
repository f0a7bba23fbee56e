//! Tenant and user directory lookups, plus the authorization gate.
//!
//! Every state-mutating operation (and every listing that exposes other
//! users' data) runs the same ordered gate before touching a table:
//! identify the tenant from the caller's email domain, fetch the tenant
//! metadata, fetch the caller's directory row, then check the capability
//! table. Tenant separation relies entirely on this resolution being
//! correct, since isolation is implemented by table-name prefixing alone.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Capability, Tenant, User};

use crate::client::{filter, Supabase, Tier};

#[cfg(test)]
use mockall::automock;

/// Email domain for tenant mapping: everything after the last `@`.
pub fn tenant_domain(email: &str) -> Option<&str> {
    match email.rsplit_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Some(domain),
        _ => None,
    }
}

/// Which user table the caller should be resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserScope {
    /// Platform-wide `usuarios` table (employment services)
    Platform,
    /// Tenant-prefixed `{schema}_usuarios` table (academic services)
    TenantSchema,
}

/// Directory lookups needed by the gate.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    /// Tenant metadata by email domain
    async fn tenant_by_domain(&self, domain: &str) -> AppResult<Option<Tenant>>;

    /// User row by email, in the platform table or a tenant schema
    async fn user_by_email(&self, email: &str, schema: Option<String>) -> AppResult<Option<User>>;
}

/// Directory backed by the data service.
pub struct SupabaseDirectory {
    db: Arc<Supabase>,
}

impl SupabaseDirectory {
    pub fn new(db: Arc<Supabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TenantDirectory for SupabaseDirectory {
    async fn tenant_by_domain(&self, domain: &str) -> AppResult<Option<Tenant>> {
        let mut tenants: Vec<Tenant> = self
            .db
            .select(
                Tier::Read,
                "tenants",
                &[
                    ("domain", filter::eq(domain)),
                    ("select", "*".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(tenants.pop())
    }

    async fn user_by_email(&self, email: &str, schema: Option<String>) -> AppResult<Option<User>> {
        let table = match schema {
            Some(schema) => format!("{schema}_usuarios"),
            None => "usuarios".to_string(),
        };
        let mut users: Vec<User> = self
            .db
            .select(
                Tier::Service,
                &table,
                &[
                    ("email", filter::eq(email)),
                    ("select", "*".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(users.pop())
    }
}

/// A caller resolved within their tenant.
#[derive(Debug, Clone)]
pub struct Membership {
    pub tenant: Tenant,
    pub user: User,
}

impl Membership {
    /// Check the capability table for the resolved role.
    pub fn require(&self, capability: Capability) -> AppResult<()> {
        if self.user.can(capability) {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }

    pub fn user_id(&self) -> Uuid {
        self.user.id
    }
}

/// Resolve tenant metadata only, for tenant-scoped listings that expose no
/// user data.
pub async fn resolve_tenant(directory: &dyn TenantDirectory, email: &str) -> AppResult<Tenant> {
    let domain = tenant_domain(email).ok_or(AppError::TenantNotIdentified)?;
    directory
        .tenant_by_domain(domain)
        .await?
        .ok_or(AppError::TenantNotFound)
}

/// The full gate, in order: tenant identification, tenant lookup, user
/// lookup. Callers follow up with [`Membership::require`] for privileged
/// operations.
pub async fn resolve_membership(
    directory: &dyn TenantDirectory,
    email: &str,
    scope: UserScope,
) -> AppResult<Membership> {
    let tenant = resolve_tenant(directory, email).await?;
    let schema = match scope {
        UserScope::Platform => None,
        UserScope::TenantSchema => Some(tenant.schema_name.clone()),
    };
    let user = directory
        .user_by_email(email, schema)
        .await?
        .ok_or(AppError::UserNotFound)?;
    Ok(Membership { tenant, user })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Role;

    fn tenant() -> Tenant {
        Tenant {
            id: Uuid::new_v4(),
            domain: "acme.edu".to_string(),
            schema_name: "acme".to_string(),
        }
    }

    fn user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            email: "ana@acme.edu".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Paredes".to_string(),
            role,
            position: None,
            created_at: None,
        }
    }

    #[test]
    fn domain_is_everything_after_the_at_sign() {
        assert_eq!(tenant_domain("ana@acme.edu"), Some("acme.edu"));
        assert_eq!(tenant_domain("no-at-sign"), None);
        assert_eq!(tenant_domain("@acme.edu"), None);
        assert_eq!(tenant_domain("ana@"), None);
    }

    #[tokio::test]
    async fn unknown_domain_fails_before_any_user_lookup() {
        let mut directory = MockTenantDirectory::new();
        directory
            .expect_tenant_by_domain()
            .withf(|domain| domain == "acme.edu")
            .returning(|_| Ok(None));
        // no user_by_email expectation: the gate must stop at the tenant

        let err = resolve_membership(&directory, "ana@acme.edu", UserScope::Platform)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::TenantNotFound));
    }

    #[tokio::test]
    async fn unresolvable_email_is_rejected_without_lookups() {
        let directory = MockTenantDirectory::new();
        let err = resolve_membership(&directory, "not-an-email", UserScope::Platform)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::TenantNotIdentified));
    }

    #[tokio::test]
    async fn tenant_schema_scope_resolves_against_prefixed_table() {
        let mut directory = MockTenantDirectory::new();
        directory
            .expect_tenant_by_domain()
            .returning(|_| Ok(Some(tenant())));
        directory
            .expect_user_by_email()
            .withf(|email, schema| email == "ana@acme.edu" && schema.as_deref() == Some("acme"))
            .returning(|_, _| Ok(Some(user(Role::Teacher))));

        let membership = resolve_membership(&directory, "ana@acme.edu", UserScope::TenantSchema)
            .await
            .unwrap();
        assert_eq!(membership.user.role, Role::Teacher);
    }

    #[tokio::test]
    async fn missing_directory_row_maps_to_user_not_found() {
        let mut directory = MockTenantDirectory::new();
        directory
            .expect_tenant_by_domain()
            .returning(|_| Ok(Some(tenant())));
        directory.expect_user_by_email().returning(|_, _| Ok(None));

        let err = resolve_membership(&directory, "ana@acme.edu", UserScope::Platform)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UserNotFound));
    }

    #[tokio::test]
    async fn capability_check_rejects_unprivileged_roles() {
        let membership = Membership {
            tenant: tenant(),
            user: user(Role::Student),
        };
        assert!(matches!(
            membership.require(Capability::CreateCourse).unwrap_err(),
            AppError::Forbidden
        ));

        let membership = Membership {
            tenant: tenant(),
            user: user(Role::Director),
        };
        assert!(membership.require(Capability::CreateCourse).is_ok());
    }
}
