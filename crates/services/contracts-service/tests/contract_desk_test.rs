//! Contract desk tests with mocked store and directory.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use mockall::mock;
use uuid::Uuid;

use common::{AppError, AppResult};
use contracts_service_lib::service::ContractDesk;
use contracts_service_lib::store::{ContractPatch, ContractStore, NewContractRow};
use domain::{Contract, Role, Tenant, User};
use supabase_rest::TenantDirectory;

mock! {
    Store {}

    #[async_trait]
    impl ContractStore for Store {
        async fn list_contracts(&self) -> AppResult<Vec<Contract>>;
        async fn find_contract(&self, id: Uuid) -> AppResult<Option<Contract>>;
        async fn contracts_for_user(&self, user_id: Uuid) -> AppResult<Vec<Contract>>;
        async fn insert_contract(&self, row: NewContractRow) -> AppResult<Contract>;
        async fn update_contract(
            &self,
            id: Uuid,
            patch: ContractPatch,
        ) -> AppResult<Option<Contract>>;
        async fn delete_contract(&self, id: Uuid) -> AppResult<bool>;
        async fn count_active(&self) -> AppResult<i64>;
        async fn find_user(&self, id: Uuid) -> AppResult<Option<User>>;
        async fn list_users(&self) -> AppResult<Vec<User>>;
        async fn users_by_ids(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>>;
    }
}

mock! {
    Directory {}

    #[async_trait]
    impl TenantDirectory for Directory {
        async fn tenant_by_domain(&self, domain: &str) -> AppResult<Option<Tenant>>;
        async fn user_by_email(
            &self,
            email: &str,
            schema: Option<String>,
        ) -> AppResult<Option<User>>;
    }
}

const EMAIL: &str = "rrhh@acme.edu";

fn test_user(id: Uuid, role: Role) -> User {
    User {
        id,
        email: EMAIL.to_string(),
        first_name: "Rosa".to_string(),
        last_name: "Huanca".to_string(),
        role,
        position: Some("RRHH".to_string()),
        created_at: None,
    }
}

fn directory_resolving(user: User) -> MockDirectory {
    let mut directory = MockDirectory::new();
    directory.expect_tenant_by_domain().returning(|_| {
        Ok(Some(Tenant {
            id: Uuid::new_v4(),
            domain: "acme.edu".to_string(),
            schema_name: "acme".to_string(),
        }))
    });
    directory
        .expect_user_by_email()
        .returning(move |_, _| Ok(Some(user.clone())));
    directory
}

fn contract(user_id: Uuid) -> Contract {
    Contract {
        id: Uuid::new_v4(),
        user_id,
        start_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
        salary: 7500.0,
        probation_days: 30,
        active: true,
        created_at: Some(Utc::now()),
        updated_at: None,
    }
}

#[tokio::test]
async fn plain_employees_cannot_list_contracts() {
    let directory = directory_resolving(test_user(Uuid::new_v4(), Role::Employee));
    let desk = ContractDesk::new(Arc::new(MockStore::new()), Arc::new(directory));

    let err = desk.list(EMAIL).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn administrators_are_not_contract_administrators() {
    // Administrator covers vacation oversight, not contract administration
    let directory = directory_resolving(test_user(Uuid::new_v4(), Role::Administrator));
    let desk = ContractDesk::new(Arc::new(MockStore::new()), Arc::new(directory));

    let err = desk.list(EMAIL).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn listing_merges_employee_rows_by_id() {
    let admin_id = Uuid::new_v4();
    let known = Uuid::new_v4();
    let unknown = Uuid::new_v4();
    let directory = directory_resolving(test_user(admin_id, Role::Admin));

    let mut store = MockStore::new();
    store
        .expect_list_contracts()
        .returning(move || Ok(vec![contract(known), contract(unknown)]));
    store
        .expect_users_by_ids()
        .withf(move |ids| ids.contains(&known) && ids.contains(&unknown))
        .returning(move |_| Ok(vec![test_user(known, Role::Employee)]));

    let desk = ContractDesk::new(Arc::new(store), Arc::new(directory));
    let listing = desk.list(EMAIL).await.unwrap();
    assert_eq!(listing.len(), 2);

    let with_known = listing
        .iter()
        .find(|c| c.contract.user_id == known)
        .unwrap();
    assert!(with_known.employee.is_some());

    let with_unknown = listing
        .iter()
        .find(|c| c.contract.user_id == unknown)
        .unwrap();
    assert!(with_unknown.employee.is_none());
}

#[tokio::test]
async fn creation_requires_an_existing_employee() {
    let directory = directory_resolving(test_user(Uuid::new_v4(), Role::Director));

    let mut store = MockStore::new();
    store.expect_find_user().returning(|_| Ok(None));
    // no insert_contract expectation: the existence check must stop the call

    let desk = ContractDesk::new(Arc::new(store), Arc::new(directory));
    let row = NewContractRow {
        user_id: Uuid::new_v4(),
        start_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        salary: 6000.0,
        probation_days: 30,
        active: true,
    };
    let err = desk.create(EMAIL, row).await.unwrap_err();
    assert!(matches!(err, AppError::UserNotFound));
}

#[tokio::test]
async fn creation_inserts_once_the_employee_is_verified() {
    let employee_id = Uuid::new_v4();
    let directory = directory_resolving(test_user(Uuid::new_v4(), Role::Director));

    let mut store = MockStore::new();
    store
        .expect_find_user()
        .returning(move |id| Ok(Some(test_user(id, Role::Employee))));
    store
        .expect_insert_contract()
        .withf(move |row| row.user_id == employee_id && row.active)
        .returning(|row| {
            Ok(Contract {
                id: Uuid::new_v4(),
                user_id: row.user_id,
                start_date: row.start_date,
                salary: row.salary,
                probation_days: row.probation_days,
                active: row.active,
                created_at: Some(Utc::now()),
                updated_at: None,
            })
        });

    let desk = ContractDesk::new(Arc::new(store), Arc::new(directory));
    let row = NewContractRow {
        user_id: employee_id,
        start_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        salary: 6000.0,
        probation_days: 30,
        active: true,
    };
    let created = desk.create(EMAIL, row).await.unwrap();
    assert_eq!(created.user_id, employee_id);
}

#[tokio::test]
async fn empty_updates_are_rejected_before_hitting_the_store() {
    let directory = directory_resolving(test_user(Uuid::new_v4(), Role::Admin));
    let desk = ContractDesk::new(Arc::new(MockStore::new()), Arc::new(directory));

    let err = desk
        .update(EMAIL, Uuid::new_v4(), ContractPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn updating_a_missing_contract_is_not_found() {
    let directory = directory_resolving(test_user(Uuid::new_v4(), Role::Admin));

    let mut store = MockStore::new();
    store.expect_update_contract().returning(|_, _| Ok(None));

    let desk = ContractDesk::new(Arc::new(store), Arc::new(directory));
    let patch = ContractPatch {
        salary: Some(8000.0),
        ..ContractPatch::default()
    };
    let err = desk.update(EMAIL, Uuid::new_v4(), patch).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn deleting_a_missing_contract_is_not_found() {
    let directory = directory_resolving(test_user(Uuid::new_v4(), Role::Director));

    let mut store = MockStore::new();
    store.expect_delete_contract().returning(|_| Ok(false));

    let desk = ContractDesk::new(Arc::new(store), Arc::new(directory));
    let err = desk.remove(EMAIL, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn active_stats_reports_the_store_count() {
    let directory = directory_resolving(test_user(Uuid::new_v4(), Role::Admin));

    let mut store = MockStore::new();
    store.expect_count_active().returning(|| Ok(12));

    let desk = ContractDesk::new(Arc::new(store), Arc::new(directory));
    let stats = desk.active_stats(EMAIL).await.unwrap();
    assert_eq!(stats.total_active, 12);
}

#[tokio::test]
async fn directory_listing_is_gated_like_every_other_operation() {
    let directory = directory_resolving(test_user(Uuid::new_v4(), Role::Teacher));
    let desk = ContractDesk::new(Arc::new(MockStore::new()), Arc::new(directory));

    let err = desk.directory_users(EMAIL).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
}
