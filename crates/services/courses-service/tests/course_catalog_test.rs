//! Course catalog tests with mocked store and directory.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use uuid::Uuid;

use common::{AppError, AppResult};
use courses_service_lib::service::CourseCatalog;
use courses_service_lib::store::{CourseStore, NewCourseRow, NewEnrollmentRow};
use domain::{Course, Enrollment, Role, Tenant, User};
use supabase_rest::TenantDirectory;

mock! {
    Store {}

    #[async_trait]
    impl CourseStore for Store {
        async fn list_courses(&self, table: String) -> AppResult<Vec<Course>>;
        async fn insert_course(&self, table: String, row: NewCourseRow) -> AppResult<Course>;
        async fn insert_enrollment(
            &self,
            table: String,
            row: NewEnrollmentRow,
        ) -> AppResult<Enrollment>;
        async fn enrollments_for_user(
            &self,
            table: String,
            user_id: Uuid,
        ) -> AppResult<Vec<Enrollment>>;
        async fn enrollments_for_course(
            &self,
            table: String,
            course_id: i64,
        ) -> AppResult<Vec<Enrollment>>;
        async fn courses_by_ids(&self, table: String, ids: Vec<i64>) -> AppResult<Vec<Course>>;
        async fn users_by_ids(&self, table: String, ids: Vec<Uuid>) -> AppResult<Vec<User>>;
        async fn delete_enrollment(&self, table: String, id: i64) -> AppResult<bool>;
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

const EMAIL: &str = "ana@acme.edu";

fn test_user(id: Uuid, role: Role) -> User {
    User {
        id,
        email: EMAIL.to_string(),
        first_name: "Ana".to_string(),
        last_name: "Paredes".to_string(),
        role,
        position: None,
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

fn course(id: i64, name: &str) -> Course {
    Course {
        id,
        name: name.to_string(),
        code: format!("C-{id}"),
        description: None,
        credits: 4,
        schedule: None,
        created_at: None,
    }
}

fn enrollment(id: i64, course_id: i64, user_id: Uuid) -> Enrollment {
    Enrollment {
        id,
        course_id,
        user_id,
        created_at: Some(Utc::now()),
    }
}

#[tokio::test]
async fn listing_queries_the_tenant_prefixed_table() {
    let mut directory = MockDirectory::new();
    directory.expect_tenant_by_domain().returning(|_| {
        Ok(Some(Tenant {
            id: Uuid::new_v4(),
            domain: "acme.edu".to_string(),
            schema_name: "acme".to_string(),
        }))
    });
    // listing resolves the tenant only, never the caller's user row

    let mut store = MockStore::new();
    store
        .expect_list_courses()
        .withf(|table| table == "acme_cursos")
        .returning(|_| Ok(vec![course(1, "Algebra"), course(2, "Biologia")]));

    let catalog = CourseCatalog::new(Arc::new(store), Arc::new(directory));
    let courses = catalog.list(EMAIL).await.unwrap();
    assert_eq!(courses.len(), 2);
}

#[tokio::test]
async fn listing_fails_for_unknown_tenants() {
    let mut directory = MockDirectory::new();
    directory.expect_tenant_by_domain().returning(|_| Ok(None));

    let catalog = CourseCatalog::new(Arc::new(MockStore::new()), Arc::new(directory));
    let err = catalog.list(EMAIL).await.unwrap_err();
    assert!(matches!(err, AppError::TenantNotFound));
}

#[tokio::test]
async fn students_cannot_create_courses() {
    let directory = directory_resolving(test_user(Uuid::new_v4(), Role::Student));
    let catalog = CourseCatalog::new(Arc::new(MockStore::new()), Arc::new(directory));

    let row = NewCourseRow {
        name: "Algebra".to_string(),
        code: "MAT-101".to_string(),
        description: None,
        credits: 4,
        schedule: None,
    };
    let err = catalog.create(EMAIL, row).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn directors_create_courses_in_their_tenant() {
    let directory = directory_resolving(test_user(Uuid::new_v4(), Role::Director));

    let mut store = MockStore::new();
    store
        .expect_insert_course()
        .withf(|table, row| table == "acme_cursos" && row.code == "MAT-101")
        .returning(|_, row| {
            Ok(Course {
                id: 7,
                name: row.name,
                code: row.code,
                description: row.description,
                credits: row.credits,
                schedule: row.schedule,
                created_at: Some(Utc::now()),
            })
        });

    let catalog = CourseCatalog::new(Arc::new(store), Arc::new(directory));
    let row = NewCourseRow {
        name: "Algebra".to_string(),
        code: "MAT-101".to_string(),
        description: Some("Linear equations".to_string()),
        credits: 4,
        schedule: None,
    };
    let created = catalog.create(EMAIL, row).await.unwrap();
    assert_eq!(created.id, 7);
}

#[tokio::test]
async fn my_courses_resolves_enrollments_then_courses() {
    let user_id = Uuid::new_v4();
    let directory = directory_resolving(test_user(user_id, Role::Student));

    let mut store = MockStore::new();
    store
        .expect_enrollments_for_user()
        .withf(move |table, id| table == "acme_inscripciones" && *id == user_id)
        .returning(move |_, id| Ok(vec![enrollment(1, 10, id), enrollment(2, 20, id)]));
    store
        .expect_courses_by_ids()
        .withf(|table, ids| table == "acme_cursos" && ids == &[10, 20])
        .returning(|_, _| Ok(vec![course(10, "Algebra"), course(20, "Biologia")]));

    let catalog = CourseCatalog::new(Arc::new(store), Arc::new(directory));
    let courses = catalog.my_courses(EMAIL).await.unwrap();
    assert_eq!(courses.len(), 2);
}

#[tokio::test]
async fn roster_merges_users_and_drops_orphaned_enrollments() {
    let admin_id = Uuid::new_v4();
    let known = Uuid::new_v4();
    let orphan = Uuid::new_v4();
    let directory = directory_resolving(test_user(admin_id, Role::Admin));

    let mut store = MockStore::new();
    store
        .expect_enrollments_for_course()
        .withf(|table, course_id| table == "acme_inscripciones" && *course_id == 10)
        .returning(move |_, _| Ok(vec![enrollment(1, 10, known), enrollment(2, 10, orphan)]));
    store
        .expect_users_by_ids()
        .withf(|table, _| table == "acme_usuarios")
        .returning(move |_, _| Ok(vec![test_user(known, Role::Student)]));

    let catalog = CourseCatalog::new(Arc::new(store), Arc::new(directory));
    let roster = catalog.roster(EMAIL, 10).await.unwrap();
    assert_eq!(roster.course_id, 10);
    assert_eq!(roster.total, 1);
    assert_eq!(roster.enrolled[0].user_id, known);
}

#[tokio::test]
async fn teachers_cannot_view_rosters() {
    let directory = directory_resolving(test_user(Uuid::new_v4(), Role::Teacher));
    let catalog = CourseCatalog::new(Arc::new(MockStore::new()), Arc::new(directory));

    let err = catalog.roster(EMAIL, 10).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn removing_a_missing_enrollment_is_not_found() {
    let directory = directory_resolving(test_user(Uuid::new_v4(), Role::Director));

    let mut store = MockStore::new();
    store.expect_delete_enrollment().returning(|_, _| Ok(false));

    let catalog = CourseCatalog::new(Arc::new(store), Arc::new(directory));
    let err = catalog.unenroll(EMAIL, 99).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}
