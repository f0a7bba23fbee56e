//! Row access for the courses service.
//!
//! Every method takes a full table name (`{schema}_cursos`,
//! `{schema}_inscripciones`, `{schema}_usuarios`); the service layer derives
//! those from the resolved tenant. The trait exists so the catalog can be
//! tested without a live data service.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Course, Enrollment, User};
use supabase_rest::{filter, Supabase, Tier};

/// Insert payload for a new course.
#[derive(Debug, Clone, Serialize)]
pub struct NewCourseRow {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "creditos")]
    pub credits: i32,
    #[serde(rename = "horario", skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

/// Insert payload for a new enrollment.
#[derive(Debug, Clone, Serialize)]
pub struct NewEnrollmentRow {
    #[serde(rename = "curso_id")]
    pub course_id: i64,
    #[serde(rename = "usuario_id")]
    pub user_id: Uuid,
}

/// Persistence operations needed by the course catalog.
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// All courses in a tenant, ordered by name
    async fn list_courses(&self, table: String) -> AppResult<Vec<Course>>;

    async fn insert_course(&self, table: String, row: NewCourseRow) -> AppResult<Course>;

    async fn insert_enrollment(&self, table: String, row: NewEnrollmentRow)
        -> AppResult<Enrollment>;

    async fn enrollments_for_user(&self, table: String, user_id: Uuid)
        -> AppResult<Vec<Enrollment>>;

    async fn enrollments_for_course(
        &self,
        table: String,
        course_id: i64,
    ) -> AppResult<Vec<Enrollment>>;

    async fn courses_by_ids(&self, table: String, ids: Vec<i64>) -> AppResult<Vec<Course>>;

    /// Tenant user rows for the roster join
    async fn users_by_ids(&self, table: String, ids: Vec<Uuid>) -> AppResult<Vec<User>>;

    /// Delete one enrollment; returns whether a row was actually deleted
    async fn delete_enrollment(&self, table: String, id: i64) -> AppResult<bool>;
}

/// Store backed by the hosted data service.
pub struct SupabaseCourseStore {
    db: Arc<Supabase>,
}

impl SupabaseCourseStore {
    pub fn new(db: Arc<Supabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseStore for SupabaseCourseStore {
    async fn list_courses(&self, table: String) -> AppResult<Vec<Course>> {
        self.db
            .select(
                Tier::Read,
                &table,
                &[
                    ("select", "*".to_string()),
                    ("order", filter::asc("nombre")),
                ],
            )
            .await
    }

    async fn insert_course(&self, table: String, row: NewCourseRow) -> AppResult<Course> {
        let mut rows: Vec<Course> = self.db.insert(&table, &row).await?;
        rows.pop()
            .ok_or_else(|| AppError::internal("insert returned no representation"))
    }

    async fn insert_enrollment(
        &self,
        table: String,
        row: NewEnrollmentRow,
    ) -> AppResult<Enrollment> {
        let mut rows: Vec<Enrollment> = self.db.insert(&table, &row).await?;
        rows.pop()
            .ok_or_else(|| AppError::internal("insert returned no representation"))
    }

    async fn enrollments_for_user(
        &self,
        table: String,
        user_id: Uuid,
    ) -> AppResult<Vec<Enrollment>> {
        self.db
            .select(
                Tier::Read,
                &table,
                &[
                    ("usuario_id", filter::eq(user_id)),
                    ("select", "*".to_string()),
                ],
            )
            .await
    }

    async fn enrollments_for_course(
        &self,
        table: String,
        course_id: i64,
    ) -> AppResult<Vec<Enrollment>> {
        self.db
            .select(
                Tier::Read,
                &table,
                &[
                    ("curso_id", filter::eq(course_id)),
                    ("select", "*".to_string()),
                ],
            )
            .await
    }

    async fn courses_by_ids(&self, table: String, ids: Vec<i64>) -> AppResult<Vec<Course>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.db
            .select(
                Tier::Read,
                &table,
                &[("id", filter::one_of(ids)), ("select", "*".to_string())],
            )
            .await
    }

    async fn users_by_ids(&self, table: String, ids: Vec<Uuid>) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.db
            .select(
                Tier::Service,
                &table,
                &[
                    ("id", filter::one_of(ids)),
                    ("select", "id,nombre,apellido,email,rol".to_string()),
                ],
            )
            .await
    }

    async fn delete_enrollment(&self, table: String, id: i64) -> AppResult<bool> {
        let deleted: Vec<Enrollment> = self.db.delete(&table, &[("id", filter::eq(id))]).await?;
        Ok(!deleted.is_empty())
    }
}
