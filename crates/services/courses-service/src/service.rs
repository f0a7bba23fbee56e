//! Course catalog - business logic over the store and the directory.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Capability, Course, Enrollment, EnrollmentDetail, Tenant};
use supabase_rest::{
    resolve_membership, resolve_tenant, Membership, TenantDirectory, UserScope,
};

use crate::store::{CourseStore, NewCourseRow, NewEnrollmentRow};

/// Roster of one course, with the enrolled users merged in.
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseRoster {
    #[serde(rename = "curso_id")]
    pub course_id: i64,
    pub total: usize,
    #[serde(rename = "inscritos")]
    pub enrolled: Vec<EnrollmentDetail>,
}

/// Tenant-scoped course and enrollment operations.
pub struct CourseCatalog {
    store: Arc<dyn CourseStore>,
    directory: Arc<dyn TenantDirectory>,
}

impl CourseCatalog {
    pub fn new(store: Arc<dyn CourseStore>, directory: Arc<dyn TenantDirectory>) -> Self {
        Self { store, directory }
    }

    /// Resolve the caller against their tenant's user table.
    async fn member(&self, email: &str) -> AppResult<Membership> {
        resolve_membership(self.directory.as_ref(), email, UserScope::TenantSchema).await
    }

    /// Tenant course list. Only the tenant needs to resolve; the caller does
    /// not need a directory row to browse courses.
    pub async fn list(&self, email: &str) -> AppResult<Vec<Course>> {
        let tenant = resolve_tenant(self.directory.as_ref(), email).await?;
        self.store.list_courses(tenant.table("cursos")).await
    }

    pub async fn create(&self, email: &str, row: NewCourseRow) -> AppResult<Course> {
        let member = self.member(email).await?;
        member.require(Capability::CreateCourse)?;
        self.store
            .insert_course(courses_table(&member.tenant), row)
            .await
    }

    pub async fn enroll(&self, email: &str, course_id: i64, user_id: Uuid) -> AppResult<Enrollment> {
        let member = self.member(email).await?;
        member.require(Capability::ManageEnrollments)?;
        self.store
            .insert_enrollment(
                enrollments_table(&member.tenant),
                NewEnrollmentRow { course_id, user_id },
            )
            .await
    }

    /// Courses the caller is enrolled in: one enrollment fetch, then one
    /// bulk course fetch.
    pub async fn my_courses(&self, email: &str) -> AppResult<Vec<Course>> {
        let member = self.member(email).await?;
        let enrollments = self
            .store
            .enrollments_for_user(enrollments_table(&member.tenant), member.user_id())
            .await?;
        let ids: Vec<i64> = enrollments.iter().map(|e| e.course_id).collect();
        self.store
            .courses_by_ids(courses_table(&member.tenant), ids)
            .await
    }

    /// Roster of one course, merged with the tenant user table via a bulk
    /// fetch and a hash index. Enrollments whose user row is gone are
    /// dropped from the answer.
    pub async fn roster(&self, email: &str, course_id: i64) -> AppResult<CourseRoster> {
        let member = self.member(email).await?;
        member.require(Capability::ManageEnrollments)?;

        let enrollments = self
            .store
            .enrollments_for_course(enrollments_table(&member.tenant), course_id)
            .await?;
        let mut ids: Vec<Uuid> = enrollments.iter().map(|e| e.user_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let users = self
            .store
            .users_by_ids(member.tenant.table("usuarios"), ids)
            .await?;
        let by_id: HashMap<Uuid, _> = users.into_iter().map(|u| (u.id, u)).collect();

        let enrolled: Vec<EnrollmentDetail> = enrollments
            .into_iter()
            .filter_map(|enrollment| {
                by_id.get(&enrollment.user_id).map(|user| EnrollmentDetail {
                    enrollment_id: enrollment.id,
                    user_id: user.id,
                    first_name: user.first_name.clone(),
                    last_name: user.last_name.clone(),
                    email: user.email.clone(),
                    role: user.role,
                    enrolled_at: enrollment.created_at,
                })
            })
            .collect();

        Ok(CourseRoster {
            course_id,
            total: enrolled.len(),
            enrolled,
        })
    }

    pub async fn unenroll(&self, email: &str, enrollment_id: i64) -> AppResult<()> {
        let member = self.member(email).await?;
        member.require(Capability::ManageEnrollments)?;
        if self
            .store
            .delete_enrollment(enrollments_table(&member.tenant), enrollment_id)
            .await?
        {
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }
}

fn courses_table(tenant: &Tenant) -> String {
    tenant.table("cursos")
}

fn enrollments_table(tenant: &Tenant) -> String {
    tenant.table("inscripciones")
}
