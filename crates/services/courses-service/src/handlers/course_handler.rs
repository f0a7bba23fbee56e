//! Course and enrollment handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::{AppResult, ValidatedJson};
use domain::{Course, Enrollment};
use supabase_rest::CallerIdentity;

use crate::service::CourseRoster;
use crate::state::AppState;
use crate::store::{NewCourseRow, NewEnrollmentRow};

/// New course payload.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseRequest {
    #[serde(rename = "nombre")]
    #[validate(length(min = 1, message = "Course name cannot be empty"))]
    #[schema(example = "Algebra I")]
    pub name: String,
    #[serde(rename = "codigo")]
    #[validate(length(min = 1, message = "Course code cannot be empty"))]
    #[schema(example = "MAT-101")]
    pub code: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "creditos")]
    #[validate(range(min = 1, message = "Credits must be positive"))]
    #[schema(example = 4)]
    pub credits: i32,
    #[serde(rename = "horario")]
    #[schema(example = "Lun/Mie 08:00-10:00")]
    pub schedule: Option<String>,
}

impl From<CreateCourseRequest> for NewCourseRow {
    fn from(payload: CreateCourseRequest) -> Self {
        Self {
            name: payload.name,
            code: payload.code,
            description: payload.description,
            credits: payload.credits,
            schedule: payload.schedule,
        }
    }
}

/// New enrollment payload.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EnrollRequest {
    #[serde(rename = "curso_id")]
    pub course_id: i64,
    #[serde(rename = "usuario_id")]
    pub user_id: Uuid,
}

/// Create course routes (all require authentication).
pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route("/enroll", post(enroll))
        .route("/my-courses", get(my_courses))
        .route("/:course_id/enrollments", get(course_roster))
        .route("/enrollments/:id", delete(unenroll))
}

/// List the tenant's courses
#[utoipa::path(
    get,
    path = "/api/courses",
    tag = "Courses",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Courses ordered by name", body = Vec<Course>),
        (status = 400, description = "Tenant could not be identified"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Tenant not found")
    )
)]
pub async fn list_courses(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Course>>> {
    let courses = state.courses.list(&caller.email).await?;
    Ok(Json(courses))
}

/// Create a course (managing roles only)
#[utoipa::path(
    post,
    path = "/api/courses",
    tag = "Courses",
    security(("bearer_auth" = [])),
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Tenant or user not found")
    )
)]
pub async fn create_course(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCourseRequest>,
) -> AppResult<(StatusCode, Json<Course>)> {
    let course = state.courses.create(&caller.email, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// Enroll a user in a course (managing roles only)
#[utoipa::path(
    post,
    path = "/api/courses/enroll",
    tag = "Courses",
    security(("bearer_auth" = [])),
    request_body = EnrollRequest,
    responses(
        (status = 201, description = "Enrollment created", body = Enrollment),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Tenant or user not found")
    )
)]
pub async fn enroll(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<EnrollRequest>,
) -> AppResult<(StatusCode, Json<Enrollment>)> {
    let enrollment = state
        .courses
        .enroll(&caller.email, payload.course_id, payload.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

/// List the caller's enrolled courses
#[utoipa::path(
    get,
    path = "/api/courses/my-courses",
    tag = "Courses",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Courses the caller is enrolled in", body = Vec<Course>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Tenant or user not found")
    )
)]
pub async fn my_courses(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Course>>> {
    let courses = state.courses.my_courses(&caller.email).await?;
    Ok(Json(courses))
}

/// Get the roster of a course (managing roles only)
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/enrollments",
    tag = "Courses",
    security(("bearer_auth" = [])),
    params(
        ("course_id" = i64, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Enrollments with user data", body = CourseRoster),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Tenant or user not found")
    )
)]
pub async fn course_roster(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> AppResult<Json<CourseRoster>> {
    let roster = state.courses.roster(&caller.email, course_id).await?;
    Ok(Json(roster))
}

/// Remove an enrollment (managing roles only)
#[utoipa::path(
    delete,
    path = "/api/courses/enrollments/{id}",
    tag = "Courses",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Enrollment ID")
    ),
    responses(
        (status = 204, description = "Enrollment removed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Enrollment not found")
    )
)]
pub async fn unenroll(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.courses.unenroll(&caller.email, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
