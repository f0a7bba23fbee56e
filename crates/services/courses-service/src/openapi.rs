//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use domain::{Course, Enrollment, EnrollmentDetail};

use crate::handlers::course_handler::{CreateCourseRequest, EnrollRequest};
use crate::service::CourseRoster;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::course_handler::list_courses,
        crate::handlers::course_handler::create_course,
        crate::handlers::course_handler::enroll,
        crate::handlers::course_handler::my_courses,
        crate::handlers::course_handler::course_roster,
        crate::handlers::course_handler::unenroll,
    ),
    components(
        schemas(
            CreateCourseRequest,
            EnrollRequest,
            Course,
            Enrollment,
            EnrollmentDetail,
            CourseRoster,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Courses", description = "Course and enrollment endpoints"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
