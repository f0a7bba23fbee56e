//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use domain::{EmployeeSummary, VacationRequest, VacationStatus, VacationWithEmployee};

use crate::handlers::vacation_handler::{
    CreateVacationRequest, DecisionRequest, ProfileResponse,
};
use crate::service::{BalanceReport, EligibilityReport};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::vacation_handler::me,
        crate::handlers::vacation_handler::eligibility,
        crate::handlers::vacation_handler::balance,
        crate::handlers::vacation_handler::submit_request,
        crate::handlers::vacation_handler::my_vacations,
        crate::handlers::vacation_handler::all_vacations,
        crate::handlers::vacation_handler::decide,
        crate::handlers::vacation_handler::withdraw,
    ),
    components(
        schemas(
            ProfileResponse,
            CreateVacationRequest,
            DecisionRequest,
            EligibilityReport,
            BalanceReport,
            VacationRequest,
            VacationStatus,
            VacationWithEmployee,
            EmployeeSummary,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Vacations", description = "Vacation request endpoints"),
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
