//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use domain::{Contract, ContractWithEmployee, EmployeeSummary};

use crate::handlers::contract_handler::{CreateContractRequest, UpdateContractRequest};
use crate::handlers::user_handler::DirectoryUser;
use crate::service::ActiveContractStats;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::contract_handler::list_contracts,
        crate::handlers::contract_handler::get_contract,
        crate::handlers::contract_handler::contract_history,
        crate::handlers::contract_handler::create_contract,
        crate::handlers::contract_handler::update_contract,
        crate::handlers::contract_handler::delete_contract,
        crate::handlers::contract_handler::active_stats,
        crate::handlers::user_handler::list_users,
    ),
    components(
        schemas(
            CreateContractRequest,
            UpdateContractRequest,
            Contract,
            ContractWithEmployee,
            EmployeeSummary,
            ActiveContractStats,
            DirectoryUser,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Contracts", description = "Employment contract endpoints"),
        (name = "Users", description = "Platform user directory"),
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
