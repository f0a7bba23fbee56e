//! Domain layer - Core business entities and the vacation policy engine.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! All types here are shared across the microservices.

pub mod constants;
pub mod contract;
pub mod course;
pub mod error;
pub mod policy;
pub mod role;
pub mod tenant;
pub mod user;
pub mod vacation;

pub use constants::*;
pub use contract::{Contract, ContractWithEmployee};
pub use course::{Course, Enrollment, EnrollmentDetail};
pub use error::{DomainError, DomainResult};
pub use policy::{is_eligible, requested_days, validate_request, years_of_service, VacationBalance};
pub use role::{Capability, Role};
pub use tenant::Tenant;
pub use user::{EmployeeSummary, User};
pub use vacation::{VacationRequest, VacationStatus, VacationWithEmployee};
