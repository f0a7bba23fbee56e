//! Domain-level constants.
//!
//! These constants define the vacation accrual policy and validation limits.

// =============================================================================
// Vacation policy
// =============================================================================

/// Vacation days accrued per completed year of service
pub const VACATION_DAYS_PER_YEAR: i64 = 15;

/// Maximum days allowed in a single vacation request (inclusive span)
pub const MAX_DAYS_PER_REQUEST: i64 = 15;

/// Minimum completed years of service to be eligible for vacations
pub const MIN_YEARS_OF_SERVICE: i64 = 1;

/// Days counted as one year of service (no leap-year adjustment)
pub const DAYS_PER_SERVICE_YEAR: i64 = 365;

// =============================================================================
// Management year ("gestión")
// =============================================================================

/// Lowest accepted management year
pub const MIN_GESTION: i32 = 2020;

/// Highest accepted management year
pub const MAX_GESTION: i32 = 2100;

// =============================================================================
// Contracts
// =============================================================================

/// Default probation period length in days for new contracts
pub const DEFAULT_PROBATION_DAYS: i32 = 30;
