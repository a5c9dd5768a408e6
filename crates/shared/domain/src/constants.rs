//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Password Hashing
// =============================================================================

/// Argon2id memory cost in KiB.
pub const ARGON2_MEMORY_KIB: u32 = 19_456;

/// Argon2id iteration count.
pub const ARGON2_ITERATIONS: u32 = 2;

/// Argon2id degree of parallelism.
pub const ARGON2_PARALLELISM: u32 = 1;

// =============================================================================
// Validation
// =============================================================================

/// Calendar date format accepted for ledger entries and range queries.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Minimum username length requirement
pub const MIN_USERNAME_LENGTH: usize = 1;

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 1;

// =============================================================================
// Money
// =============================================================================

/// Decimal places kept for amounts and balances (cents)
pub const MONEY_SCALE: u32 = 2;

/// Upper bound for a single amount and for each balance, in minor units
pub const MAX_BALANCE_MINOR_UNITS: i64 = 1_000_000_000_000_000;

// =============================================================================
// Authentication
// =============================================================================

/// Default token lifetime in hours
pub const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 12;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
