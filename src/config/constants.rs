//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Environment
// =============================================================================

/// Default deployment environment (selects the human log formatter)
pub const DEFAULT_APP_ENV: &str = "local";

/// Environments that emit JSON logs
pub const JSON_LOG_ENVS: &[&str] = &["dev", "prod"];

// =============================================================================
// Authentication & Security
// =============================================================================

/// Secret used in debug builds when JWT_SECRET is unset
pub const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8443;

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 4;

/// Default CORS origin list (comma-separated)
pub const DEFAULT_CORS_ALLOWED_ORIGINS: &str = "http://localhost:63342";

/// CORS preflight cache duration
pub const CORS_MAX_AGE_SECS: u64 = 300;

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (for development)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://tbank.db?mode=rwc";

// =============================================================================
// Advice provider
// =============================================================================

/// Default generative model used for advice
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// REST endpoint root of the generative language API
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Upper bound on a single advice request
pub const ADVICE_REQUEST_TIMEOUT_SECS: u64 = 30;
