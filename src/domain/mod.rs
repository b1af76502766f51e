// ============================================================================
// Domain Module
// Configuration value objects and their validation
// ============================================================================

pub mod config;

pub use config::{CalculatorConfig, ConfigError, DEFAULT_MAX_TERMS_CACHE, MIN_ROOT};
