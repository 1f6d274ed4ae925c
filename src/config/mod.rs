//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ConverterConfig (validated, immutable)
//!     → shared via Arc with request handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ConverterConfig;
pub use schema::{LimitsConfig, ListenerConfig, MatchingConfig, ObservabilityConfig, TimeoutConfig};
pub use validation::ValidationError;
