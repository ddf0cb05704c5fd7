//! Configuration for cognibank.
//!
//! Settings come from `.cognibank.toml` (searched upward from the working
//! directory, then in the per-user config directory), environment overrides
//! for the backend URL, and finally CLI flags.

mod core;
mod loader;
pub mod retry;

pub use self::core::{ApiConfig, CalculatorConfig, CogniConfig, OutputConfig, DEFAULT_BASE_URL};
pub use loader::{
    apply_env_overrides, directory_ancestors, load_config, load_config_from,
    parse_and_validate_config, resolve_config, user_config_path, BASE_URL_ENV_VARS,
    CONFIG_FILE_NAME,
};
pub use retry::{RetryConfig, RetryStrategy};
