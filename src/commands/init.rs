//! Write a default `.cognibank.toml` to the current directory.

use crate::config::CONFIG_FILE_NAME;
use crate::io;
use crate::observability::{set_operation, Operation};
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_TOML: &str = r#"# CogniBank Configuration

[api]
# Overridden by --api-url, COGNIBANK_API_URL or NEXT_PUBLIC_API_URL
base_url = "http://localhost:8001"
timeout_seconds = 30
# Show labeled demo data in admin views when the backend is unreachable
demo_fallback = false

[retry]
enabled = true
max_retries = 3
base_delay_ms = 100
strategy = "exponential"
timeout_seconds = 30
jitter_factor = 0.1

[calculator]
input_policy = "clamp"
default_loan_type = "home"
default_credit_score = 750
default_tenure_years = 5

[output]
default_format = "terminal"
"#;

pub fn init_config(force: bool) -> Result<()> {
    let path = init_config_in(&std::env::current_dir()?, force)?;
    println!("Created {} configuration file", path.display());
    Ok(())
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let _op = set_operation(Operation::Init);
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG_TOML.as_bytes())?;
    Ok(config_path)
}
