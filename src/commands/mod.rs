//! CLI command implementations.
//!
//! - **calc** / **loan-types**: local calculator and catalog, no network
//! - **chat**: interactive eligibility conversation with the backend
//! - **admin**: statistics, applications, exports, downloads, report generation
//! - **health**: backend reachability and advertised loan types
//! - **init**: write a default `.cognibank.toml`
//!
//! Commands write to a caller-supplied `Write` so they can be exercised
//! against a buffer in tests.

pub mod admin;
pub mod calc;
pub mod chat;
pub mod health;
pub mod init;

pub use admin::{
    download_export, generate_report, show_applications, show_exports, show_stats,
};
pub use calc::{build_input, run_calc, show_loan_types, CalcArgs};
pub use chat::run_chat;
pub use health::check_health;
pub use init::{init_config, init_config_in, DEFAULT_CONFIG_TOML};

use crate::config::CogniConfig;
use crate::formatting::{ColoredFormatter, FormattingConfig, OutputFormatter, PlainFormatter};
use crate::io::output::{create_writer, OutputFormat, OutputWriter, TerminalWriter};
use std::io::Write;

/// Settings shared by every command after global flags are resolved.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: CogniConfig,
    pub format: OutputFormat,
    pub formatting: FormattingConfig,
    pub plain: bool,
}

impl CommandContext {
    /// `format` falls back to the configured default; `plain` disables all styling.
    pub fn new(config: CogniConfig, format: Option<OutputFormat>, plain: bool) -> Self {
        let format = format.unwrap_or(config.output.default_format);
        let formatting = if plain {
            FormattingConfig::plain()
        } else {
            FormattingConfig::from_env()
        };
        Self {
            config,
            format,
            formatting,
            plain,
        }
    }

    pub fn writer<'a>(&self, out: &'a mut dyn Write) -> Box<dyn OutputWriter + 'a> {
        if self.plain && self.format == OutputFormat::Terminal {
            Box::new(TerminalWriter::plain(out))
        } else {
            create_writer(self.format, out, self.formatting)
        }
    }

    pub fn formatter(&self) -> Box<dyn OutputFormatter> {
        if self.plain {
            Box::new(PlainFormatter)
        } else {
            Box::new(ColoredFormatter::new(self.formatting))
        }
    }
}
