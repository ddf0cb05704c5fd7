// Export modules for library usage
pub mod admin;
pub mod amount;
pub mod api;
pub mod calculator;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod observability;

// Re-export commonly used types
pub use crate::calculator::{
    compute_all, Calculation, Calculator, CalculatorInput, CalculatorResult, InputPolicy,
    LoanType, LoanTypeConfig,
};

pub use crate::api::{BackendClient, Fetched, HyperTransport, Transport};

pub use crate::chat::{render_prediction, ChatSession};

pub use crate::config::CogniConfig;

pub use crate::errors::{ApiError, CalculatorError, CogniError};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
