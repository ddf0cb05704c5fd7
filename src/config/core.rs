use serde::{Deserialize, Serialize};

use super::retry::RetryConfig;
use crate::calculator::{
    InputPolicy, LoanType, DEFAULT_CREDIT_SCORE, DEFAULT_TENURE_YEARS, MAX_CREDIT_SCORE,
    MAX_TENURE_YEARS, MIN_CREDIT_SCORE, MIN_TENURE_YEARS,
};
use crate::errors::CogniError;
use crate::io::output::OutputFormat;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";

/// Root configuration structure for cognibank
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CogniConfig {
    pub api: ApiConfig,
    pub retry: RetryConfig,
    pub calculator: CalculatorConfig,
    pub output: OutputConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-request timeout
    pub timeout_seconds: u64,
    /// Substitute labeled demo data when an admin fetch fails
    pub demo_fallback: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 30,
            demo_fallback: false,
        }
    }
}

/// Calculator defaults used when the CLI omits a value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub input_policy: InputPolicy,
    pub default_loan_type: LoanType,
    pub default_credit_score: u32,
    pub default_tenure_years: u32,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            input_policy: InputPolicy::Clamp,
            default_loan_type: LoanType::Home,
            default_credit_score: DEFAULT_CREDIT_SCORE,
            default_tenure_years: DEFAULT_TENURE_YEARS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub default_format: OutputFormat,
}

impl CogniConfig {
    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), CogniError> {
        let base_url = self.api.base_url.trim();
        if !base_url.starts_with("http://") {
            return Err(CogniError::config(format!(
                "api.base_url must be an http:// URL, got '{}'",
                self.api.base_url
            )));
        }
        if self.api.timeout_seconds == 0 {
            return Err(CogniError::config("api.timeout_seconds must be positive"));
        }
        if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&self.calculator.default_credit_score) {
            return Err(CogniError::config(format!(
                "calculator.default_credit_score must be within [{}, {}]",
                MIN_CREDIT_SCORE, MAX_CREDIT_SCORE
            )));
        }
        if !(MIN_TENURE_YEARS..=MAX_TENURE_YEARS).contains(&self.calculator.default_tenure_years) {
            return Err(CogniError::config(format!(
                "calculator.default_tenure_years must be within [{}, {}]",
                MIN_TENURE_YEARS, MAX_TENURE_YEARS
            )));
        }
        self.retry.validate().map_err(CogniError::config)
    }

    /// Base URL without a trailing slash, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim().trim_end_matches('/')
    }
}
