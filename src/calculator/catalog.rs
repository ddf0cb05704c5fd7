//! Static loan product catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Loan category offered by the bank.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LoanType {
    Home,
    Car,
    Business,
    Gold,
    Personal,
    Education,
}

impl LoanType {
    /// Every loan type, in catalog order.
    pub const ALL: [LoanType; 6] = [
        LoanType::Home,
        LoanType::Car,
        LoanType::Business,
        LoanType::Gold,
        LoanType::Personal,
        LoanType::Education,
    ];

    /// Key used on the wire and in config files.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Car => "car",
            Self::Business => "business",
            Self::Gold => "gold",
            Self::Personal => "personal",
            Self::Education => "education",
        }
    }

    pub const fn config(self) -> &'static LoanTypeConfig {
        match self {
            Self::Home => &HOME,
            Self::Car => &CAR,
            Self::Business => &BUSINESS,
            Self::Gold => &GOLD,
            Self::Personal => &PERSONAL,
            Self::Education => &EDUCATION,
        }
    }

    /// Capitalized short label, e.g. "Home" for use in "Home Loan".
    pub fn label(self) -> String {
        let key = self.key();
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for LoanType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        LoanType::ALL
            .into_iter()
            .find(|loan_type| loan_type.key() == wanted)
            .ok_or_else(|| {
                let keys: Vec<_> = LoanType::ALL.iter().map(|t| t.key()).collect();
                format!("unknown loan type '{}' (expected one of: {})", s, keys.join(", "))
            })
    }
}

/// Amount bounds and rate band for one loan type.
///
/// `base_rate` is informational: the rate formula only reads
/// `min_rate`/`max_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanTypeConfig {
    pub name: &'static str,
    pub min_amount: u64,
    pub max_amount: u64,
    pub base_rate: f64,
    pub min_rate: f64,
    pub max_rate: f64,
}

impl LoanTypeConfig {
    /// Clamp a requested principal into this type's bounds.
    pub fn clamp_amount(&self, amount: u64) -> u64 {
        amount.clamp(self.min_amount, self.max_amount)
    }

    pub fn contains_amount(&self, amount: u64) -> bool {
        (self.min_amount..=self.max_amount).contains(&amount)
    }
}

const HOME: LoanTypeConfig = LoanTypeConfig {
    name: "Home Loan",
    min_amount: 500_000,
    max_amount: 10_000_000,
    base_rate: 8.5,
    min_rate: 7.0,
    max_rate: 14.0,
};

const CAR: LoanTypeConfig = LoanTypeConfig {
    name: "Car Loan",
    min_amount: 100_000,
    max_amount: 2_000_000,
    base_rate: 12.0,
    min_rate: 9.0,
    max_rate: 24.0,
};

const BUSINESS: LoanTypeConfig = LoanTypeConfig {
    name: "Business Loan",
    min_amount: 100_000,
    max_amount: 5_000_000,
    base_rate: 15.0,
    min_rate: 10.0,
    max_rate: 26.0,
};

const GOLD: LoanTypeConfig = LoanTypeConfig {
    name: "Gold Loan",
    min_amount: 50_000,
    max_amount: 1_000_000,
    base_rate: 12.0,
    min_rate: 8.0,
    max_rate: 18.0,
};

const PERSONAL: LoanTypeConfig = LoanTypeConfig {
    name: "Personal Loan",
    min_amount: 50_000,
    max_amount: 2_000_000,
    base_rate: 12.0,
    min_rate: 7.0,
    max_rate: 15.0,
};

const EDUCATION: LoanTypeConfig = LoanTypeConfig {
    name: "Education Loan",
    min_amount: 50_000,
    max_amount: 1_000_000,
    base_rate: 10.0,
    min_rate: 7.0,
    max_rate: 18.0,
};
