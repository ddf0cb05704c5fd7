use crate::amount::parse_amount_arg;
use crate::api::DEFAULT_APPLICATION_LIMIT;
use crate::calculator::{InputPolicy, LoanType};
use crate::io::output::OutputFormat;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cognibank")]
#[command(about = "Loan EMI calculator and CogniBank backend client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Backend base URL (overrides COGNIBANK_API_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Show clearly labeled demo data when the backend is unreachable
    #[arg(long, global = true)]
    pub demo: bool,

    /// Plain output: no colors, no emoji, ASCII tables
    #[arg(long, global = true)]
    pub plain: bool,

    /// Output format (defaults to [output].default_format)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate interest rate, eligible amount and EMI for a loan
    Calc {
        /// Loan type (defaults to [calculator].default_loan_type)
        #[arg(short = 't', long = "type", value_enum)]
        loan_type: Option<LoanType>,

        /// Requested amount in rupees; accepts 5l, 1.2cr, 50k, 5,00,000
        #[arg(short, long, value_parser = parse_amount_arg)]
        amount: Option<u64>,

        /// Credit score (300-900)
        #[arg(short = 's', long)]
        credit_score: Option<u32>,

        /// Tenure in years (1-30)
        #[arg(short = 'y', long)]
        tenure: Option<u32>,

        /// How out-of-range input is handled
        #[arg(long, value_enum)]
        policy: Option<InputPolicy>,
    },

    /// List loan types with amount ranges and rate bands
    LoanTypes,

    /// Chat with the loan eligibility assistant
    Chat {
        /// Loan type to apply for
        #[arg(value_enum)]
        loan_type: LoanType,
    },

    /// Admin dashboard: statistics, applications and CSV exports
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },

    /// Check that the backend is reachable
    Health,

    /// Write a default .cognibank.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Application statistics per loan type
    Stats,

    /// Recent applications for one loan type
    Applications {
        #[arg(value_enum)]
        loan_type: LoanType,

        /// Maximum number of applications to list
        #[arg(short, long, default_value_t = DEFAULT_APPLICATION_LIMIT)]
        limit: u32,
    },

    /// Export file status per loan type
    Exports,

    /// Download the CSV export for a loan type
    Export {
        #[arg(value_enum)]
        loan_type: LoanType,

        /// Destination file (defaults to <type>_applications.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Regenerate the CSV export for a loan type
    GenerateReport {
        #[arg(value_enum)]
        loan_type: LoanType,
    },
}
