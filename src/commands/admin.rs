//! Admin dashboard commands: statistics, application listings and CSV exports.

use super::CommandContext;
use crate::admin::export_file_name;
use crate::api::demo::{demo_applications, demo_exports, demo_stats};
use crate::api::{fetch_or_demo, BackendClient, Transport};
use crate::calculator::LoanType;
use crate::formatting::format_file_size;
use crate::io::write_file;
use crate::observability::{set_loan_type, set_operation, Operation};
use anyhow::{Context, Result};
use chrono::Utc;
use std::io::Write;
use std::path::{Path, PathBuf};

const BACKEND_HINT: &str = "Make sure the backend server is running.";

pub async fn show_stats<T: Transport>(
    ctx: &CommandContext,
    client: &BackendClient<T>,
    out: &mut dyn Write,
) -> Result<()> {
    let _op = set_operation(Operation::AdminStats);
    let stats = fetch_or_demo(client.admin_stats(), ctx.config.api.demo_fallback, demo_stats)
        .await
        .with_context(|| format!("Failed to load statistics. {}", BACKEND_HINT))?;
    ctx.writer(out).write_stats(&stats)
}

pub async fn show_applications<T: Transport>(
    ctx: &CommandContext,
    client: &BackendClient<T>,
    loan_type: LoanType,
    limit: u32,
    out: &mut dyn Write,
) -> Result<()> {
    let _op = set_operation(Operation::AdminApplications);
    let _loan = set_loan_type(loan_type);
    let applications = fetch_or_demo(
        client.applications(loan_type, limit),
        ctx.config.api.demo_fallback,
        || demo_applications(Utc::now()),
    )
    .await
    .with_context(|| format!("Failed to load {} applications. {}", loan_type, BACKEND_HINT))?;
    ctx.writer(out).write_applications(loan_type, &applications)
}

pub async fn show_exports<T: Transport>(
    ctx: &CommandContext,
    client: &BackendClient<T>,
    out: &mut dyn Write,
) -> Result<()> {
    let _op = set_operation(Operation::AdminExports);
    let exports = fetch_or_demo(client.exports(), ctx.config.api.demo_fallback, || {
        demo_exports(Utc::now())
    })
    .await
    .with_context(|| format!("Failed to load export information. {}", BACKEND_HINT))?;
    ctx.writer(out).write_exports(&exports)
}

/// Download the CSV for `loan_type` into `output`, or
/// `<dir>/<type>_applications.csv` when no path is given.
///
/// Downloads never fall back to demo data.
pub async fn download_export<T: Transport>(
    ctx: &CommandContext,
    client: &BackendClient<T>,
    loan_type: LoanType,
    output: Option<PathBuf>,
    dir: &Path,
    out: &mut dyn Write,
) -> Result<PathBuf> {
    let _op = set_operation(Operation::ExportDownload);
    let _loan = set_loan_type(loan_type);
    let content = client
        .download_export(loan_type)
        .await
        .with_context(|| format!("Failed to download {} export", loan_type))?;

    let path = output.unwrap_or_else(|| dir.join(export_file_name(loan_type)));
    write_file(&path, &content)?;
    tracing::info!(path = %path.display(), bytes = content.len(), "export saved");

    let fmt = ctx.formatter();
    writeln!(
        out,
        "{}",
        fmt.success(&format!(
            "Saved {} ({}) to {}",
            export_file_name(loan_type),
            format_file_size(content.len() as u64),
            path.display()
        ))
    )?;
    Ok(path)
}

/// Regenerate the CSV for `loan_type`, then show refreshed export status.
pub async fn generate_report<T: Transport>(
    ctx: &CommandContext,
    client: &BackendClient<T>,
    loan_type: LoanType,
    out: &mut dyn Write,
) -> Result<()> {
    {
        let _op = set_operation(Operation::ReportGeneration);
        let _loan = set_loan_type(loan_type);
        let response = client
            .generate_report(loan_type)
            .await
            .with_context(|| format!("Failed to generate {} report", loan_type))?;
        tracing::debug!(%response, "report generated");

        let fmt = ctx.formatter();
        writeln!(
            out,
            "{}",
            fmt.success(&format!("Report generated for {} loans", loan_type.label()))
        )?;
    }
    show_exports(ctx, client, out).await
}
