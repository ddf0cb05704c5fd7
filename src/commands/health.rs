//! Backend health check.

use super::CommandContext;
use crate::api::{BackendClient, Transport};
use crate::io::output::{loan_type_label, OutputFormat};
use crate::observability::{set_operation, Operation};
use anyhow::{Context, Result};
use serde_json::json;
use std::io::Write;

/// Report backend status and the loan types it advertises.
pub async fn check_health<T: Transport>(
    ctx: &CommandContext,
    client: &BackendClient<T>,
    out: &mut dyn Write,
) -> Result<()> {
    let _op = set_operation(Operation::HealthCheck);
    let base_url = ctx.config.base_url();

    let health = client
        .health()
        .await
        .with_context(|| format!("Backend at {} is not reachable", base_url))?;
    let loan_types = match client.loan_types().await {
        Ok(types) => Some(types),
        Err(e) => {
            tracing::warn!("could not list backend loan types: {}", e);
            None
        }
    };

    if ctx.format == OutputFormat::Json {
        let value = json!({
            "base_url": base_url,
            "health": health,
            "loan_types": loan_types,
        });
        serde_json::to_writer_pretty(&mut *out, &value)?;
        writeln!(out)?;
        return Ok(());
    }

    let fmt = ctx.formatter();
    let version = health
        .version
        .as_deref()
        .map(|v| format!(" (version {})", v))
        .unwrap_or_default();
    writeln!(
        out,
        "{} {}: {}{}",
        fmt.emoji("✅", "OK"),
        base_url,
        fmt.success(&health.status),
        version
    )?;

    if let Some(types) = loan_types {
        writeln!(out, "{}", fmt.header("Available loan types:"))?;
        for key in &types.available_types {
            match types.descriptions.get(key) {
                Some(description) => {
                    writeln!(out, "  - {}: {}", loan_type_label(key), description)?
                }
                None => writeln!(out, "  - {}", loan_type_label(key))?,
            }
        }
    }
    Ok(())
}
