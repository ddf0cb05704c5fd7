use crate::admin::{application_status, approval_rate, ApplicationStatus, StatsSummary};
use crate::api::models::{Application, ExportsByLoanType, StatsByLoanType};
use crate::api::Fetched;
use crate::calculator::{Calculation, LoanType};
use crate::formatting::{
    format_file_size, format_timestamp, rupees, rupees_f64, ColoredFormatter, FormattingConfig,
    OutputFormatter, PlainFormatter,
};
use chrono::Local;
use comfy_table::presets::{ASCII_FULL, UTF8_FULL_CONDENSED};
use comfy_table::Table;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Write;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Markdown,
}

pub trait OutputWriter {
    fn write_calculation(&mut self, calculation: &Calculation) -> anyhow::Result<()>;
    fn write_catalog(&mut self) -> anyhow::Result<()>;
    fn write_stats(&mut self, stats: &Fetched<StatsByLoanType>) -> anyhow::Result<()>;
    fn write_applications(
        &mut self,
        loan_type: LoanType,
        applications: &Fetched<Vec<Application>>,
    ) -> anyhow::Result<()>;
    fn write_exports(&mut self, exports: &Fetched<ExportsByLoanType>) -> anyhow::Result<()>;
}

/// Display label for a backend loan-type key; unknown keys pass through.
pub fn loan_type_label(key: &str) -> String {
    key.parse::<LoanType>()
        .map(LoanType::label)
        .unwrap_or_else(|_| key.to_string())
}

fn short_session(session_id: &str) -> String {
    match session_id.char_indices().nth(8) {
        Some((idx, _)) => format!("{}...", &session_id[..idx]),
        None => session_id.to_string(),
    }
}

fn rate_text(rate: Option<f64>) -> String {
    rate.map(|r| format!("{}%", r)).unwrap_or_else(|| "N/A".to_string())
}

fn source_json<T: Serialize>(fetched: &Fetched<T>, data: serde_json::Value) -> serde_json::Value {
    match fetched {
        Fetched::Live { fetched_at, .. } => json!({
            "source": "live",
            "last_updated": fetched_at.to_rfc3339(),
            "data": data,
        }),
        Fetched::Demo { reason, .. } => json!({
            "source": "demo",
            "demo_reason": reason,
            "data": data,
        }),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn emit(&mut self, value: &serde_json::Value) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, value)?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_calculation(&mut self, calculation: &Calculation) -> anyhow::Result<()> {
        let value = serde_json::to_value(calculation)?;
        self.emit(&value)
    }

    fn write_catalog(&mut self) -> anyhow::Result<()> {
        let entries: Vec<_> = LoanType::ALL
            .iter()
            .map(|loan_type| {
                json!({
                    "key": loan_type.key(),
                    "config": loan_type.config(),
                })
            })
            .collect();
        self.emit(&json!(entries))
    }

    fn write_stats(&mut self, stats: &Fetched<StatsByLoanType>) -> anyhow::Result<()> {
        let rates: serde_json::Map<String, serde_json::Value> = stats
            .data()
            .iter()
            .map(|(key, s)| (key.clone(), json!(approval_rate(s))))
            .collect();
        let data = json!({
            "summary": StatsSummary::from_stats(stats.data()),
            "approval_rates": rates,
            "by_loan_type": stats.data(),
        });
        let value = source_json(stats, data);
        self.emit(&value)
    }

    fn write_applications(
        &mut self,
        loan_type: LoanType,
        applications: &Fetched<Vec<Application>>,
    ) -> anyhow::Result<()> {
        let data = json!({
            "loan_type": loan_type,
            "applications": applications.data(),
        });
        let value = source_json(applications, data);
        self.emit(&value)
    }

    fn write_exports(&mut self, exports: &Fetched<ExportsByLoanType>) -> anyhow::Result<()> {
        let value = source_json(exports, json!(exports.data()));
        self.emit(&value)
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_source_note<T>(&mut self, fetched: &Fetched<T>) -> anyhow::Result<()> {
        match fetched {
            Fetched::Live { fetched_at, .. } => writeln!(
                self.writer,
                "_Last updated: {}_",
                fetched_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
            )?,
            Fetched::Demo { reason, .. } => writeln!(
                self.writer,
                "> **DEMO DATA**: backend unavailable ({}). Figures are illustrative.",
                reason
            )?,
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_calculation(&mut self, calculation: &Calculation) -> anyhow::Result<()> {
        let input = &calculation.input;
        let result = &calculation.result;
        writeln!(self.writer, "# {} Estimate", calculation.config.name)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Item | Value |")?;
        writeln!(self.writer, "|------|-------|")?;
        let rows = [
            ("Requested amount", rupees(input.requested_amount)),
            ("Credit score", input.credit_score.to_string()),
            ("Tenure", format!("{} years", input.tenure_years)),
            ("Interest rate", format!("{}% p.a.", result.interest_rate)),
            ("Eligible amount", rupees(result.eligible_amount)),
            ("Monthly EMI", rupees(result.monthly_payment)),
            ("Total payment", rupees(result.total_payment)),
            ("Total interest", rupees(result.total_interest)),
        ];
        for (label, value) in rows {
            writeln!(self.writer, "| {} | {} |", label, value)?;
        }
        if !calculation.adjustments.is_empty() {
            writeln!(self.writer)?;
            writeln!(self.writer, "## Adjusted Inputs")?;
            writeln!(self.writer)?;
            for adjustment in &calculation.adjustments {
                writeln!(self.writer, "- {}", adjustment)?;
            }
        }
        Ok(())
    }

    fn write_catalog(&mut self) -> anyhow::Result<()> {
        writeln!(self.writer, "# Loan Types")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Loan | Key | Amount Range | Rate Range | Base Rate |")?;
        writeln!(self.writer, "|------|-----|--------------|------------|-----------|")?;
        for loan_type in LoanType::ALL {
            let config = loan_type.config();
            writeln!(
                self.writer,
                "| {} | `{}` | {} - {} | {}% - {}% | {}% |",
                config.name,
                loan_type.key(),
                rupees(config.min_amount),
                rupees(config.max_amount),
                config.min_rate,
                config.max_rate,
                config.base_rate
            )?;
        }
        Ok(())
    }

    fn write_stats(&mut self, stats: &Fetched<StatsByLoanType>) -> anyhow::Result<()> {
        let summary = StatsSummary::from_stats(stats.data());
        writeln!(self.writer, "# Application Statistics")?;
        writeln!(self.writer)?;
        self.write_source_note(stats)?;
        writeln!(
            self.writer,
            "- Total applications: {}\n- Completed: {}\n- Approved: {}",
            summary.total_applications, summary.total_completed, summary.total_approved
        )?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Loan Type | Total | Completed | Approved | Partial | Approval Rate | Avg Amount | Avg Interest |"
        )?;
        writeln!(
            self.writer,
            "|-----------|-------|-----------|----------|---------|---------------|------------|--------------|"
        )?;
        for (key, s) in stats.data() {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} | {:.1}% | {} | {:.1}% |",
                loan_type_label(key),
                s.total,
                s.completed,
                s.approved,
                s.partial,
                approval_rate(s),
                rupees_f64(s.average_amount),
                s.average_interest
            )?;
        }
        Ok(())
    }

    fn write_applications(
        &mut self,
        loan_type: LoanType,
        applications: &Fetched<Vec<Application>>,
    ) -> anyhow::Result<()> {
        writeln!(self.writer, "# {} Loan Applications", loan_type.label())?;
        writeln!(self.writer)?;
        self.write_source_note(applications)?;
        if applications.data().is_empty() {
            writeln!(self.writer, "No applications found.")?;
            return Ok(());
        }
        writeln!(self.writer, "| Session | Date | Name | Email | Phone | Status | Amount | Rate |")?;
        writeln!(self.writer, "|---------|------|------|-------|-------|--------|--------|------|")?;
        for app in applications.data() {
            let prediction = app.prediction().cloned().unwrap_or_default();
            writeln!(
                self.writer,
                "| `{}` | {} | {} | {} | {} | {} | {} | {} |",
                short_session(&app.session_id),
                format_timestamp(app.timestamp.as_deref()),
                app.customer_info.display_name(),
                app.customer_info.display_email(),
                app.customer_info.display_phone(),
                status_text(app),
                rupees_f64(prediction.effective_eligible_amount()),
                rate_text(prediction.interest_rate)
            )?;
        }
        Ok(())
    }

    fn write_exports(&mut self, exports: &Fetched<ExportsByLoanType>) -> anyhow::Result<()> {
        writeln!(self.writer, "# CSV Exports")?;
        writeln!(self.writer)?;
        self.write_source_note(exports)?;
        writeln!(self.writer, "| Loan Type | Status | Records | Size | Last Modified |")?;
        writeln!(self.writer, "|-----------|--------|---------|------|---------------|")?;
        for (key, info) in exports.data() {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} |",
                loan_type_label(key),
                if info.exists { "Available" } else { "Not generated" },
                info.record_count,
                format_file_size(info.size),
                format_timestamp(info.last_modified.as_deref())
            )?;
        }
        Ok(())
    }
}

fn status_text(app: &Application) -> String {
    app.prediction()
        .map(|p| p.status.clone())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| app.status.clone())
}

/// Human-oriented output with tables and color.
pub struct TerminalWriter<W: Write> {
    writer: W,
    formatter: Box<dyn OutputFormatter>,
    unicode: bool,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, config: FormattingConfig) -> Self {
        Self {
            writer,
            unicode: config.emoji.should_use_emoji(),
            formatter: Box::new(ColoredFormatter::new(config)),
        }
    }

    /// ASCII tables and no styling.
    pub fn plain(writer: W) -> Self {
        Self {
            writer,
            formatter: Box::new(PlainFormatter),
            unicode: false,
        }
    }

    fn table(&self, header: Vec<&str>) -> Table {
        let mut table = Table::new();
        table.load_preset(if self.unicode { UTF8_FULL_CONDENSED } else { ASCII_FULL });
        table.set_header(header);
        table
    }

    fn write_source_banner<T>(&mut self, fetched: &Fetched<T>) -> anyhow::Result<()> {
        match fetched {
            Fetched::Live { .. } => {}
            Fetched::Demo { reason, .. } => {
                let banner = format!(
                    "{} DEMO DATA: backend unavailable ({}). Figures below are illustrative.",
                    self.formatter.emoji("⚠️", "!"),
                    reason
                );
                writeln!(self.writer, "{}", self.formatter.warning(&banner))?;
                writeln!(self.writer)?;
            }
        }
        Ok(())
    }

    fn write_last_updated<T>(&mut self, fetched: &Fetched<T>) -> anyhow::Result<()> {
        if let Some(ts) = fetched.last_updated() {
            let line = format!(
                "Last updated: {}",
                ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
            );
            writeln!(self.writer, "{}", self.formatter.dim(&line))?;
        }
        Ok(())
    }

    fn paint_status(&self, app: &Application) -> String {
        let text = status_text(app);
        match application_status(app) {
            status if status.is_positive() => self.formatter.success(&text),
            ApplicationStatus::PartialApproval => self.formatter.warning(&text),
            ApplicationStatus::Rejected => self.formatter.error(&text),
            _ => text,
        }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_calculation(&mut self, calculation: &Calculation) -> anyhow::Result<()> {
        let input = &calculation.input;
        let result = &calculation.result;
        let config = &calculation.config;

        let title = format!("{} {}", self.formatter.emoji("🏦", "#"), config.name);
        writeln!(self.writer, "{}", self.formatter.header(&title))?;

        let mut table = self.table(vec!["Item", "Value"]);
        table.add_row(vec!["Requested amount".to_string(), rupees(input.requested_amount)]);
        table.add_row(vec!["Credit score".to_string(), input.credit_score.to_string()]);
        table.add_row(vec!["Tenure".to_string(), format!("{} years", input.tenure_years)]);
        table.add_row(vec![
            "Interest rate".to_string(),
            format!("{}% p.a.", result.interest_rate),
        ]);
        table.add_row(vec!["Eligible amount".to_string(), rupees(result.eligible_amount)]);
        table.add_row(vec!["Monthly EMI".to_string(), rupees(result.monthly_payment)]);
        table.add_row(vec!["Total payment".to_string(), rupees(result.total_payment)]);
        table.add_row(vec!["Total interest".to_string(), rupees(result.total_interest)]);
        writeln!(self.writer, "{table}")?;

        writeln!(
            self.writer,
            "{}",
            self.formatter.dim(&format!(
                "Amount range {} - {}, rates {}% - {}% p.a.",
                rupees(config.min_amount),
                rupees(config.max_amount),
                config.min_rate,
                config.max_rate
            ))
        )?;

        if result.eligible_amount < input.requested_amount {
            writeln!(
                self.writer,
                "{}",
                self.formatter.warning(&format!(
                    "Eligible amount is below the requested {} at this credit score",
                    rupees(input.requested_amount)
                ))
            )?;
        }
        for adjustment in &calculation.adjustments {
            let line = format!("Note: {}", adjustment);
            writeln!(self.writer, "{}", self.formatter.warning(&line))?;
        }
        Ok(())
    }

    fn write_catalog(&mut self) -> anyhow::Result<()> {
        let mut table = self.table(vec!["Loan", "Key", "Amount Range", "Rate Range", "Base Rate"]);
        for loan_type in LoanType::ALL {
            let config = loan_type.config();
            table.add_row(vec![
                config.name.to_string(),
                loan_type.key().to_string(),
                format!("{} - {}", rupees(config.min_amount), rupees(config.max_amount)),
                format!("{}% - {}%", config.min_rate, config.max_rate),
                format!("{}%", config.base_rate),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn write_stats(&mut self, stats: &Fetched<StatsByLoanType>) -> anyhow::Result<()> {
        self.write_source_banner(stats)?;
        let summary = StatsSummary::from_stats(stats.data());
        writeln!(self.writer, "{}", self.formatter.header("Application Statistics"))?;
        writeln!(
            self.writer,
            "Total applications: {}   Completed: {}   Approved: {}",
            self.formatter.bold(&summary.total_applications.to_string()),
            self.formatter.bold(&summary.total_completed.to_string()),
            self.formatter.success(&summary.total_approved.to_string())
        )?;

        let mut table = self.table(vec![
            "Loan Type",
            "Total",
            "Completed",
            "Approved",
            "Partial",
            "Approval Rate",
            "Avg Amount",
            "Avg Interest",
        ]);
        for (key, s) in stats.data() {
            table.add_row(vec![
                loan_type_label(key),
                s.total.to_string(),
                s.completed.to_string(),
                s.approved.to_string(),
                s.partial.to_string(),
                format!("{:.1}%", approval_rate(s)),
                rupees_f64(s.average_amount),
                format!("{:.1}%", s.average_interest),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        self.write_last_updated(stats)
    }

    fn write_applications(
        &mut self,
        loan_type: LoanType,
        applications: &Fetched<Vec<Application>>,
    ) -> anyhow::Result<()> {
        self.write_source_banner(applications)?;
        let title = format!("{} Loan Applications", loan_type.label());
        writeln!(self.writer, "{}", self.formatter.header(&title))?;

        if applications.data().is_empty() {
            writeln!(
                self.writer,
                "No applications found for {} loans",
                loan_type.label()
            )?;
            return self.write_last_updated(applications);
        }

        let mut table = self.table(vec![
            "Session", "Date", "Name", "Email", "Phone", "Status", "Amount", "Rate",
        ]);
        for app in applications.data() {
            let prediction = app.prediction().cloned().unwrap_or_default();
            table.add_row(vec![
                short_session(&app.session_id),
                format_timestamp(app.timestamp.as_deref()),
                app.customer_info.display_name().to_string(),
                app.customer_info.display_email().to_string(),
                app.customer_info.display_phone().to_string(),
                self.paint_status(app),
                rupees_f64(prediction.effective_eligible_amount()),
                rate_text(prediction.interest_rate),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        self.write_last_updated(applications)
    }

    fn write_exports(&mut self, exports: &Fetched<ExportsByLoanType>) -> anyhow::Result<()> {
        self.write_source_banner(exports)?;
        writeln!(self.writer, "{}", self.formatter.header("CSV Exports"))?;
        let mut table = self.table(vec!["Loan Type", "Status", "Records", "Size", "Last Modified"]);
        for (key, info) in exports.data() {
            let status = if info.exists {
                self.formatter.success("Available")
            } else {
                self.formatter.dim("Not generated")
            };
            table.add_row(vec![
                loan_type_label(key),
                status,
                info.record_count.to_string(),
                format_file_size(info.size),
                format_timestamp(info.last_modified.as_deref()),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        self.write_last_updated(exports)
    }
}

pub fn create_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    writer: W,
    formatting: FormattingConfig,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, formatting)),
    }
}
