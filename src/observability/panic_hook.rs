//! Structured crash report printed when the CLI panics.
//!
//! The report names the version, the panic message and location, and the
//! operation and loan type that were in flight.

use super::context::{get_current_context, OperationContext};
use std::panic::PanicHookInfo;
use tracing::Span;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const WIDTH: usize = 78;

pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        print_crash_report(info);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>) {
    let context = get_current_context();
    let report = crash_report(
        &extract_panic_message(info),
        info.location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column())),
        &context,
        Span::current().metadata().map(|m| m.name()),
    );
    eprintln!();
    eprintln!("{}", report);
}

fn line(text: &str) -> String {
    format!("║  {:<width$}║", truncate(text, WIDTH - 2), width = WIDTH - 2)
}

fn rule(left: char, right: char) -> String {
    format!("{}{}{}", left, "═".repeat(WIDTH), right)
}

fn crash_report(
    message: &str,
    location: Option<String>,
    context: &OperationContext,
    span: Option<&str>,
) -> String {
    let mut out = vec![
        rule('╔', '╗'),
        line("COGNIBANK CRASH REPORT"),
        rule('╠', '╣'),
        line(&format!("Version: {}", VERSION)),
        line(&format!("Platform: {}", std::env::consts::OS)),
        line(&format!(
            "Time: {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )),
        rule('╠', '╣'),
        line(&format!("PANIC: {}", message)),
    ];
    if let Some(location) = location {
        out.push(line(&format!("Location: {}", location)));
    }

    out.push(rule('╠', '╣'));
    out.push(line("OPERATION CONTEXT:"));
    match context.operation {
        Some(op) => out.push(line(&format!("  Operation: {}", op))),
        None => out.push(line("  Operation: (not set - crash occurred during startup)")),
    }
    if let Some(loan_type) = context.loan_type {
        out.push(line(&format!("  Loan type: {}", loan_type)));
    }
    if let Some(span) = span {
        out.push(line(&format!("  Span: {}", span)));
    }

    out.push(rule('╠', '╣'));
    let backtrace = std::env::var("RUST_BACKTRACE").is_ok();
    if backtrace {
        out.push(line("STACK TRACE:"));
    } else {
        out.push(line("Run with RUST_BACKTRACE=1 for stack trace"));
    }
    out.push(rule('╚', '╝'));
    if backtrace {
        out.push(String::new());
        out.push(std::backtrace::Backtrace::capture().to_string());
    }
    out.join("\n")
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
