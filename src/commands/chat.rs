//! Interactive chat loop with the loan eligibility assistant.

use crate::api::{BackendClient, Transport};
use crate::calculator::LoanType;
use crate::chat::{render_prediction, ChatSession};
use crate::formatting::OutputFormatter;
use crate::observability::{set_loan_type, set_operation, Operation};
use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const QUIT_COMMANDS: [&str; 2] = ["/quit", "/exit"];

/// Interactive conversation: one user message per input line.
///
/// `/status` shows collected and missing fields, `/quit` ends the session.
/// End of input also ends it.
pub async fn run_chat<T, R>(
    client: &BackendClient<T>,
    loan_type: LoanType,
    input: R,
    out: &mut dyn Write,
    fmt: &dyn OutputFormatter,
) -> Result<()>
where
    T: Transport,
    R: AsyncBufRead + Unpin,
{
    let _op = set_operation(Operation::Chat);
    let _loan = set_loan_type(loan_type);

    let mut session = ChatSession::start(client, loan_type)
        .await
        .context("Could not start a chat session. Make sure the backend server is running.")?;

    writeln!(
        out,
        "{}",
        fmt.header(&format!("{} Loan Assistant", loan_type.label()))
    )?;
    writeln!(out, "{}", fmt.dim("Type /status to review progress, /quit to leave."))?;
    writeln!(out)?;
    writeln!(out, "{}", session.greeting())?;

    let mut lines = input.lines();
    loop {
        write!(out, "{} ", fmt.bold(">"))?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        let message = line.trim();

        if message.is_empty() {
            continue;
        }
        if QUIT_COMMANDS.contains(&message) {
            break;
        }
        if message == "/status" {
            match session.status().await {
                Ok(info) => {
                    writeln!(out, "Collected: {}", join_or_none(&info.collected_fields))?;
                    writeln!(out, "Missing:   {}", join_or_none(&info.missing_fields))?;
                }
                Err(e) => writeln!(out, "{}", fmt.error(&format!("Could not fetch status: {}", e)))?,
            }
            continue;
        }

        match session.send(message).await {
            Ok(reply) => {
                writeln!(out, "{}", reply.message)?;
                if let Some(prediction) = &reply.prediction {
                    writeln!(out)?;
                    writeln!(out, "{}", render_prediction(loan_type, &prediction.result, fmt))?;
                }
            }
            Err(e) => {
                tracing::warn!("chat message failed: {}", e);
                writeln!(
                    out,
                    "{}",
                    fmt.error("Sorry, I encountered an error. Please try again.")
                )?;
            }
        }
    }

    if session.last_prediction().is_none() {
        writeln!(out, "{}", fmt.dim("Session ended before a decision was reached."))?;
    }
    Ok(())
}

fn join_or_none(fields: &[String]) -> String {
    if fields.is_empty() {
        "none".to_string()
    } else {
        fields.join(", ")
    }
}
