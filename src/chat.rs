//! Loan eligibility conversation with the backend.
//!
//! The backend drives the questions and makes the decision. A
//! [`ChatSession`] holds the session id, relays messages, and keeps the most
//! recent prediction so the caller can render it.

use crate::api::models::{Prediction, PredictionResult, SessionInfo};
use crate::api::{BackendClient, Transport};
use crate::calculator::LoanType;
use crate::errors::CogniError;
use crate::formatting::{rupees_f64, OutputFormatter};

/// Backend reply to one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub message: String,
    pub missing_fields: Vec<String>,
    pub prediction: Option<Prediction>,
}

pub struct ChatSession<'a, T: Transport> {
    client: &'a BackendClient<T>,
    loan_type: LoanType,
    session_id: String,
    greeting: String,
    last_prediction: Option<Prediction>,
}

impl<'a, T: Transport> ChatSession<'a, T> {
    /// Open a session for `loan_type`; the backend's greeting is kept.
    pub async fn start(client: &'a BackendClient<T>, loan_type: LoanType) -> Result<Self, CogniError> {
        let response = client.start_chat(loan_type).await?;
        tracing::info!(session = %response.session_id, %loan_type, "chat session started");
        Ok(Self {
            client,
            loan_type,
            session_id: response.session_id,
            greeting: response.message,
            last_prediction: None,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn loan_type(&self) -> LoanType {
        self.loan_type
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub fn last_prediction(&self) -> Option<&Prediction> {
        self.last_prediction.as_ref()
    }

    /// Relay one user message. Blank messages are rejected without a request.
    pub async fn send(&mut self, message: &str) -> Result<ChatReply, CogniError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(CogniError::input("message must not be empty"));
        }

        let response = self.client.send_message(&self.session_id, message).await?;
        if let Some(prediction) = &response.prediction {
            tracing::info!(
                session = %self.session_id,
                status = %prediction.result.status,
                "received eligibility prediction"
            );
            self.last_prediction = Some(prediction.clone());
        }

        Ok(ChatReply {
            message: response.message,
            missing_fields: response.missing_fields,
            prediction: response.prediction,
        })
    }

    pub async fn status(&self) -> Result<SessionInfo, CogniError> {
        Ok(self.client.session_info(&self.session_id).await?)
    }
}

/// Summary shown to the applicant once the backend has decided.
///
/// `APPROVED` means the full requested amount is available; any other status
/// is presented as partial eligibility with requested vs approved amounts.
pub fn render_prediction(
    loan_type: LoanType,
    result: &PredictionResult,
    fmt: &dyn OutputFormatter,
) -> String {
    let rate = result
        .interest_rate
        .map(|r| format!("{}%", r))
        .unwrap_or_else(|| "N/A".to_string());
    let requested = rupees_f64(result.requested_amount.unwrap_or(0.0));
    let eligible = rupees_f64(result.effective_eligible_amount());
    let label = loan_type.label();

    let mut lines = Vec::new();
    if result.is_approved() {
        lines.push(fmt.success(&format!(
            "{} Great news! You're pre-approved for a {} Loan",
            fmt.emoji("🎉", "*"),
            label
        )));
        lines.push(String::new());
        lines.push(fmt.bold(&format!(
            "You are eligible for {} at {} per annum",
            requested, rate
        )));
        lines.push(String::new());
        lines.push(fmt.header("What's next:"));
        lines.push("  - Your loan application is pre-approved".to_string());
        lines.push(format!("  - Competitive interest rate of {} per annum", rate));
        lines.push("  - Our relationship manager will contact you within 24 hours".to_string());
    } else {
        lines.push(fmt.warning(&format!(
            "{} Good news! You're eligible for a {} Loan",
            fmt.emoji("💡", "*"),
            label
        )));
        lines.push(String::new());
        lines.push(fmt.bold(&format!("You can get up to {} at {} per annum", eligible, rate)));
        lines.push(String::new());
        lines.push(fmt.header("Application summary:"));
        lines.push(format!("  - Requested amount: {}", requested));
        lines.push(format!("  - Approved amount:  {}", eligible));
        lines.push(format!("  - Interest rate:    {} per annum", rate));
        lines.push(String::new());
        lines.push("The offer is valid for 30 days; you may reapply for a higher amount after 6 months.".to_string());
        lines.push("Our team will contact you within 24 hours to proceed.".to_string());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::PlainFormatter;

    fn result(status: &str) -> PredictionResult {
        PredictionResult {
            status: status.to_string(),
            requested_amount: Some(800_000.0),
            eligible_amount: Some(600_000.0),
            approved_amount: None,
            interest_rate: Some(9.5),
        }
    }

    #[test]
    fn test_render_approved_shows_requested_amount() {
        let text = render_prediction(LoanType::Home, &result("APPROVED"), &PlainFormatter);
        assert!(text.starts_with("* Great news! You're pre-approved for a Home Loan"));
        assert!(text.contains("eligible for ₹8,00,000 at 9.5% per annum"));
        assert!(!text.contains("6,00,000"));
    }

    #[test]
    fn test_render_partial_shows_both_amounts() {
        let text = render_prediction(LoanType::Education, &result("PARTIAL_APPROVAL"), &PlainFormatter);
        assert!(text.contains("Education Loan"));
        assert!(text.contains("up to ₹6,00,000 at 9.5% per annum"));
        assert!(text.contains("Requested amount: ₹8,00,000"));
    }

    #[test]
    fn test_render_missing_rate() {
        let mut partial = result("REJECTED");
        partial.interest_rate = None;
        let text = render_prediction(LoanType::Gold, &partial, &PlainFormatter);
        assert!(text.contains("at N/A per annum"));
    }
}
