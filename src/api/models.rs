//! Wire types for the CogniBank backend.
//!
//! Fields the backend may omit are defaulted so older or newer servers still
//! decode; only the fields the views rely on are required.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct StartChatRequest<'a> {
    pub loan_type: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StartChatResponse {
    pub session_id: String,
    pub message: String,
    #[serde(default)]
    pub loan_type: Option<String>,
    #[serde(default)]
    pub required_fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageRequest<'a> {
    pub session_id: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default)]
    pub recorded: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub missing_fields: Vec<String>,
    #[serde(default)]
    pub prediction: Option<Prediction>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Prediction {
    pub result: PredictionResult,
    #[serde(default)]
    pub profile: serde_json::Value,
}

/// Backend decision for one application.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PredictionResult {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub requested_amount: Option<f64>,
    #[serde(default)]
    pub eligible_amount: Option<f64>,
    #[serde(default)]
    pub approved_amount: Option<f64>,
    #[serde(default)]
    pub interest_rate: Option<f64>,
}

impl PredictionResult {
    pub fn is_approved(&self) -> bool {
        self.status == "APPROVED"
    }

    /// Eligible amount, falling back to the approved amount, then zero.
    pub fn effective_eligible_amount(&self) -> f64 {
        self.eligible_amount
            .or(self.approved_amount)
            .unwrap_or(0.0)
    }
}

/// Aggregates for one loan type from `GET /admin/stats`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoanStats {
    pub total: u64,
    pub completed: u64,
    pub approved: u64,
    pub partial: u64,
    pub average_amount: f64,
    pub average_interest: f64,
}

/// Loan-type key → statistics.
pub type StatsByLoanType = BTreeMap<String, LoanStats>;

/// Applicant contact details. The backend may send either the full fields
/// or the sanitized `*_initial`/`*_domain`/`*_partial` forms.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CustomerInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_initial: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_partial: Option<String>,
}

impl CustomerInfo {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.name_initial.as_deref())
            .unwrap_or("N/A")
    }

    pub fn display_email(&self) -> &str {
        self.email
            .as_deref()
            .or(self.email_domain.as_deref())
            .unwrap_or("N/A")
    }

    pub fn display_phone(&self) -> &str {
        self.phone
            .as_deref()
            .or(self.phone_partial.as_deref())
            .unwrap_or("N/A")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PredictionEnvelope {
    #[serde(default)]
    pub result: PredictionResult,
}

/// One application record from `GET /admin/applications/{type}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Application {
    pub session_id: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub customer_info: CustomerInfo,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub prediction_result: Option<PredictionEnvelope>,
}

impl Application {
    pub fn prediction(&self) -> Option<&PredictionResult> {
        self.prediction_result.as_ref().map(|p| &p.result)
    }
}

/// Export file metadata from `GET /admin/exports`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportInfo {
    pub exists: bool,
    pub size: u64,
    #[serde(rename = "lastModified")]
    pub last_modified: Option<String>,
    #[serde(rename = "recordCount")]
    pub record_count: u64,
}

/// Loan-type key → export metadata.
pub type ExportsByLoanType = BTreeMap<String, ExportInfo>;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoanTypesResponse {
    pub available_types: Vec<String>,
    pub descriptions: BTreeMap<String, String>,
}

/// Progress of a chat session from `GET /session/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SessionInfo {
    pub session_id: String,
    pub loan_type: String,
    #[serde(default)]
    pub required_fields: Vec<String>,
    #[serde(default)]
    pub collected_fields: Vec<String>,
    #[serde(default)]
    pub missing_fields: Vec<String>,
    #[serde(default)]
    pub created_at: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_message_response_with_prediction() {
        let response: MessageResponse = serde_json::from_str(indoc! {r#"
            {
              "message": "Thanks, here is your result.",
              "prediction": {
                "result": {
                  "status": "PARTIAL_APPROVAL",
                  "requested_amount": 800000,
                  "eligible_amount": 600000.0,
                  "interest_rate": 9.5
                },
                "profile": {"income": 50000}
              }
            }
        "#})
        .unwrap();

        let result = response.prediction.unwrap().result;
        assert!(!result.is_approved());
        assert_eq!(result.requested_amount, Some(800_000.0));
        assert_eq!(result.effective_eligible_amount(), 600_000.0);
        assert!(response.missing_fields.is_empty());
    }

    #[test]
    fn test_message_response_without_prediction() {
        let response: MessageResponse =
            serde_json::from_str(r#"{"message": "What is your income?", "missing_fields": ["income"]}"#)
                .unwrap();
        assert!(response.prediction.is_none());
        assert_eq!(response.missing_fields, vec!["income".to_string()]);
    }

    #[test]
    fn test_export_info_camel_case_fields() {
        let exports: ExportsByLoanType = serde_json::from_str(indoc! {r#"
            {
              "gold": {"exists": false, "size": 0, "lastModified": null, "recordCount": 0},
              "home": {"exists": true, "size": 8960, "lastModified": "2025-01-02T03:04:05Z", "recordCount": 6}
            }
        "#})
        .unwrap();

        assert_eq!(exports["home"].record_count, 6);
        assert_eq!(exports["home"].last_modified.as_deref(), Some("2025-01-02T03:04:05Z"));
        assert!(!exports["gold"].exists);
    }

    #[test]
    fn test_application_eligible_falls_back_to_approved() {
        let app: Application = serde_json::from_str(indoc! {r#"
            {
              "session_id": "abc",
              "status": "completed",
              "customer_info": {"name_initial": "Jo***", "email_domain": "email.com", "phone_partial": "***3210"},
              "prediction_result": {"result": {"status": "APPROVED", "approved_amount": 250000}}
            }
        "#})
        .unwrap();

        assert_eq!(app.prediction().unwrap().effective_eligible_amount(), 250_000.0);
        assert_eq!(app.customer_info.display_name(), "Jo***");
        assert_eq!(app.customer_info.display_phone(), "***3210");
        assert!(app.timestamp.is_none());
    }

    #[test]
    fn test_stats_missing_fields_default_to_zero() {
        let stats: StatsByLoanType = serde_json::from_str(r#"{"car": {"total": 2}}"#).unwrap();
        assert_eq!(stats["car"].total, 2);
        assert_eq!(stats["car"].approved, 0);
    }
}
