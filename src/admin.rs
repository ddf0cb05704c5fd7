//! Admin dashboard aggregation.
//!
//! Pure helpers over the backend's admin payloads: dashboard totals,
//! approval rates, and application status classification.

use serde::Serialize;

use crate::api::models::{Application, LoanStats, StatsByLoanType};
use crate::calculator::LoanType;

/// Totals across every loan type in a stats payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSummary {
    pub total_applications: u64,
    pub total_completed: u64,
    pub total_approved: u64,
}

impl StatsSummary {
    pub fn from_stats(stats: &StatsByLoanType) -> Self {
        stats.values().fold(Self::default(), |acc, s| Self {
            total_applications: acc.total_applications + s.total,
            total_completed: acc.total_completed + s.completed,
            total_approved: acc.total_approved + s.approved,
        })
    }
}

/// Share of completed applications that were fully approved, in percent.
pub fn approval_rate(stats: &LoanStats) -> f64 {
    if stats.completed == 0 {
        return 0.0;
    }
    stats.approved as f64 / stats.completed as f64 * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Approved,
    PartialApproval,
    Rejected,
    Completed,
    Other,
}

impl ApplicationStatus {
    /// Classify a free-form backend status string.
    pub fn classify(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            "approved" => Self::Approved,
            "partial approval" | "partial_approval" => Self::PartialApproval,
            "rejected" => Self::Rejected,
            "completed" => Self::Completed,
            _ => Self::Other,
        }
    }

    /// Favorable outcomes render green, partial ones yellow, rejections red.
    pub fn is_positive(self) -> bool {
        matches!(self, Self::Approved | Self::Completed)
    }
}

/// Status shown for an application: the decision when one exists, else the
/// session status.
pub fn application_status(app: &Application) -> ApplicationStatus {
    match app.prediction() {
        Some(result) if !result.status.is_empty() => ApplicationStatus::classify(&result.status),
        _ => ApplicationStatus::classify(&app.status),
    }
}

/// Default download name for an export, e.g. `home_applications.csv`.
pub fn export_file_name(loan_type: LoanType) -> String {
    format!("{}_applications.csv", loan_type.key())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::demo::{demo_applications, demo_stats};
    use chrono::Utc;

    #[test]
    fn test_summary_totals() {
        let summary = StatsSummary::from_stats(&demo_stats());
        assert_eq!(
            summary,
            StatsSummary {
                total_applications: 60,
                total_completed: 48,
                total_approved: 33,
            }
        );
    }

    #[test]
    fn test_summary_of_empty_stats() {
        assert_eq!(
            StatsSummary::from_stats(&StatsByLoanType::new()),
            StatsSummary::default()
        );
    }

    #[test]
    fn test_approval_rate_guards_zero_completed() {
        let empty = LoanStats::default();
        assert_eq!(approval_rate(&empty), 0.0);

        let stats = LoanStats {
            total: 8,
            completed: 6,
            approved: 3,
            ..Default::default()
        };
        assert_eq!(approval_rate(&stats), 50.0);
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(ApplicationStatus::classify("APPROVED"), ApplicationStatus::Approved);
        assert_eq!(
            ApplicationStatus::classify("Partial Approval"),
            ApplicationStatus::PartialApproval
        );
        assert_eq!(
            ApplicationStatus::classify("PARTIAL_APPROVAL"),
            ApplicationStatus::PartialApproval
        );
        assert_eq!(ApplicationStatus::classify("rejected"), ApplicationStatus::Rejected);
        assert_eq!(ApplicationStatus::classify("in_progress"), ApplicationStatus::Other);
    }

    #[test]
    fn test_application_status_prefers_decision() {
        let apps = demo_applications(Utc::now());
        assert_eq!(application_status(&apps[0]), ApplicationStatus::Approved);
        assert_eq!(application_status(&apps[1]), ApplicationStatus::PartialApproval);
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(LoanType::Gold), "gold_applications.csv");
    }
}
