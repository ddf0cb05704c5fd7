//! Illustrative admin data shown only in demo mode.
//!
//! None of this is real. It is returned inside [`Fetched::Demo`](super::Fetched)
//! so every view labels it.

use chrono::{DateTime, Duration, Utc};

use super::models::{
    Application, CustomerInfo, ExportInfo, ExportsByLoanType, LoanStats, PredictionEnvelope,
    PredictionResult, StatsByLoanType,
};

fn stats(
    total: u64,
    completed: u64,
    approved: u64,
    partial: u64,
    average_amount: f64,
    average_interest: f64,
) -> LoanStats {
    LoanStats {
        total,
        completed,
        approved,
        partial,
        average_amount,
        average_interest,
    }
}

pub fn demo_stats() -> StatsByLoanType {
    [
        ("education", stats(15, 12, 8, 3, 250_000.0, 8.5)),
        ("home", stats(8, 6, 4, 1, 1_500_000.0, 7.2)),
        ("personal", stats(22, 18, 12, 4, 75_000.0, 12.5)),
        ("gold", stats(10, 8, 6, 2, 180_000.0, 9.8)),
        ("business", stats(5, 4, 3, 1, 800_000.0, 10.2)),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect()
}

fn application(
    session_id: &str,
    timestamp: DateTime<Utc>,
    name: &str,
    email: &str,
    phone: &str,
    amount: f64,
    rate: f64,
    status: &str,
) -> Application {
    Application {
        session_id: session_id.to_string(),
        timestamp: Some(timestamp.to_rfc3339()),
        customer_info: CustomerInfo {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            phone: Some(phone.to_string()),
            ..Default::default()
        },
        status: "completed".to_string(),
        prediction_result: Some(PredictionEnvelope {
            result: PredictionResult {
                status: status.to_string(),
                requested_amount: None,
                eligible_amount: Some(amount),
                approved_amount: Some(amount),
                interest_rate: Some(rate),
            },
        }),
    }
}

pub fn demo_applications(now: DateTime<Utc>) -> Vec<Application> {
    vec![
        application(
            "abc123def456",
            now,
            "John Doe",
            "john.doe@email.com",
            "9876543210",
            250_000.0,
            8.5,
            "APPROVED",
        ),
        application(
            "xyz789uvw012",
            now - Duration::days(1),
            "Jane Smith",
            "jane.smith@email.com",
            "9123456789",
            150_000.0,
            9.2,
            "PARTIAL_APPROVAL",
        ),
    ]
}

fn export(size: u64, modified: Option<DateTime<Utc>>, record_count: u64) -> ExportInfo {
    ExportInfo {
        exists: modified.is_some(),
        size,
        last_modified: modified.map(|ts| ts.to_rfc3339()),
        record_count,
    }
}

pub fn demo_exports(now: DateTime<Utc>) -> ExportsByLoanType {
    [
        ("education", export(15_420, Some(now), 12)),
        ("home", export(8_960, Some(now - Duration::days(1)), 6)),
        ("personal", export(22_340, Some(now - Duration::days(2)), 18)),
        ("gold", export(0, None, 0)),
        ("business", export(5_120, Some(now - Duration::days(3)), 4)),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect()
}
