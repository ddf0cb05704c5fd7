mod common;

use cognibank::calculator::LoanType;
use cognibank::commands::{
    download_export, generate_report, run_chat, show_applications, show_stats, CommandContext,
};
use cognibank::config::CogniConfig;
use cognibank::formatting::PlainFormatter;
use cognibank::io::output::OutputFormat;
use common::{client, FakeTransport};
use indoc::indoc;
use tempfile::TempDir;

fn context(demo_fallback: bool, format: OutputFormat) -> CommandContext {
    let mut config = CogniConfig::default();
    config.api.demo_fallback = demo_fallback;
    CommandContext::new(config, Some(format), true)
}

const STATS: &str = indoc! {r#"
    {
      "home": {"total": 4, "completed": 4, "approved": 1, "partial": 2,
               "average_amount": 1200000, "average_interest": 8.9},
      "car": {"total": 2, "completed": 0, "approved": 0, "partial": 0,
              "average_amount": 0, "average_interest": 0}
    }
"#};

#[tokio::test]
async fn stats_render_live_data() {
    let transport = FakeTransport::new();
    transport.respond(200, STATS);
    let mut out = Vec::new();

    show_stats(&context(false, OutputFormat::Terminal), &client(&transport), &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Total applications: 6"));
    assert!(text.contains("25.0%"));
    assert!(text.contains("₹12,00,000"));
    assert!(text.contains("Last updated:"));
    assert!(!text.contains("DEMO DATA"));
}

#[tokio::test]
async fn stats_failure_without_demo_names_backend() {
    let transport = FakeTransport::new();
    let mut out = Vec::new();

    let err = show_stats(&context(false, OutputFormat::Terminal), &client(&transport), &mut out)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Failed to load statistics. Make sure the backend server is running."
    );
    assert!(out.is_empty());
}

#[tokio::test]
async fn stats_failure_with_demo_is_labeled() {
    let transport = FakeTransport::new();
    let mut out = Vec::new();

    show_stats(&context(true, OutputFormat::Json), &client(&transport), &mut out)
        .await
        .unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["source"], "demo");
    assert!(value["demo_reason"].as_str().unwrap().contains("no scripted response"));
}

#[tokio::test]
async fn applications_markdown() {
    let transport = FakeTransport::new();
    transport.respond(
        200,
        r#"[{"session_id": "0123456789ab", "status": "in_progress", "customer_info": {}}]"#,
    );
    let mut out = Vec::new();

    show_applications(
        &context(false, OutputFormat::Markdown),
        &client(&transport),
        LoanType::Personal,
        3,
        &mut out,
    )
    .await
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(transport.paths(), vec!["/admin/applications/personal?limit=3"]);
    assert!(text.contains("`01234567...`"));
    assert!(text.contains("| Never | N/A | N/A | N/A | in_progress | ₹0 | N/A |"));
}

#[tokio::test]
async fn export_download_uses_default_name() {
    let transport = FakeTransport::new();
    transport.respond(200, "session_id,status\nabc,APPROVED\n");
    let dir = TempDir::new().unwrap();
    let mut out = Vec::new();

    let path = download_export(
        &context(false, OutputFormat::Terminal),
        &client(&transport),
        LoanType::Education,
        None,
        dir.path(),
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(path, dir.path().join("education_applications.csv"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "session_id,status\nabc,APPROVED\n"
    );
    assert!(String::from_utf8(out).unwrap().contains("Saved education_applications.csv"));
}

#[tokio::test]
async fn generate_report_refreshes_exports() {
    let transport = FakeTransport::new();
    transport
        .respond(200, r#"{"message": "Report generated"}"#)
        .respond(
            200,
            r#"{"car": {"exists": true, "size": 2048, "lastModified": null, "recordCount": 3}}"#,
        );
    let mut out = Vec::new();

    generate_report(
        &context(false, OutputFormat::Terminal),
        &client(&transport),
        LoanType::Car,
        &mut out,
    )
    .await
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        transport.paths(),
        vec!["/admin/generate-report/car", "/admin/exports"]
    );
    assert!(text.starts_with("Report generated for Car loans"));
    assert!(text.contains("2 KB"));
    assert!(text.contains("Available"));
}

#[tokio::test]
async fn chat_loop_until_quit() {
    let transport = FakeTransport::new();
    transport
        .respond(200, r#"{"session_id": "abc", "message": "What is your monthly income?"}"#)
        .respond(
            200,
            r#"{"session_id": "abc", "loan_type": "home", "collected_fields": ["income"], "missing_fields": ["age"]}"#,
        )
        .respond(
            200,
            indoc! {r#"
                {
                  "message": "Thanks!",
                  "prediction": {
                    "result": {
                      "status": "PARTIAL_APPROVAL",
                      "requested_amount": 2000000,
                      "eligible_amount": 1500000,
                      "interest_rate": 9.1
                    }
                  }
                }
            "#},
        );
    let input: &[u8] = b"\n/status\n45\n/quit\nignored\n";
    let mut out = Vec::new();

    run_chat(&client(&transport), LoanType::Home, input, &mut out, &PlainFormatter)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Home Loan Assistant"));
    assert!(text.contains("What is your monthly income?"));
    assert!(text.contains("Collected: income"));
    assert!(text.contains("Missing:   age"));
    assert!(text.contains("up to ₹15,00,000 at 9.1% per annum"));
    assert!(!text.contains("Session ended before a decision"));
    assert_eq!(
        transport.paths(),
        vec!["/chat/start", "/session/abc", "/chat/message"]
    );
}

#[tokio::test]
async fn chat_without_backend_fails_fast() {
    let transport = FakeTransport::new();
    let input: &[u8] = b"hello\n";
    let mut out = Vec::new();

    let err = run_chat(&client(&transport), LoanType::Car, input, &mut out, &PlainFormatter)
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("Could not start a chat session"));
}
