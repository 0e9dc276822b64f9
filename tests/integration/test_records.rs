//! Loading claim records from disk.

use std::fs::File;
use std::io::Write;

use tempfile::TempDir;

use claimquery::backend::load_records;
use claimquery::{create_backend, BackendError, ClaimQueryError, Config};

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[tokio::test]
async fn test_load_json_array() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "claims.json",
        r#"[
            {"id": "c1", "patientState": "CA", "claimAmount": 120.5},
            {"id": "c2", "providerName": "Lee", "balanceDue": 30}
        ]"#,
    );

    let records = load_records(&path).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].patient_state.as_deref(), Some("CA"));
    assert_eq!(records[0].claim_amount, Some(120.5));
    assert_eq!(records[1].balance_due, Some(30.0));
    assert!(records[1].claim_amount.is_none());
}

#[tokio::test]
async fn test_load_json_lines_skips_blank_lines() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "claims.jsonl",
        "{\"id\": \"c1\", \"claimAmount\": 10}\n\n{\"id\": \"c2\", \"claimAmount\": 20}\n",
    );

    let records = load_records(&path).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].id, "c2");
}

#[tokio::test]
async fn test_malformed_line_reports_line_number() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "claims.ndjson",
        "{\"id\": \"c1\"}\n{\"id\": \n",
    );

    let err = load_records(&path).await.unwrap_err();
    assert!(matches!(
        err,
        ClaimQueryError::Backend(BackendError::MalformedRecord { line: 2, .. })
    ));
}

#[tokio::test]
async fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = load_records(&dir.path().join("absent.json"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClaimQueryError::Backend(BackendError::Load { .. })
    ));
}

#[tokio::test]
async fn test_create_backend_from_config() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "claims.jsonl",
        "{\"id\": \"c1\", \"insuranceCompany\": \"Acme\", \"amountPaid\": 80}\n\
         {\"id\": \"c2\", \"insuranceCompany\": \"Acme\", \"amountPaid\": 20}\n",
    );

    let config = Config::from_str(&format!(
        "[data]\nrecords_path = {:?}\n",
        path.to_string_lossy()
    ))
    .unwrap();

    let backend = create_backend(&config).await.unwrap();
    let executor = claimquery::QueryExecutor::new(backend);
    let answer = executor
        .answer("What is the sum of amount paid?", None)
        .await
        .unwrap();
    assert_eq!(
        answer.answer,
        "The total amount paid is $100.00, summed across 2 records."
    );
}
