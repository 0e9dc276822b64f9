//! End-to-end pipeline tests.

use std::sync::Arc;

use claimquery::config::BackendConfig;
use claimquery::{
    AnalyticsResult, ClaimRecord, MemoryBackend, MetricFunction, PlannedRequest, QueryExecutor,
    SortOrder,
};

fn claim(id: &str, state: &str, provider: &str, amount: f64, balance: Option<f64>) -> ClaimRecord {
    ClaimRecord {
        id: id.to_string(),
        patient_state: Some(state.to_string()),
        provider_name: Some(provider.to_string()),
        insurance_company: Some("Acme Health".to_string()),
        claim_amount: Some(amount),
        balance_due: balance,
        ..Default::default()
    }
}

/// Six claims across three states and three providers.
fn sample_claims() -> Vec<ClaimRecord> {
    vec![
        claim("c1", "CA", "Lee", 100.0, Some(10.0)),
        claim("c2", "TX", "Lee", 300.0, None),
        claim("c3", "CA", "Patel", 50.0, Some(5.0)),
        claim("c4", "NY", "Patel", 400.0, Some(40.0)),
        claim("c5", "CA", "Kim", 20.0, None),
        claim("c6", "TX", "Kim", 60.0, Some(0.0)),
    ]
}

fn executor() -> QueryExecutor {
    QueryExecutor::new(Arc::new(MemoryBackend::new(
        sample_claims(),
        BackendConfig::default(),
    )))
}

#[tokio::test]
async fn test_count_ranking_with_breakdown() {
    let answer = executor()
        .answer("Which state has the most claims?", None)
        .await
        .unwrap();

    assert_eq!(
        answer.answer,
        "The patient state with the most claims is CA with 3 claims.\n\n\
         Here is the breakdown of the top results:\n\
         1. CA: 3 claims\n\
         2. TX: 2 claims\n\
         3. NY: 1 claims"
    );
    assert_eq!(answer.request.display_name(), "Group Analytics");
}

#[tokio::test]
async fn test_ascending_count_ranking() {
    let answer = executor()
        .answer("Which state has the least claims?", None)
        .await
        .unwrap();

    assert!(answer
        .answer
        .starts_with("The patient state with the most claims is NY with 1 claims."));
    match answer.request {
        PlannedRequest::Analytics(request) => assert_eq!(request.order, SortOrder::Ascending),
        other => panic!("expected analytics request, got {other:?}"),
    }
}

#[tokio::test]
async fn test_metric_ranking() {
    let answer = executor()
        .answer("Which provider has the highest average claim amount?", None)
        .await
        .unwrap();

    assert_eq!(
        answer.answer,
        "The provider name with the average claim amount is Patel with $225.00.\n\n\
         Here is the breakdown of the top results:\n\
         1. Patel: $225.00\n\
         2. Lee: $200.00\n\
         3. Kim: $40.00"
    );
}

#[tokio::test]
async fn test_handle_analytics_returns_report() {
    let result = executor()
        .handle_analytics("Which provider has the highest total claim amount?")
        .await
        .unwrap();

    let AnalyticsResult::Success(report) = result else {
        panic!("expected a successful report");
    };
    assert_eq!(report.metric_function, MetricFunction::Sum);
    assert_eq!(report.total_groups, 3);
    assert_eq!(report.total_documents, 6);
    assert_eq!(report.results[0].group, "Patel");
}

#[tokio::test]
async fn test_filtered_aggregation() {
    let answer = executor()
        .answer(
            "What is the total balance due?",
            Some("patientState eq 'CA'"),
        )
        .await
        .unwrap();

    assert_eq!(
        answer.answer,
        "The total balance due is $15.00, summed across 2 records."
    );
}

#[tokio::test]
async fn test_unfiltered_average() {
    let answer = executor()
        .answer("What is the average claim amount?", None)
        .await
        .unwrap();

    assert_eq!(
        answer.answer,
        "The average claim amount is $155.00, based on 6 records."
    );
}

#[tokio::test]
async fn test_invalid_filter_is_reported() {
    let answer = executor()
        .answer("What is the total balance due?", Some("zipCode eq '90210'"))
        .await
        .unwrap();

    assert!(answer
        .answer
        .starts_with("I couldn't perform that calculation. Invalid filter:"));
}

#[tokio::test]
async fn test_empty_backend_apologizes() {
    let executor = QueryExecutor::new(Arc::new(MemoryBackend::default()));
    let answer = executor
        .answer("Which state has the most claims?", None)
        .await
        .unwrap();

    assert_eq!(
        answer.answer,
        "I couldn't analyze that data. No documents found matching the query"
    );
}

#[tokio::test]
async fn test_unrelated_question_falls_through() {
    assert!(executor()
        .answer("Tell me about the weather", None)
        .await
        .is_none());
}
