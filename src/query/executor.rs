//! Query Executor.
//!
//! Runs a question through the group analytics pipeline and, failing that,
//! the scalar aggregation pipeline. Each pipeline classifies the question,
//! builds a request, awaits a single backend call and formats the result.

use std::sync::Arc;
use std::time::Instant;

use crate::backend::QueryBackend;

use super::builder::{build_aggregation_request, build_analytics_request};
use super::classifier::IntentClassifier;
use super::formatter::{format_aggregation, format_analytics};
use super::types::*;

// ============================================================================
// Query Executor
// ============================================================================

/// Executes natural language claims questions against a backend.
pub struct QueryExecutor {
    /// Intent classifier
    classifier: IntentClassifier,
    /// Backend that computes rankings and aggregates
    backend: Arc<dyn QueryBackend>,
}

impl QueryExecutor {
    /// Create a new query executor.
    pub fn new(backend: Arc<dyn QueryBackend>) -> Self {
        Self {
            classifier: IntentClassifier::new(),
            backend,
        }
    }

    /// Decide which request a question maps to, without calling the backend.
    pub fn plan(&self, query: &str, filter: Option<&str>) -> Option<PlannedRequest> {
        plan_with(&self.classifier, query, filter)
    }

    /// Run the group analytics pipeline. `None` when the question is not a ranking.
    pub async fn handle_analytics(&self, query: &str) -> Option<AnalyticsResult> {
        let intent = self.classifier.classify_analytics(query)?;
        let request = build_analytics_request(&intent, query);
        Some(self.run_analytics(&request).await)
    }

    /// Run the scalar aggregation pipeline. `None` when no function cue is present.
    pub async fn handle_aggregation(
        &self,
        query: &str,
        filter: Option<&str>,
    ) -> Option<AggregationResult> {
        let intent = self.classifier.classify_aggregation(query)?;
        let request = build_aggregation_request(&intent, query, filter);
        Some(self.run_aggregation(&request).await)
    }

    /// Answer a question with whichever pipeline matches it.
    ///
    /// Returns `None` when neither pipeline recognizes the question, so the
    /// caller can hand it to a different handler.
    pub async fn answer(&self, query: &str, filter: Option<&str>) -> Option<QueryAnswer> {
        let total_start = Instant::now();

        let class_start = Instant::now();
        let Some(request) = self.plan(query, filter) else {
            tracing::debug!("Query matched neither analytics nor aggregation patterns");
            return None;
        };
        let classification_time = class_start.elapsed().as_millis() as u64;

        tracing::info!(pipeline = request.display_name(), "Dispatching claims query");

        let exec_start = Instant::now();
        let answer = match &request {
            PlannedRequest::Analytics(analytics) => {
                let result = self.run_analytics(analytics).await;
                format_analytics(Some(&result), query)
            }
            PlannedRequest::Aggregation(aggregation) => {
                let result = self.run_aggregation(aggregation).await;
                format_aggregation(Some(&result), query)
            }
        };
        let execution_time = exec_start.elapsed().as_millis() as u64;

        Some(QueryAnswer {
            request,
            answer,
            stats: QueryStats {
                classification_time_ms: classification_time,
                execution_time_ms: execution_time,
                total_time_ms: total_start.elapsed().as_millis() as u64,
            },
        })
    }

    // ========================================================================
    // Backend Calls
    // ========================================================================

    async fn run_analytics(&self, request: &AnalyticsRequest) -> AnalyticsResult {
        match self.backend.perform_analytics(request).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Analytics backend call failed: {}", e);
                AnalyticsResult::failure(e.to_string())
            }
        }
    }

    async fn run_aggregation(&self, request: &AggregationRequest) -> AggregationResult {
        match self.backend.perform_aggregation(request).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Aggregation backend call failed: {}", e);
                AggregationResult::failure(e.to_string())
            }
        }
    }
}

// ============================================================================
// Planning
// ============================================================================

/// Decide which request a question maps to, without a backend.
///
/// Analytics takes precedence over aggregation.
pub fn plan_request(query: &str, filter: Option<&str>) -> Option<PlannedRequest> {
    plan_with(&IntentClassifier::new(), query, filter)
}

fn plan_with(
    classifier: &IntentClassifier,
    query: &str,
    filter: Option<&str>,
) -> Option<PlannedRequest> {
    if let Some(intent) = classifier.classify_analytics(query) {
        return Some(PlannedRequest::Analytics(build_analytics_request(
            &intent, query,
        )));
    }
    classifier
        .classify_aggregation(query)
        .map(|intent| PlannedRequest::Aggregation(build_aggregation_request(&intent, query, filter)))
}

// ============================================================================
// Tests
// ============================================================================
