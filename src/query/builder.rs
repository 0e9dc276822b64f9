//! Request building.
//!
//! Assembles classifier and resolver output into backend requests.

use super::resolver::FieldResolver;
use super::types::*;

/// Build the analytics request for a classified question.
///
/// The metric field is resolved only when the function needs one.
pub fn build_analytics_request(intent: &AnalyticsIntent, query: &str) -> AnalyticsRequest {
    let metric_field = intent
        .function
        .needs_field()
        .then(|| FieldResolver::Analytics.resolve(query));

    AnalyticsRequest::new(intent.category, intent.function, metric_field, intent.order)
}

/// Build the aggregation request for a classified question.
pub fn build_aggregation_request(
    intent: &AggregationIntent,
    query: &str,
    filter: Option<&str>,
) -> AggregationRequest {
    AggregationRequest {
        field: FieldResolver::Aggregation.resolve(query),
        aggregation_type: intent.function,
        filter: filter.map(str::to_string),
        raw_query: query.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::classifier::IntentClassifier;

    #[test]
    fn test_state_count_request() {
        let query = "Which state has the most claims?";
        let intent = IntentClassifier::new().classify_analytics(query).unwrap();
        let request = build_analytics_request(&intent, query);

        assert_eq!(
            request,
            AnalyticsRequest {
                group_by_field: Category::ByState,
                metric_function: MetricFunction::Count,
                metric_field: None,
                order: SortOrder::Descending,
                top_results: 10,
            }
        );
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "group_by_field": "patientState",
                "metric_function": "count",
                "order": "desc",
                "top_results": 10
            })
        );
    }

    #[test]
    fn test_metric_request_has_field() {
        let query = "total balance due by provider, highest";
        let intent = IntentClassifier::new().classify_analytics(query).unwrap();
        let request = build_analytics_request(&intent, query);

        assert_eq!(request.group_by_field, Category::ByProvider);
        assert_eq!(request.metric_function, MetricFunction::Sum);
        assert_eq!(request.metric_field, Some(FieldName::BalanceDue));
        assert_eq!(request.order, SortOrder::Descending);
    }

    #[test]
    fn test_metric_request_defaults_field() {
        let intent = AnalyticsIntent {
            category: Category::ByInsurer,
            function: MetricFunction::Average,
            order: SortOrder::Descending,
        };
        let request = build_analytics_request(&intent, "which insurance has the highest average");
        assert_eq!(request.metric_field, Some(FieldName::ClaimAmount));
    }

    #[test]
    fn test_aggregation_request() {
        let query = "What is the average claim amount?";
        let intent = IntentClassifier::new().classify_aggregation(query).unwrap();
        let request = build_aggregation_request(&intent, query, Some("patientState eq 'CA'"));

        assert_eq!(request.field, FieldName::ClaimAmount);
        assert_eq!(request.aggregation_type, MetricFunction::Average);
        assert_eq!(request.filter.as_deref(), Some("patientState eq 'CA'"));
        assert_eq!(request.raw_query, query);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["field"], "claimAmount");
        assert_eq!(json["aggregation_type"], "avg");
        assert_eq!(json["query"], query);
    }

    #[test]
    fn test_count_aggregation_still_has_field() {
        let intent = AggregationIntent {
            function: MetricFunction::Count,
        };
        let request = build_aggregation_request(&intent, "how many?", None);
        assert_eq!(request.field, FieldName::ClaimAmount);
        assert!(request.filter.is_none());
    }
}
