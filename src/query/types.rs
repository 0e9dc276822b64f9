//! Types for the claims query pipelines.

use serde::{Deserialize, Serialize};

/// Number of ranked groups requested from the backend.
pub const DEFAULT_TOP_RESULTS: usize = 10;

// ============================================================================
// Humanization
// ============================================================================

/// Convert a camelCase identifier into lowercase, space-separated words.
///
/// `"amountPaid"` becomes `"amount paid"`.
pub fn humanize(identifier: &str) -> String {
    let mut words = String::with_capacity(identifier.len() + 4);
    for ch in identifier.chars() {
        if ch.is_ascii_uppercase() {
            words.push(' ');
        }
        words.push(ch.to_ascii_lowercase());
    }
    words.trim().to_string()
}

// ============================================================================
// Category
// ============================================================================

/// Grouping dimension for a ranking query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "patientState")]
    ByState,
    #[serde(rename = "providerName")]
    ByProvider,
    #[serde(rename = "insuranceCompany")]
    ByInsurer,
}

impl Category {
    /// Identifier of the record field this category groups on.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ByState => "patientState",
            Self::ByProvider => "providerName",
            Self::ByInsurer => "insuranceCompany",
        }
    }

    /// Prose form, e.g. "patient state".
    pub fn readable(&self) -> String {
        humanize(self.as_str())
    }
}

// ============================================================================
// Metric Function
// ============================================================================

/// Numeric operation applied to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricFunction {
    #[serde(rename = "count")]
    Count,
    #[serde(rename = "sum")]
    Sum,
    #[serde(rename = "avg")]
    Average,
    #[serde(rename = "min")]
    Minimum,
    #[serde(rename = "max")]
    Maximum,
}

impl MetricFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Average => "avg",
            Self::Minimum => "min",
            Self::Maximum => "max",
        }
    }

    /// Parse a wire name (`"avg"`, `"sum"`, ...). Case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "count" => Some(Self::Count),
            "sum" => Some(Self::Sum),
            "avg" => Some(Self::Average),
            "min" => Some(Self::Minimum),
            "max" => Some(Self::Maximum),
            _ => None,
        }
    }

    /// Whether this function operates on a numeric field.
    pub fn needs_field(&self) -> bool {
        !matches!(self, Self::Count)
    }

    /// Word used in generated prose.
    pub fn readable(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Sum => "total",
            Self::Average => "average",
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
        }
    }
}

// ============================================================================
// Sort Order
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "asc")]
    Ascending,
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

// ============================================================================
// Field Name
// ============================================================================

/// Numeric claim fields eligible for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    ClaimAmount,
    LineItemCharge,
    AmountPaid,
    BalanceDue,
}

impl FieldName {
    /// All fields, in resolution priority order.
    pub const ALL: [FieldName; 4] = [
        Self::ClaimAmount,
        Self::LineItemCharge,
        Self::AmountPaid,
        Self::BalanceDue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClaimAmount => "claimAmount",
            Self::LineItemCharge => "lineItemCharge",
            Self::AmountPaid => "amountPaid",
            Self::BalanceDue => "balanceDue",
        }
    }

    /// Prose form, e.g. "balance due".
    pub fn readable(&self) -> String {
        humanize(self.as_str())
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Classification Outcomes
// ============================================================================

/// Decision of the group analytics classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsIntent {
    pub category: Category,
    pub function: MetricFunction,
    pub order: SortOrder,
}

/// Decision of the scalar aggregation classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationIntent {
    pub function: MetricFunction,
}

// ============================================================================
// Requests
// ============================================================================

/// Grouped ranking query sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsRequest {
    pub group_by_field: Category,
    pub metric_function: MetricFunction,
    /// Present iff `metric_function` is not `Count`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_field: Option<FieldName>,
    pub order: SortOrder,
    pub top_results: usize,
}

impl AnalyticsRequest {
    /// Build a request. Count queries drop the metric field; other functions
    /// fall back to `ClaimAmount` when none is given.
    pub fn new(
        group_by_field: Category,
        metric_function: MetricFunction,
        metric_field: Option<FieldName>,
        order: SortOrder,
    ) -> Self {
        let metric_field = metric_function
            .needs_field()
            .then(|| metric_field.unwrap_or(FieldName::ClaimAmount));
        Self {
            group_by_field,
            metric_function,
            metric_field,
            order,
            top_results: DEFAULT_TOP_RESULTS,
        }
    }
}

/// Scalar aggregation query sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationRequest {
    pub field: FieldName,
    pub aggregation_type: MetricFunction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// The user's question as typed.
    #[serde(rename = "query")]
    pub raw_query: String,
}

/// A request the pipelines would issue, without executing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlannedRequest {
    Analytics(AnalyticsRequest),
    Aggregation(AggregationRequest),
}

impl PlannedRequest {
    pub fn display_name(&self) -> &str {
        match self {
            Self::Analytics(_) => "Group Analytics",
            Self::Aggregation(_) => "Scalar Aggregation",
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// A per-group metric as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

/// One ranked group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRow {
    pub group: String,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<MetricValue>,
}

/// Successful analytics payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub results: Vec<GroupRow>,
    pub group_by_field: Category,
    pub metric_function: MetricFunction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_field: Option<FieldName>,
    #[serde(default)]
    pub order: SortOrder,
    #[serde(default)]
    pub total_groups: usize,
    #[serde(default)]
    pub total_documents: usize,
}

/// Backend response to an [`AnalyticsRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalyticsResult {
    Failure { error: String },
    Success(AnalyticsReport),
}

impl AnalyticsResult {
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure { error } => Some(error),
            Self::Success(_) => None,
        }
    }
}

/// Successful aggregation payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationReport {
    #[serde(rename = "result")]
    pub value: f64,
    pub count: u64,
    pub field: FieldName,
    /// Function name as echoed by the backend.
    pub aggregation_type: String,
}

/// Backend response to an [`AggregationRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AggregationResult {
    Failure { error: String },
    Success(AggregationReport),
}

impl AggregationResult {
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure { error } => Some(error),
            Self::Success(_) => None,
        }
    }
}

// ============================================================================
// Query Answer
// ============================================================================

/// Answer produced by running a question through one of the pipelines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryAnswer {
    /// The request issued to the backend
    pub request: PlannedRequest,
    /// Human-readable answer
    pub answer: String,
    /// Execution statistics
    pub stats: QueryStats,
}

/// Query execution statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryStats {
    /// Classification and request building time in milliseconds
    pub classification_time_ms: u64,
    /// Backend call time in milliseconds
    pub execution_time_ms: u64,
    /// Total time in milliseconds
    pub total_time_ms: u64,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("amountPaid"), "amount paid");
        assert_eq!(humanize("lineItemCharge"), "line item charge");
        assert_eq!(humanize("patientState"), "patient state");
        assert_eq!(humanize("count"), "count");
    }

    #[test]
    fn test_readable_names() {
        assert_eq!(Category::ByInsurer.readable(), "insurance company");
        assert_eq!(FieldName::BalanceDue.readable(), "balance due");
        assert_eq!(MetricFunction::Average.readable(), "average");
        assert_eq!(MetricFunction::Sum.readable(), "total");
    }

    #[test]
    fn test_wire_names() {
        let request = AnalyticsRequest::new(
            Category::ByState,
            MetricFunction::Average,
            Some(FieldName::AmountPaid),
            SortOrder::Ascending,
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["group_by_field"], "patientState");
        assert_eq!(json["metric_function"], "avg");
        assert_eq!(json["metric_field"], "amountPaid");
        assert_eq!(json["order"], "asc");
        assert_eq!(json["top_results"], 10);
    }

    #[test]
    fn test_count_request_drops_field() {
        let request = AnalyticsRequest::new(
            Category::ByProvider,
            MetricFunction::Count,
            Some(FieldName::ClaimAmount),
            SortOrder::Descending,
        );
        assert_eq!(request.metric_field, None);

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("metric_field").is_none());
    }

    #[test]
    fn test_metric_request_always_has_field() {
        let request = AnalyticsRequest::new(
            Category::ByState,
            MetricFunction::Sum,
            None,
            SortOrder::Descending,
        );
        assert_eq!(request.metric_field, Some(FieldName::ClaimAmount));

        let request = AnalyticsRequest::new(
            Category::ByState,
            MetricFunction::Maximum,
            Some(FieldName::BalanceDue),
            SortOrder::Descending,
        );
        assert_eq!(request.metric_field, Some(FieldName::BalanceDue));
    }

    #[test]
    fn test_function_from_name() {
        assert_eq!(MetricFunction::from_name("AVG"), Some(MetricFunction::Average));
        assert_eq!(MetricFunction::from_name("median"), None);
    }

    #[test]
    fn test_result_deserialization() {
        let failure: AnalyticsResult =
            serde_json::from_str(r#"{"error": "index offline"}"#).unwrap();
        assert_eq!(failure.error(), Some("index offline"));

        let success: AnalyticsResult = serde_json::from_str(
            r#"{
                "results": [{"group": "CA", "count": 4, "metric": 12.5}],
                "group_by_field": "patientState",
                "metric_function": "avg",
                "metric_field": "claimAmount",
                "total_groups": 1,
                "total_documents": 4
            }"#,
        )
        .unwrap();
        match success {
            AnalyticsResult::Success(report) => {
                assert_eq!(report.results[0].metric, Some(MetricValue::Number(12.5)));
                assert_eq!(report.order, SortOrder::Descending);
            }
            AnalyticsResult::Failure { .. } => panic!("expected success"),
        }

        let aggregation: AggregationResult = serde_json::from_str(
            r#"{"result": 123.4, "count": 5, "field": "claimAmount", "aggregation_type": "avg"}"#,
        )
        .unwrap();
        assert!(aggregation.error().is_none());
    }
}
