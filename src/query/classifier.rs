//! Query Intent Classifier.
//!
//! Decides whether a question is a grouped ranking ("which state has the most
//! claims") or a scalar aggregate ("what is the average balance due"), and
//! which metric function it asks for.
//!
//! Patterns are evaluated in a fixed order and the first match wins. There is
//! no scoring: on ambiguous input the earlier pattern decides.

use std::sync::LazyLock;

use regex::Regex;

use super::types::*;

// ============================================================================
// Intent Classifier
// ============================================================================

/// Classifies free-text questions into analytics or aggregation intents.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a question for the group analytics pipeline.
    ///
    /// Returns `None` when no category cue is present.
    pub fn classify_analytics(&self, query: &str) -> Option<AnalyticsIntent> {
        let category = Self::classify_category(query)?;
        let function = Self::classify_ranking_function(query);
        let order = Self::classify_order(query);

        tracing::debug!(
            category = category.as_str(),
            function = function.as_str(),
            order = order.as_str(),
            "Classified analytics query"
        );

        Some(AnalyticsIntent {
            category,
            function,
            order,
        })
    }

    /// Classify a question for the scalar aggregation pipeline.
    ///
    /// Returns `None` when no function cue is present.
    pub fn classify_aggregation(&self, query: &str) -> Option<AggregationIntent> {
        let function = if AVG_PATTERN.is_match(query) {
            MetricFunction::Average
        } else if SUM_PATTERN.is_match(query) {
            MetricFunction::Sum
        } else if MIN_PATTERN.is_match(query) {
            MetricFunction::Minimum
        } else if MAX_PATTERN.is_match(query) {
            MetricFunction::Maximum
        } else if COUNT_PATTERN.is_match(query) {
            MetricFunction::Count
        } else {
            return None;
        };

        tracing::debug!(function = function.as_str(), "Classified aggregation query");
        Some(AggregationIntent { function })
    }

    // ========================================================================
    // Analytics Sub-classification
    // ========================================================================

    fn classify_category(query: &str) -> Option<Category> {
        if STATE_PATTERN.is_match(query) {
            Some(Category::ByState)
        } else if PROVIDER_PATTERN.is_match(query) {
            Some(Category::ByProvider)
        } else if INSURANCE_PATTERN.is_match(query) {
            Some(Category::ByInsurer)
        } else {
            None
        }
    }

    fn classify_ranking_function(query: &str) -> MetricFunction {
        // Without a superlative every ranking is a count.
        if !MOST_PATTERN.is_match(query) && !LEAST_PATTERN.is_match(query) {
            return MetricFunction::Count;
        }

        if RANKING_COUNT_PATTERN.is_match(query) {
            MetricFunction::Count
        } else if RANKING_AVERAGE_PATTERN.is_match(query) {
            MetricFunction::Average
        } else if RANKING_TOTAL_PATTERN.is_match(query) {
            MetricFunction::Sum
        } else {
            MetricFunction::Count
        }
    }

    fn classify_order(query: &str) -> SortOrder {
        if LEAST_PATTERN.is_match(query) {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }
}

// ============================================================================
// Regex Patterns (using LazyLock for static initialization)
// ============================================================================

// Category patterns
static STATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)which state|state with|by state|states with|states that")
        .expect("Invalid regex")
});
static PROVIDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)which provider|provider with|by provider|providers with|providers that")
        .expect("Invalid regex")
});
static INSURANCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)which insurance|insurance with|by insurance|insurances with|insurance companies",
    )
    .expect("Invalid regex")
});

// Superlative patterns
static MOST_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)most|highest|largest|greatest|maximum").expect("Invalid regex")
});
static LEAST_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)least|lowest|smallest|minimum").expect("Invalid regex"));

// Ranking function patterns
static RANKING_COUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)number of|count of|how many").expect("Invalid regex"));
static RANKING_AVERAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)average|avg|mean").expect("Invalid regex"));
static RANKING_TOTAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)total|sum|add").expect("Invalid regex"));

// Aggregation function patterns
static AVG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)average|avg|mean|calculate average").expect("Invalid regex")
});
static SUM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)sum|total|add up|calculate total").expect("Invalid regex")
});
static MIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)min|minimum|lowest|smallest").expect("Invalid regex"));
static MAX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)max|maximum|highest|largest").expect("Invalid regex"));
static COUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)count|how many|number of").expect("Invalid regex"));

// ============================================================================
// Tests
// ============================================================================
