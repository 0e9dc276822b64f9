//! Result formatting.
//!
//! Turns backend results into sentences a non-technical reader can follow.

use super::types::*;

const RETRY_HINT: &str = "Please try a different query.";
const BREAKDOWN_HEADER: &str = "\n\nHere is the breakdown of the top results:";

/// Render a currency amount with two decimals.
pub fn format_currency(value: f64) -> String {
    format!("${value:.2}")
}

fn format_metric(metric: Option<&MetricValue>) -> String {
    match metric {
        Some(MetricValue::Number(value)) => format_currency(*value),
        Some(MetricValue::Text(text)) => text.clone(),
        None => "no recorded value".to_string(),
    }
}

fn apology(lead: &str, error: Option<&str>) -> String {
    let detail = error.filter(|e| !e.is_empty()).unwrap_or(RETRY_HINT);
    format!("{lead} {detail}")
}

// ============================================================================
// Group Analytics
// ============================================================================

/// Format a group analytics result.
pub fn format_analytics(result: Option<&AnalyticsResult>, _query: &str) -> String {
    let report = match result {
        Some(AnalyticsResult::Success(report)) if !report.results.is_empty() => report,
        other => {
            return apology(
                "I couldn't analyze that data.",
                other.and_then(AnalyticsResult::error),
            )
        }
    };

    let category = report.group_by_field.readable();
    let top = &report.results[0];

    let metric_field = match report.metric_field {
        Some(field) if report.metric_function.needs_field() => Some(field),
        _ => None,
    };

    let mut response = match metric_field {
        None => format!(
            "The {category} with the most claims is {} with {} claims.",
            top.group, top.count
        ),
        Some(field) => format!(
            "The {category} with the {} {} is {} with {}.",
            report.metric_function.readable(),
            field.readable(),
            top.group,
            format_metric(top.metric.as_ref())
        ),
    };

    if report.results.len() > 1 {
        response.push_str(BREAKDOWN_HEADER);
        for (index, row) in report.results.iter().enumerate() {
            let rank = index + 1;
            let line = match metric_field {
                None => format!("\n{rank}. {}: {} claims", row.group, row.count),
                Some(_) => format!("\n{rank}. {}: {}", row.group, format_metric(row.metric.as_ref())),
            };
            response.push_str(&line);
        }
    }

    response
}

// ============================================================================
// Scalar Aggregation
// ============================================================================

/// Format a scalar aggregation result.
pub fn format_aggregation(result: Option<&AggregationResult>, _query: &str) -> String {
    let report = match result {
        Some(AggregationResult::Success(report)) => report,
        other => {
            return apology(
                "I couldn't perform that calculation.",
                other.and_then(AggregationResult::error),
            )
        }
    };

    let field = report.field.readable();
    let value = format_currency(report.value);
    let count = report.count;

    match MetricFunction::from_name(&report.aggregation_type) {
        Some(MetricFunction::Average) => {
            format!("The average {field} is {value}, based on {count} records.")
        }
        Some(MetricFunction::Sum) => {
            format!("The total {field} is {value}, summed across {count} records.")
        }
        Some(MetricFunction::Minimum) => {
            format!("The minimum {field} is {value}, from {count} records analyzed.")
        }
        Some(MetricFunction::Maximum) => {
            format!("The maximum {field} is {value}, from {count} records analyzed.")
        }
        Some(MetricFunction::Count) => format!("There are {count} records with {field} values."),
        None => format!(
            "The {} of {field} is {value}, based on {count} records.",
            report.aggregation_type
        ),
    }
}

// ============================================================================
// Tests
// ============================================================================
