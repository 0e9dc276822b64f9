//! In-memory query backend over claim records.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

use super::filter::RecordFilter;
use super::traits::{ClaimRecord, QueryBackend};
use crate::config::BackendConfig;
use crate::error::{BackendError, Result};
use crate::query::{
    AggregationReport, AggregationRequest, AggregationResult, AnalyticsReport, AnalyticsRequest,
    AnalyticsResult, GroupRow, MetricFunction, MetricValue, SortOrder,
};

/// Query backend that computes rankings and aggregates over records held in memory.
pub struct MemoryBackend {
    records: Vec<ClaimRecord>,
    limits: BackendConfig,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new(Vec::new(), BackendConfig::default())
    }
}

impl MemoryBackend {
    pub fn new(records: Vec<ClaimRecord>, limits: BackendConfig) -> Self {
        Self { records, limits }
    }

    /// Load records from a JSON array file or a JSON Lines file.
    pub async fn from_file(path: impl AsRef<Path>, limits: BackendConfig) -> Result<Self> {
        let records = load_records(path.as_ref()).await?;
        tracing::info!(
            "Loaded {} claim records from {}",
            records.len(),
            path.as_ref().display()
        );
        Ok(Self::new(records, limits))
    }
}

#[async_trait]
impl QueryBackend for MemoryBackend {
    async fn perform_analytics(&self, request: &AnalyticsRequest) -> Result<AnalyticsResult> {
        let records = &self.records;
        let scanned = &records[..records.len().min(self.limits.max_analytics_documents)];

        if scanned.is_empty() {
            return Ok(AnalyticsResult::failure("No documents found matching the query"));
        }

        let metric_field = request
            .metric_field
            .filter(|_| request.metric_function.needs_field());

        // Groups in first-seen order.
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<(&str, Vec<&ClaimRecord>)> = Vec::new();
        for record in scanned {
            let Some(value) = record.group_value(request.group_by_field) else {
                continue;
            };
            let slot = *index.entry(value).or_insert_with(|| {
                groups.push((value, Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(record);
        }

        let total_groups = groups.len();
        let mut rows: Vec<GroupRow> = groups
            .into_iter()
            .map(|(group, members)| {
                let metric = metric_field.and_then(|field| {
                    let values: Vec<f64> = members
                        .iter()
                        .filter_map(|r| r.metric_value(field))
                        .collect();
                    compute(request.metric_function, &values).map(MetricValue::Number)
                });
                GroupRow {
                    group: group.to_string(),
                    count: members.len() as u64,
                    metric,
                }
            })
            .collect();

        let by_metric = metric_field.is_some() && rows.iter().any(|row| row.metric.is_some());
        let sort_key = |row: &GroupRow| -> f64 {
            if by_metric {
                match row.metric {
                    Some(MetricValue::Number(value)) => value,
                    _ => 0.0,
                }
            } else {
                row.count as f64
            }
        };
        rows.sort_by(|a, b| {
            let ordering = sort_key(a).partial_cmp(&sort_key(b)).unwrap_or(Ordering::Equal);
            match request.order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
        rows.truncate(request.top_results);

        tracing::debug!(
            group_by = request.group_by_field.as_str(),
            groups = total_groups,
            documents = records.len(),
            "Computed analytics"
        );

        Ok(AnalyticsResult::Success(AnalyticsReport {
            results: rows,
            group_by_field: request.group_by_field,
            metric_function: request.metric_function,
            metric_field,
            order: request.order,
            total_groups,
            total_documents: records.len(),
        }))
    }

    async fn perform_aggregation(&self, request: &AggregationRequest) -> Result<AggregationResult> {
        let filter = match request.filter.as_deref() {
            Some(expression) => match RecordFilter::parse(expression) {
                Ok(filter) => filter,
                Err(reason) => {
                    return Ok(AggregationResult::failure(format!("Invalid filter: {reason}")))
                }
            },
            None => RecordFilter::default(),
        };

        let values: Vec<f64> = self
            .records
            .iter()
            .filter(|record| filter.matches(record))
            .take(self.limits.max_aggregation_documents)
            .filter_map(|record| record.metric_value(request.field))
            .collect();

        let Some(value) = compute(request.aggregation_type, &values) else {
            return Ok(AggregationResult::failure(format!(
                "No numeric values found for field '{}'",
                request.field
            )));
        };

        Ok(AggregationResult::Success(AggregationReport {
            value,
            count: values.len() as u64,
            field: request.field,
            aggregation_type: request.aggregation_type.as_str().to_string(),
        }))
    }
}

/// Apply a metric function. `None` when there are no values.
fn compute(function: MetricFunction, values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let result = match function {
        MetricFunction::Count => values.len() as f64,
        MetricFunction::Sum => values.iter().sum(),
        MetricFunction::Average => values.iter().sum::<f64>() / values.len() as f64,
        MetricFunction::Minimum => values.iter().copied().fold(f64::INFINITY, f64::min),
        MetricFunction::Maximum => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    };
    Some(result)
}

/// Read claim records from disk.
///
/// Files ending in `.jsonl` or `.ndjson` hold one record per line; anything
/// else is parsed as a JSON array.
pub async fn load_records(path: &Path) -> Result<Vec<ClaimRecord>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| BackendError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let line_delimited = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("jsonl") | Some("ndjson")
    );

    if !line_delimited {
        let records = serde_json::from_str(&content).map_err(|e| BackendError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        return Ok(records);
    }

    let mut records = Vec::new();
    for (number, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(line).map_err(|e| BackendError::MalformedRecord {
            line: number + 1,
            reason: e.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}
