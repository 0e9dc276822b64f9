//! claimquery: natural language questions over claims data.
//!
//! Classifies free-text questions as grouped rankings or scalar aggregates,
//! builds backend requests for them and renders the results as sentences.

pub mod backend;
pub mod config;
pub mod error;
pub mod query;

pub use backend::{create_backend, ClaimRecord, MemoryBackend, QueryBackend, RecordFilter};
pub use config::Config;
pub use error::{BackendError, ClaimQueryError, ConfigError, Result};
pub use query::{
    format_aggregation, format_analytics, AggregationIntent, AggregationRequest, AggregationResult,
    AnalyticsIntent, AnalyticsRequest, AnalyticsResult, Category, FieldName, FieldResolver,
    IntentClassifier, MetricFunction, PlannedRequest, QueryAnswer, QueryExecutor, QueryStats,
    SortOrder,
};
