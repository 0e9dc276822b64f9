//! Field resolution.
//!
//! Infers which numeric claim field a question is about. Resolution never
//! fails: when no cue matches, the field is `ClaimAmount`.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{humanize, FieldName};

/// Which keyword vocabulary a resolver uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldResolver {
    /// Keyword cues used by the group analytics pipeline.
    Analytics,
    /// Generated field-name patterns, then the aggregation keyword cues.
    Aggregation,
}

impl FieldResolver {
    /// Resolve the field a question refers to.
    pub fn resolve(&self, query: &str) -> FieldName {
        let field = match self {
            Self::Analytics => match_keywords(&ANALYTICS_KEYWORDS, query),
            Self::Aggregation => {
                match_keywords(&GENERATED_PATTERNS, query)
                    .or_else(|| match_keywords(&AGGREGATION_KEYWORDS, query))
            }
        };

        match field {
            Some(field) => field,
            None => {
                tracing::debug!("No field cue found, defaulting to claim amount");
                FieldName::ClaimAmount
            }
        }
    }
}

fn match_keywords(patterns: &[(Regex, FieldName)], query: &str) -> Option<FieldName> {
    patterns
        .iter()
        .find(|(pattern, _)| pattern.is_match(query))
        .map(|(_, field)| *field)
}

fn keyword_table(entries: [(&str, FieldName); 4]) -> Vec<(Regex, FieldName)> {
    entries
        .into_iter()
        .map(|(pattern, field)| {
            let regex = Regex::new(&format!("(?i){pattern}")).expect("Invalid regex");
            (regex, field)
        })
        .collect()
}

// ============================================================================
// Regex Patterns (using LazyLock for static initialization)
// ============================================================================

static ANALYTICS_KEYWORDS: LazyLock<Vec<(Regex, FieldName)>> = LazyLock::new(|| {
    keyword_table([
        ("claims|claim amount", FieldName::ClaimAmount),
        ("charges|line item", FieldName::LineItemCharge),
        ("payments|paid|amount paid", FieldName::AmountPaid),
        ("balance|due|owed", FieldName::BalanceDue),
    ])
});

static AGGREGATION_KEYWORDS: LazyLock<Vec<(Regex, FieldName)>> = LazyLock::new(|| {
    keyword_table([
        ("claim|claims|total claim", FieldName::ClaimAmount),
        ("charge|charges|line item", FieldName::LineItemCharge),
        ("paid|payment|amount paid", FieldName::AmountPaid),
        ("due|balance|owed|balance due", FieldName::BalanceDue),
    ])
});

// One pattern per field, built from its humanized identifier.
static GENERATED_PATTERNS: LazyLock<Vec<(Regex, FieldName)>> = LazyLock::new(|| {
    FieldName::ALL
        .iter()
        .map(|field| {
            let words = regex::escape(&humanize(field.as_str()));
            let regex = Regex::new(&format!("(?i){words}")).expect("Invalid regex");
            (regex, *field)
        })
        .collect()
});

// ============================================================================
// Tests
// ============================================================================
