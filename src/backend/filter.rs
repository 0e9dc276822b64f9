//! Record filters.
//!
//! Supports the OData subset used by the claims search index:
//! `field op value` clauses joined by `and`, where `op` is one of
//! `eq`, `ne`, `gt`, `ge`, `lt`, `le` and `value` is a quoted string or a
//! number. Text fields only support `eq` and `ne`.

use std::sync::LazyLock;

use regex::Regex;

use super::traits::ClaimRecord;
use crate::query::FieldName;

const TEXT_FIELDS: [&str; 7] = [
    "id",
    "patientName",
    "patientState",
    "patientCity",
    "providerName",
    "insuranceCompany",
    "insurancePlan",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Operator {
    fn parse(op: &str) -> Option<Self> {
        match op.to_ascii_lowercase().as_str() {
            "eq" => Some(Self::Eq),
            "ne" => Some(Self::Ne),
            "gt" => Some(Self::Gt),
            "ge" => Some(Self::Ge),
            "lt" => Some(Self::Lt),
            "le" => Some(Self::Le),
            _ => None,
        }
    }

    fn compare(&self, ordering: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering::*;
        match self {
            Self::Eq => ordering == Equal,
            Self::Ne => ordering != Equal,
            Self::Gt => ordering == Greater,
            Self::Ge => ordering != Less,
            Self::Lt => ordering == Less,
            Self::Le => ordering != Greater,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Clause {
    Text {
        field: &'static str,
        op: Operator,
        value: String,
    },
    Number {
        field: FieldName,
        op: Operator,
        value: f64,
    },
}

impl Clause {
    fn matches(&self, record: &ClaimRecord) -> bool {
        match self {
            Self::Text { field, op, value } => match record.text_value(field) {
                Some(actual) => op.compare(actual.cmp(value.as_str())),
                None => false,
            },
            Self::Number { field, op, value } => match record.metric_value(*field) {
                Some(actual) => actual
                    .partial_cmp(value)
                    .map(|ordering| op.compare(ordering))
                    .unwrap_or(false),
                None => false,
            },
        }
    }
}

/// A parsed filter expression. An empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    clauses: Vec<Clause>,
}

impl RecordFilter {
    /// Parse a filter expression, returning a description of the first problem.
    pub fn parse(expression: &str) -> Result<Self, String> {
        let mut clauses = Vec::new();
        let mut rest = expression.trim();
        let mut dangling_and = false;

        while !rest.is_empty() {
            let caps = CLAUSE_PATTERN
                .captures(rest)
                .ok_or_else(|| format!("cannot parse '{rest}'"))?;

            clauses.push(parse_clause(&caps[1], &caps[2], &caps[3])?);
            dangling_and = caps.get(4).is_some();

            let consumed = caps.get(0).map(|m| m.end()).unwrap_or(rest.len());
            rest = rest[consumed..].trim_start();
        }

        if dangling_and {
            return Err("expression ends with 'and'".to_string());
        }

        Ok(Self { clauses })
    }

    pub fn matches(&self, record: &ClaimRecord) -> bool {
        self.clauses.iter().all(|clause| clause.matches(record))
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

fn parse_clause(field: &str, op: &str, literal: &str) -> Result<Clause, String> {
    let op = Operator::parse(op).ok_or_else(|| format!("unknown operator '{op}'"))?;

    if let Some(numeric) = FieldName::ALL.iter().find(|f| f.as_str() == field) {
        let value = literal
            .parse::<f64>()
            .map_err(|_| format!("field '{field}' needs a numeric value, got {literal}"))?;
        return Ok(Clause::Number {
            field: *numeric,
            op,
            value,
        });
    }

    let text_field = TEXT_FIELDS
        .iter()
        .find(|f| **f == field)
        .copied()
        .ok_or_else(|| format!("unknown field '{field}'"))?;

    if !matches!(op, Operator::Eq | Operator::Ne) {
        return Err(format!("field '{field}' only supports eq and ne"));
    }

    let value = literal
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .ok_or_else(|| format!("field '{field}' needs a quoted value, got {literal}"))?
        .replace("''", "'");

    Ok(Clause::Text {
        field: text_field,
        op,
        value,
    })
}

static CLAUSE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\w+)\s+(\w+)\s+('(?:[^']|'')*'|-?\d+(?:\.\d+)?)\s*(?:$|((?i:and))(?:\s+|$))",
    )
    .expect("Invalid regex")
});
