//! Backend trait definitions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::query::{
    AggregationRequest, AggregationResult, AnalyticsRequest, AnalyticsResult, Category, FieldName,
};

/// A single claim as stored in the claims index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimRecord {
    pub id: String,
    pub patient_name: Option<String>,
    pub patient_state: Option<String>,
    pub patient_city: Option<String>,
    pub provider_name: Option<String>,
    pub insurance_company: Option<String>,
    pub insurance_plan: Option<String>,
    pub claim_amount: Option<f64>,
    pub line_item_charge: Option<f64>,
    pub amount_paid: Option<f64>,
    pub balance_due: Option<f64>,
}

impl ClaimRecord {
    /// Value of the grouping field for a category.
    pub fn group_value(&self, category: Category) -> Option<&str> {
        match category {
            Category::ByState => self.patient_state.as_deref(),
            Category::ByProvider => self.provider_name.as_deref(),
            Category::ByInsurer => self.insurance_company.as_deref(),
        }
    }

    /// Value of a numeric field.
    pub fn metric_value(&self, field: FieldName) -> Option<f64> {
        match field {
            FieldName::ClaimAmount => self.claim_amount,
            FieldName::LineItemCharge => self.line_item_charge,
            FieldName::AmountPaid => self.amount_paid,
            FieldName::BalanceDue => self.balance_due,
        }
    }

    /// Value of a text field by its identifier.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(self.id.as_str()),
            "patientName" => self.patient_name.as_deref(),
            "patientState" => self.patient_state.as_deref(),
            "patientCity" => self.patient_city.as_deref(),
            "providerName" => self.provider_name.as_deref(),
            "insuranceCompany" => self.insurance_company.as_deref(),
            "insurancePlan" => self.insurance_plan.as_deref(),
            _ => None,
        }
    }
}

/// Query engine consumed by the pipelines.
///
/// `Err` means the backend could not be reached at all; query-level
/// problems are reported through the result's `error`.
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Execute a grouped ranking query.
    async fn perform_analytics(
        &self,
        request: &AnalyticsRequest,
    ) -> crate::error::Result<AnalyticsResult>;

    /// Execute a scalar aggregation query.
    async fn perform_aggregation(
        &self,
        request: &AggregationRequest,
    ) -> crate::error::Result<AggregationResult>;
}
