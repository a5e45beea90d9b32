use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scoring::{LeadPriority, ScoringInput, ScoringReason, ScoringResult};

/// Identifier wrapper for a tenant (one business using the platform).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TenantId(pub String);

/// Identifier wrapper for a stored enquiry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnquiryId(pub String);

/// Inbound contact request as captured by a web form, phone log, or import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnquirySubmission {
    pub tenant_id: TenantId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, alias = "valueEstimate")]
    pub value_estimate: Option<f64>,
}

impl EnquirySubmission {
    pub fn to_scoring_input(&self) -> ScoringInput {
        ScoringInput {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
            notes: self.notes.clone(),
            postcode: self.postcode.clone(),
            source: self.source.clone(),
            phone: self.phone.clone(),
            value_estimate: self.value_estimate,
        }
    }
}

/// Persisted enquiry with the score, priority, and reason blob kept for auditability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnquiryRecord {
    pub id: EnquiryId,
    pub tenant_id: TenantId,
    pub submission: EnquirySubmission,
    pub received_at: DateTime<Utc>,
    pub score: i32,
    pub priority: LeadPriority,
    pub reason: ScoringReason,
}

impl EnquiryRecord {
    pub fn new(
        id: EnquiryId,
        submission: EnquirySubmission,
        received_at: DateTime<Utc>,
        result: ScoringResult,
    ) -> Self {
        let mut record = Self {
            id,
            tenant_id: submission.tenant_id.clone(),
            submission,
            received_at,
            score: 0,
            priority: LeadPriority::Low,
            reason: ScoringReason::default(),
        };
        record.apply_scoring(result);
        record
    }

    pub fn apply_scoring(&mut self, result: ScoringResult) {
        self.score = result.score;
        self.priority = result.priority;
        self.reason = result.reason;
    }

    pub fn lead_view(&self) -> LeadView {
        LeadView {
            enquiry_id: self.id.clone(),
            tenant_id: self.tenant_id.clone(),
            name: self.submission.name.clone(),
            received_at: self.received_at,
            score: self.score,
            priority: self.priority,
            priority_label: self.priority.label(),
            reason: self.reason.clone(),
        }
    }
}

/// Sanitized representation of a scored lead for API responses; contact details other than
/// the name stay in the record.
#[derive(Debug, Clone, Serialize)]
pub struct LeadView {
    pub enquiry_id: EnquiryId,
    pub tenant_id: TenantId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub received_at: DateTime<Utc>,
    pub score: i32,
    pub priority: LeadPriority,
    pub priority_label: &'static str,
    pub reason: ScoringReason,
}
