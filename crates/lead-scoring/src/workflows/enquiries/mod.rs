//! Enquiry intake: scoring new leads against tenant rules and keeping the results auditable.

pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod settings;

#[cfg(test)]
mod tests;

pub use domain::{EnquiryId, EnquiryRecord, EnquirySubmission, LeadView, TenantId};
pub use repository::{
    AlertError, EnquiryRepository, LeadAlert, LeadAlertPublisher, RepositoryError,
};
pub use router::enquiry_router;
pub use scoring::{
    score_enquiry, BoostCondition, BoostField, BoostHit, BoostRule, ConfigWarning, KeywordHit,
    KeywordRule, LeadPriority, LeadScoringEngine, PriorityThresholds, ScoringConfig,
    ScoringConfigError, ScoringInput, ScoringReason, ScoringResult,
};
pub use service::{EnquiryIntakeService, IntakeError};
pub use settings::{ScoringSettingsStore, SettingsError};
