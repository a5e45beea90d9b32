use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::domain::{EnquiryId, EnquiryRecord, EnquirySubmission, TenantId};
use super::repository::{EnquiryRepository, LeadAlert, LeadAlertPublisher, RepositoryError};
use super::scoring::{
    score_enquiry, ConfigWarning, LeadPriority, ScoringConfig, ScoringInput, ScoringResult,
};
use super::settings::{ScoringSettingsStore, SettingsError};

/// Enquiry-creation path: resolves the tenant's scoring config, scores, persists, and alerts.
pub struct EnquiryIntakeService<R, S, A> {
    repository: Arc<R>,
    settings: Arc<S>,
    alerts: Arc<A>,
    default_config: ScoringConfig,
}

static ENQUIRY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_enquiry_id() -> EnquiryId {
    let id = ENQUIRY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EnquiryId(format!("enq-{id:06}"))
}

impl<R, S, A> EnquiryIntakeService<R, S, A>
where
    R: EnquiryRepository + 'static,
    S: ScoringSettingsStore + 'static,
    A: LeadAlertPublisher + 'static,
{
    pub fn new(
        repository: Arc<R>,
        settings: Arc<S>,
        alerts: Arc<A>,
        default_config: ScoringConfig,
    ) -> Self {
        log_warnings(None, &default_config.validate());

        Self {
            repository,
            settings,
            alerts,
            default_config,
        }
    }

    /// Score and store a new enquiry, returning the persisted record.
    pub fn submit(&self, submission: EnquirySubmission) -> Result<EnquiryRecord, IntakeError> {
        if submission.tenant_id.0.trim().is_empty() {
            return Err(IntakeError::MissingTenant);
        }

        let config = self.config_for(&submission.tenant_id)?;
        let result = score_enquiry(&submission.to_scoring_input(), &config);
        let record = EnquiryRecord::new(next_enquiry_id(), submission, Utc::now(), result);

        let stored = self.repository.insert(record)?;
        info!(
            enquiry_id = %stored.id.0,
            tenant = %stored.tenant_id.0,
            score = stored.score,
            priority = stored.priority.label(),
            "enquiry scored"
        );

        if stored.priority == LeadPriority::Urgent {
            self.notify_urgent(&stored);
        }

        Ok(stored)
    }

    /// Re-score a stored enquiry with the tenant's current config.
    pub fn rescore(&self, enquiry_id: &EnquiryId) -> Result<EnquiryRecord, IntakeError> {
        let mut record = self
            .repository
            .fetch(enquiry_id)?
            .ok_or(RepositoryError::NotFound)?;

        let previous = record.priority;
        let config = self.config_for(&record.tenant_id)?;
        record.apply_scoring(score_enquiry(&record.submission.to_scoring_input(), &config));
        self.repository.update(record.clone())?;

        debug!(
            enquiry_id = %record.id.0,
            from = previous.label(),
            to = record.priority.label(),
            score = record.score,
            "enquiry rescored"
        );

        if record.priority == LeadPriority::Urgent && previous != LeadPriority::Urgent {
            self.notify_urgent(&record);
        }

        Ok(record)
    }

    /// Fetch a stored enquiry for API responses.
    pub fn get(&self, enquiry_id: &EnquiryId) -> Result<EnquiryRecord, IntakeError> {
        let record = self
            .repository
            .fetch(enquiry_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Tenant's enquiries, most pressing first; ties fall back to the oldest enquiry.
    pub fn ranked_leads(
        &self,
        tenant: &TenantId,
        limit: usize,
    ) -> Result<Vec<EnquiryRecord>, IntakeError> {
        let mut records = self.repository.list_for_tenant(tenant)?;
        records.sort_by(|left, right| {
            right
                .priority
                .cmp(&left.priority)
                .then_with(|| right.score.cmp(&left.score))
                .then_with(|| left.received_at.cmp(&right.received_at))
                .then_with(|| left.id.0.cmp(&right.id.0))
        });
        records.truncate(limit);
        Ok(records)
    }

    /// Score without persisting, using `config` or the service default.
    pub fn preview(&self, input: &ScoringInput, config: Option<&ScoringConfig>) -> ScoringResult {
        score_enquiry(input, config.unwrap_or(&self.default_config))
    }

    /// Save a tenant's scoring config, returning any authoring warnings. Warnings never block
    /// the save.
    pub fn update_scoring_config(
        &self,
        tenant: &TenantId,
        config: ScoringConfig,
    ) -> Result<Vec<ConfigWarning>, IntakeError> {
        if tenant.0.trim().is_empty() {
            return Err(IntakeError::MissingTenant);
        }

        let warnings = config.validate();
        log_warnings(Some(tenant), &warnings);
        self.settings.save_scoring_config(tenant, config)?;
        info!(tenant = %tenant.0, warnings = warnings.len(), "scoring config saved");
        Ok(warnings)
    }

    pub fn default_config(&self) -> &ScoringConfig {
        &self.default_config
    }

    fn config_for(&self, tenant: &TenantId) -> Result<ScoringConfig, IntakeError> {
        let config = self
            .settings
            .scoring_config(tenant)?
            .unwrap_or_else(|| self.default_config.clone());
        Ok(config)
    }

    fn notify_urgent(&self, record: &EnquiryRecord) {
        let mut details = BTreeMap::new();
        details.insert("score".to_string(), record.score.to_string());
        details.insert("priority".to_string(), record.priority.label().to_string());
        if let Some(name) = &record.submission.name {
            details.insert("name".to_string(), name.clone());
        }

        let alert = LeadAlert {
            template: "lead_urgent".to_string(),
            enquiry_id: record.id.clone(),
            tenant_id: record.tenant_id.clone(),
            details,
        };

        if let Err(err) = self.alerts.publish(alert) {
            warn!(enquiry_id = %record.id.0, error = %err, "urgent lead alert not delivered");
        }
    }
}

fn log_warnings(tenant: Option<&TenantId>, warnings: &[ConfigWarning]) {
    let tenant = tenant.map(|tenant| tenant.0.as_str()).unwrap_or("default");
    for warning in warnings {
        warn!(tenant, %warning, "scoring config warning");
    }
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("enquiry is missing a tenant id")]
    MissingTenant,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
