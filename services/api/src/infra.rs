use lead_scoring::config::ScoringSettings;
use lead_scoring::workflows::enquiries::{
    AlertError, EnquiryId, EnquiryRecord, EnquiryRepository, LeadAlert, LeadAlertPublisher,
    RepositoryError, ScoringConfig, ScoringConfigError, ScoringSettingsStore, SettingsError,
    TenantId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryEnquiryRepository {
    records: Arc<Mutex<HashMap<EnquiryId, EnquiryRecord>>>,
}

impl EnquiryRepository for InMemoryEnquiryRepository {
    fn insert(&self, record: EnquiryRecord) -> Result<EnquiryRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: EnquiryRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &EnquiryId) -> Result<Option<EnquiryRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_for_tenant(&self, tenant: &TenantId) -> Result<Vec<EnquiryRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| &record.tenant_id == tenant)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryScoringSettings {
    configs: Arc<Mutex<HashMap<TenantId, ScoringConfig>>>,
}

impl ScoringSettingsStore for InMemoryScoringSettings {
    fn scoring_config(&self, tenant: &TenantId) -> Result<Option<ScoringConfig>, SettingsError> {
        let guard = self.configs.lock().expect("settings mutex poisoned");
        Ok(guard.get(tenant).cloned())
    }

    fn save_scoring_config(
        &self,
        tenant: &TenantId,
        config: ScoringConfig,
    ) -> Result<(), SettingsError> {
        let mut guard = self.configs.lock().expect("settings mutex poisoned");
        guard.insert(tenant.clone(), config);
        Ok(())
    }
}

/// Writes alerts to the log until an SMS/e-mail adapter is wired in.
#[derive(Default, Clone)]
pub(crate) struct LoggingAlertPublisher;

impl LeadAlertPublisher for LoggingAlertPublisher {
    fn publish(&self, alert: LeadAlert) -> Result<(), AlertError> {
        info!(
            template = %alert.template,
            enquiry_id = %alert.enquiry_id.0,
            tenant = %alert.tenant_id.0,
            "lead alert raised"
        );
        Ok(())
    }
}

/// Service-wide rules used for tenants without saved settings.
pub(crate) fn default_scoring_config(
    settings: &ScoringSettings,
) -> Result<ScoringConfig, ScoringConfigError> {
    match &settings.default_config_path {
        Some(path) => {
            let config = ScoringConfig::from_path(path)?;
            info!(path = %path.display(), "loaded default scoring config");
            Ok(config)
        }
        None => Ok(ScoringConfig::default()),
    }
}
