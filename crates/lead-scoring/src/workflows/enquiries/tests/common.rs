use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::enquiries::domain::{EnquiryId, EnquiryRecord, EnquirySubmission, TenantId};
use crate::workflows::enquiries::repository::{
    AlertError, EnquiryRepository, LeadAlert, LeadAlertPublisher, RepositoryError,
};
use crate::workflows::enquiries::scoring::{KeywordRule, PriorityThresholds, ScoringConfig};
use crate::workflows::enquiries::settings::{ScoringSettingsStore, SettingsError};
use crate::workflows::enquiries::{enquiry_router, EnquiryIntakeService};

pub(super) type MemoryService = EnquiryIntakeService<MemoryRepository, MemorySettings, MemoryAlerts>;

pub(super) fn tenant() -> TenantId {
    TenantId("sparks-electrical".to_string())
}

pub(super) fn submission(message: &str) -> EnquirySubmission {
    EnquirySubmission {
        tenant_id: tenant(),
        name: Some("Priya Natarajan".to_string()),
        email: Some("priya@example.com".to_string()),
        message: Some(message.to_string()),
        postcode: Some("LS6 2AB".to_string()),
        source: Some("website".to_string()),
        ..EnquirySubmission::default()
    }
}

pub(super) fn urgent_submission() -> EnquirySubmission {
    let mut submission = submission("Emergency: no power since the storm");
    submission.phone = Some("07700 900123".to_string());
    submission
}

pub(super) fn solar_config() -> ScoringConfig {
    ScoringConfig {
        keywords: vec![KeywordRule::new("solar panel", 50)],
        boost_rules: Vec::new(),
        priority_thresholds: PriorityThresholds {
            high: 20,
            urgent: 40,
        },
    }
}

pub(super) fn build_service() -> (
    MemoryService,
    Arc<MemoryRepository>,
    Arc<MemorySettings>,
    Arc<MemoryAlerts>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let settings = Arc::new(MemorySettings::default());
    let alerts = Arc::new(MemoryAlerts::default());
    let service = EnquiryIntakeService::new(
        repository.clone(),
        settings.clone(),
        alerts.clone(),
        ScoringConfig::default(),
    );
    (service, repository, settings, alerts)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<EnquiryId, EnquiryRecord>>>,
}

impl EnquiryRepository for MemoryRepository {
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
        guard.insert(record.id.clone(), record);
        Ok(())
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
pub(super) struct MemorySettings {
    configs: Arc<Mutex<HashMap<TenantId, ScoringConfig>>>,
}

impl ScoringSettingsStore for MemorySettings {
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

#[derive(Default, Clone)]
pub(super) struct MemoryAlerts {
    events: Arc<Mutex<Vec<LeadAlert>>>,
}

impl MemoryAlerts {
    pub(super) fn events(&self) -> Vec<LeadAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl LeadAlertPublisher for MemoryAlerts {
    fn publish(&self, alert: LeadAlert) -> Result<(), AlertError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

pub(super) struct OfflineAlerts;

impl LeadAlertPublisher for OfflineAlerts {
    fn publish(&self, _alert: LeadAlert) -> Result<(), AlertError> {
        Err(AlertError::Transport("sms gateway offline".to_string()))
    }
}

pub(super) struct ConflictRepository;

impl EnquiryRepository for ConflictRepository {
    fn insert(&self, _record: EnquiryRecord) -> Result<EnquiryRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: EnquiryRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &EnquiryId) -> Result<Option<EnquiryRecord>, RepositoryError> {
        Ok(None)
    }

    fn list_for_tenant(&self, _tenant: &TenantId) -> Result<Vec<EnquiryRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableSettings;

impl ScoringSettingsStore for UnavailableSettings {
    fn scoring_config(&self, _tenant: &TenantId) -> Result<Option<ScoringConfig>, SettingsError> {
        Err(SettingsError::Unavailable("settings database offline".to_string()))
    }

    fn save_scoring_config(
        &self,
        _tenant: &TenantId,
        _config: ScoringConfig,
    ) -> Result<(), SettingsError> {
        Err(SettingsError::Unavailable("settings database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    enquiry_router(Arc::new(service))
}
