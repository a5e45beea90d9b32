use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{EnquiryId, EnquiryRecord, TenantId};

/// Storage abstraction so the intake service can be exercised in isolation.
pub trait EnquiryRepository: Send + Sync {
    fn insert(&self, record: EnquiryRecord) -> Result<EnquiryRecord, RepositoryError>;
    fn update(&self, record: EnquiryRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &EnquiryId) -> Result<Option<EnquiryRecord>, RepositoryError>;
    fn list_for_tenant(&self, tenant: &TenantId) -> Result<Vec<EnquiryRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound notification hook (SMS or e-mail adapters live outside this crate).
pub trait LeadAlertPublisher: Send + Sync {
    fn publish(&self, alert: LeadAlert) -> Result<(), AlertError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadAlert {
    pub template: String,
    pub enquiry_id: EnquiryId,
    pub tenant_id: TenantId,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}
