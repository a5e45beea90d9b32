use super::domain::TenantId;
use super::scoring::ScoringConfig;

/// Tenant-level settings storage; the service falls back to its default config when a tenant
/// has nothing saved.
pub trait ScoringSettingsStore: Send + Sync {
    fn scoring_config(&self, tenant: &TenantId) -> Result<Option<ScoringConfig>, SettingsError>;
    fn save_scoring_config(
        &self,
        tenant: &TenantId,
        config: ScoringConfig,
    ) -> Result<(), SettingsError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings store unavailable: {0}")]
    Unavailable(String),
}
