use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{EnquiryId, EnquirySubmission, LeadView, TenantId};
use super::repository::{EnquiryRepository, LeadAlertPublisher, RepositoryError};
use super::scoring::{ScoringConfig, ScoringInput};
use super::service::{EnquiryIntakeService, IntakeError};
use super::settings::ScoringSettingsStore;

const DEFAULT_LEAD_LIMIT: usize = 50;

/// Router builder exposing enquiry intake, lead ranking, and scoring endpoints.
pub fn enquiry_router<R, S, A>(service: Arc<EnquiryIntakeService<R, S, A>>) -> Router
where
    R: EnquiryRepository + 'static,
    S: ScoringSettingsStore + 'static,
    A: LeadAlertPublisher + 'static,
{
    Router::new()
        .route("/api/v1/enquiries", post(submit_handler::<R, S, A>))
        .route(
            "/api/v1/enquiries/:enquiry_id",
            get(enquiry_handler::<R, S, A>),
        )
        .route(
            "/api/v1/enquiries/:enquiry_id/rescore",
            post(rescore_handler::<R, S, A>),
        )
        .route(
            "/api/v1/tenants/:tenant_id/leads",
            get(ranked_leads_handler::<R, S, A>),
        )
        .route(
            "/api/v1/tenants/:tenant_id/scoring-config",
            put(scoring_config_handler::<R, S, A>),
        )
        .route("/api/v1/leads/score", post(preview_handler::<R, S, A>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct LeadListQuery {
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

/// Ad-hoc scoring request; omitting `config` scores with the service default.
#[derive(Debug, Deserialize)]
pub(crate) struct ScorePreviewRequest {
    #[serde(default)]
    pub(crate) input: ScoringInput,
    #[serde(default)]
    pub(crate) config: Option<ScoringConfig>,
}

pub(crate) async fn submit_handler<R, S, A>(
    State(service): State<Arc<EnquiryIntakeService<R, S, A>>>,
    Json(submission): Json<EnquirySubmission>,
) -> Response
where
    R: EnquiryRepository + 'static,
    S: ScoringSettingsStore + 'static,
    A: LeadAlertPublisher + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::ACCEPTED, Json(record.lead_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn enquiry_handler<R, S, A>(
    State(service): State<Arc<EnquiryIntakeService<R, S, A>>>,
    Path(enquiry_id): Path<String>,
) -> Response
where
    R: EnquiryRepository + 'static,
    S: ScoringSettingsStore + 'static,
    A: LeadAlertPublisher + 'static,
{
    match service.get(&EnquiryId(enquiry_id)) {
        Ok(record) => (StatusCode::OK, Json(record.lead_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn rescore_handler<R, S, A>(
    State(service): State<Arc<EnquiryIntakeService<R, S, A>>>,
    Path(enquiry_id): Path<String>,
) -> Response
where
    R: EnquiryRepository + 'static,
    S: ScoringSettingsStore + 'static,
    A: LeadAlertPublisher + 'static,
{
    match service.rescore(&EnquiryId(enquiry_id)) {
        Ok(record) => (StatusCode::OK, Json(record.lead_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn ranked_leads_handler<R, S, A>(
    State(service): State<Arc<EnquiryIntakeService<R, S, A>>>,
    Path(tenant_id): Path<String>,
    Query(query): Query<LeadListQuery>,
) -> Response
where
    R: EnquiryRepository + 'static,
    S: ScoringSettingsStore + 'static,
    A: LeadAlertPublisher + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_LEAD_LIMIT);
    match service.ranked_leads(&TenantId(tenant_id), limit) {
        Ok(records) => {
            let views: Vec<LeadView> = records.iter().map(|record| record.lead_view()).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn scoring_config_handler<R, S, A>(
    State(service): State<Arc<EnquiryIntakeService<R, S, A>>>,
    Path(tenant_id): Path<String>,
    Json(config): Json<ScoringConfig>,
) -> Response
where
    R: EnquiryRepository + 'static,
    S: ScoringSettingsStore + 'static,
    A: LeadAlertPublisher + 'static,
{
    match service.update_scoring_config(&TenantId(tenant_id), config) {
        Ok(warnings) => (StatusCode::OK, Json(json!({ "warnings": warnings }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn preview_handler<R, S, A>(
    State(service): State<Arc<EnquiryIntakeService<R, S, A>>>,
    Json(request): Json<ScorePreviewRequest>,
) -> Response
where
    R: EnquiryRepository + 'static,
    S: ScoringSettingsStore + 'static,
    A: LeadAlertPublisher + 'static,
{
    let result = service.preview(&request.input, request.config.as_ref());
    (StatusCode::OK, Json(result)).into_response()
}

fn error_response(err: IntakeError) -> Response {
    let status = match &err {
        IntakeError::MissingTenant => StatusCode::UNPROCESSABLE_ENTITY,
        IntakeError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        IntakeError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        IntakeError::Repository(RepositoryError::Unavailable(_)) | IntakeError::Settings(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
