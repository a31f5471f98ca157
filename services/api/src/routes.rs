use crate::infra::{AppState, SessionEntry};
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use chrono::{DateTime, Utc};
use funding_kitchen::error::AppError;
use funding_kitchen::workflows::intake::{
    section_is_valid, SectionKey, SectionPatch, WizardError, WizardStep,
};
use funding_kitchen::workflows::matching::{FunderMatch, DEFAULT_SEARCH_LIMIT};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug)]
pub(crate) enum ApiError {
    UnknownSession(String),
    App(AppError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::UnknownSession(id) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("unknown session '{id}'") })),
            )
                .into_response(),
            ApiError::App(err) => err.into_response(),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self::App(value)
    }
}

impl From<WizardError> for ApiError {
    fn from(value: WizardError) -> Self {
        Self::App(AppError::Wizard(value))
    }
}

impl From<funding_kitchen::workflows::matching::MatchServiceError> for ApiError {
    fn from(value: funding_kitchen::workflows::matching::MatchServiceError) -> Self {
        Self::App(AppError::MatchService(value))
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CreateSessionRequest {
    #[serde(default)]
    pub(crate) demo: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JumpRequest {
    pub(crate) step: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct StepView {
    pub(crate) index: usize,
    pub(crate) key: WizardStep,
    pub(crate) title: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SectionStatus {
    pub(crate) section: SectionKey,
    pub(crate) valid: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct SessionSnapshot {
    pub(crate) session_id: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) current_step: StepView,
    pub(crate) can_advance: bool,
    pub(crate) searching: bool,
    pub(crate) sections: Vec<SectionStatus>,
    pub(crate) profile: funding_kitchen::workflows::intake::OrgProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) matches: Option<Vec<FunderMatch>>,
}

fn snapshot(session_id: &str, entry: &SessionEntry) -> SessionSnapshot {
    let wizard = &entry.wizard;
    let step = wizard.current_step();
    let profile = wizard.profile();

    SessionSnapshot {
        session_id: session_id.to_string(),
        created_at: entry.created_at,
        current_step: StepView {
            index: step.index(),
            key: step,
            title: step.title(),
        },
        can_advance: wizard.can_advance(),
        searching: wizard.is_searching(),
        sections: SectionKey::ALL
            .iter()
            .map(|key| SectionStatus {
                section: *key,
                valid: section_is_valid(profile, *key),
            })
            .collect(),
        profile: profile.clone(),
        matches: wizard.last_match().map(<[FunderMatch]>::to_vec),
    }
}

pub(crate) fn with_intake_routes() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/intake/sessions",
            axum::routing::post(create_session_endpoint),
        )
        .route(
            "/api/v1/intake/sessions/:id",
            axum::routing::get(get_session_endpoint).delete(delete_session_endpoint),
        )
        .route(
            "/api/v1/intake/sessions/:id/profile",
            axum::routing::patch(update_profile_endpoint),
        )
        .route(
            "/api/v1/intake/sessions/:id/advance",
            axum::routing::post(advance_endpoint),
        )
        .route(
            "/api/v1/intake/sessions/:id/retreat",
            axum::routing::post(retreat_endpoint),
        )
        .route(
            "/api/v1/intake/sessions/:id/jump",
            axum::routing::post(jump_endpoint),
        )
        .route(
            "/api/v1/intake/sessions/:id/match",
            axum::routing::post(run_match_endpoint),
        )
        .route(
            "/api/v1/match/health",
            axum::routing::get(match_health_endpoint),
        )
        .route(
            "/api/v1/match/stats",
            axum::routing::get(match_stats_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn create_session_endpoint(
    Extension(state): Extension<AppState>,
    payload: Option<Json<CreateSessionRequest>>,
) -> Result<(StatusCode, Json<SessionSnapshot>), ApiError> {
    let demo = payload.map(|Json(body)| body.demo).unwrap_or(false);
    let id = state.sessions.create(demo);
    let body = state
        .sessions
        .with_entry(&id, |entry| snapshot(&id, entry))
        .ok_or_else(|| ApiError::UnknownSession(id))?;
    Ok((StatusCode::CREATED, Json(body)))
}

pub(crate) async fn get_session_endpoint(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    state
        .sessions
        .with_entry(&id, |entry| snapshot(&id, entry))
        .map(Json)
        .ok_or(ApiError::UnknownSession(id))
}

pub(crate) async fn delete_session_endpoint(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.sessions.remove(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::UnknownSession(id))
    }
}

pub(crate) async fn update_profile_endpoint(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<SectionPatch>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    state
        .sessions
        .with_entry(&id, |entry| {
            entry.wizard.update_section(patch);
            snapshot(&id, entry)
        })
        .map(Json)
        .ok_or(ApiError::UnknownSession(id))
}

/// Forward navigation carries the semantic gate: the wizard itself only
/// enforces range bounds, so the incomplete-step check lives here.
pub(crate) async fn advance_endpoint(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    state
        .sessions
        .with_entry(&id, |entry| {
            if entry.wizard.current_step() != WizardStep::Review && !entry.wizard.can_advance() {
                return Err(ApiError::from(WizardError::StepIncomplete(
                    entry.wizard.current_step().title(),
                )));
            }
            entry.wizard.advance();
            Ok(snapshot(&id, entry))
        })
        .ok_or(ApiError::UnknownSession(id))?
        .map(Json)
}

pub(crate) async fn retreat_endpoint(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    state
        .sessions
        .with_entry(&id, |entry| {
            entry.wizard.retreat();
            snapshot(&id, entry)
        })
        .map(Json)
        .ok_or(ApiError::UnknownSession(id))
}

/// Jumps are always allowed in any direction; out-of-range indexes are
/// a silent no-op rather than an error.
pub(crate) async fn jump_endpoint(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<JumpRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    state
        .sessions
        .with_entry(&id, |entry| {
            entry.wizard.jump_to(payload.step);
            snapshot(&id, entry)
        })
        .map(Json)
        .ok_or(ApiError::UnknownSession(id))
}

/// Run the match pipeline for a session. The searching flag flips under
/// the session lock before the request goes out, so overlapping
/// searches on one session are refused. The backend call and its
/// landing run on a detached task: the flag clears and the result is
/// stored even when the requesting client disconnects mid-flight and
/// this handler future is dropped at the await.
pub(crate) async fn run_match_endpoint(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let query = state
        .sessions
        .with_entry(&id, |entry| entry.wizard.begin_search())
        .ok_or_else(|| ApiError::UnknownSession(id.clone()))??;

    let sessions = state.sessions.clone();
    let matcher = state.matcher.clone();
    let session_id = id.clone();
    let resolution = tokio::spawn(async move {
        let outcome = matcher.search(&query, DEFAULT_SEARCH_LIMIT).await;
        sessions.with_entry(&session_id, |entry| {
            entry.wizard.complete_search(outcome).map(|_| ())
        })
    });

    resolution
        .await
        .map_err(|err| ApiError::App(AppError::Server(axum::Error::new(err))))?
        .ok_or_else(|| ApiError::UnknownSession(id.clone()))??;

    state
        .sessions
        .with_entry(&id, |entry| snapshot(&id, entry))
        .map(Json)
        .ok_or(ApiError::UnknownSession(id))
}

pub(crate) async fn match_health_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<serde_json::Value> {
    let healthy = state.matcher.health().await;
    Json(json!({ "healthy": healthy }))
}

pub(crate) async fn match_stats_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let stats = state.matcher.stats().await?;
    Ok(Json(stats))
}
