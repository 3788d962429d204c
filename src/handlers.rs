use crate::errors::AppError;
use crate::models::{ChartSeries, LimitRequest, NameRequest, PunishmentRequest, RosterView};
use crate::persistence::flush;
use crate::roster::RosterStore;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use tracing::debug;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let roster = state.roster.lock().await;
    Html(render_index(&roster.view()))
}

pub async fn get_roster(State(state): State<AppState>) -> Json<RosterView> {
    let roster = state.roster.lock().await;
    Json(roster.view())
}

pub async fn get_chart(State(state): State<AppState>) -> Json<ChartSeries> {
    let roster = state.roster.lock().await;
    Json(roster.chart_series())
}

pub async fn add_member(
    State(state): State<AppState>,
    Json(payload): Json<NameRequest>,
) -> Json<RosterView> {
    Json(apply_intent(&state, |roster| {
        roster.set_pending_name(payload.name);
        if let Some(id) = roster.add_pending_member() {
            debug!(id, "added member");
        }
    })
    .await)
}

pub async fn remove_member(State(state): State<AppState>, Path(id): Path<u32>) -> Json<RosterView> {
    Json(apply_intent(&state, |roster| roster.remove_member(id)).await)
}

pub async fn begin_edit(State(state): State<AppState>, Path(id): Path<u32>) -> Json<RosterView> {
    Json(apply_intent(&state, |roster| roster.begin_edit(id)).await)
}

pub async fn rename_member(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(payload): Json<NameRequest>,
) -> Json<RosterView> {
    Json(apply_intent(&state, |roster| roster.rename_member(id, &payload.name)).await)
}

pub async fn set_editing_name(
    State(state): State<AppState>,
    Json(payload): Json<NameRequest>,
) -> Json<RosterView> {
    Json(apply_intent(&state, |roster| roster.set_editing_name(payload.name)).await)
}

pub async fn cancel_edit(State(state): State<AppState>) -> Json<RosterView> {
    Json(apply_intent(&state, RosterStore::cancel_edit).await)
}

pub async fn add_point(State(state): State<AppState>, Path(id): Path<u32>) -> Json<RosterView> {
    Json(apply_intent(&state, |roster| roster.add_point(id)).await)
}

pub async fn remove_point(State(state): State<AppState>, Path(id): Path<u32>) -> Json<RosterView> {
    Json(apply_intent(&state, |roster| roster.remove_point(id)).await)
}

pub async fn reset_points(State(state): State<AppState>) -> Result<Json<RosterView>, AppError> {
    require_limit(&state).await?;
    Ok(Json(apply_intent(&state, RosterStore::reset_all_points).await))
}

pub async fn set_limit(
    State(state): State<AppState>,
    Json(payload): Json<LimitRequest>,
) -> Result<Json<RosterView>, AppError> {
    require_limit(&state).await?;
    Ok(Json(
        apply_intent(&state, |roster| roster.set_late_limit(payload.limit)).await,
    ))
}

pub async fn set_punishment(
    State(state): State<AppState>,
    Json(payload): Json<PunishmentRequest>,
) -> Result<Json<RosterView>, AppError> {
    require_limit(&state).await?;
    Ok(Json(
        apply_intent(&state, |roster| roster.set_punishment(payload.punishment)).await,
    ))
}

async fn apply_intent<F>(state: &AppState, intent: F) -> RosterView
where
    F: FnOnce(&mut RosterStore),
{
    let mut roster = state.roster.lock().await;
    intent(&mut roster);
    // Storage writes are blocking file I/O; requires the multi-thread runtime.
    tokio::task::block_in_place(|| flush(state.storage.as_ref(), &mut roster));
    roster.view()
}

async fn require_limit(state: &AppState) -> Result<(), AppError> {
    if state.roster.lock().await.features().has_limit {
        Ok(())
    } else {
        Err(AppError::bad_request("the late limit is disabled for this roster"))
    }
}
