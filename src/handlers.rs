use crate::errors::AppError;
use crate::models::{
    BlockView, ClearRequest, ClearResponse, HourState, NowResponse, Priority, SaveHourRequest,
    SaveHourResponse, ScheduleResponse, ThemeResponse,
};
use crate::schedule::{ClearDecision, Notice};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::theme::toggle_theme;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let mut session = state.session.lock().await;
    let theme = session.theme;
    let scheduler = session.reload(&state.keys, &state.oracle);
    let blocks = scheduler.blocks(&state.oracle);
    Html(render_index(&state.oracle.header_date(), theme, &blocks))
}

pub async fn get_schedule(State(state): State<AppState>) -> Result<Json<ScheduleResponse>, AppError> {
    let mut session = state.session.lock().await;
    let theme = session.theme;
    let scheduler = session.reload(&state.keys, &state.oracle);

    Ok(Json(ScheduleResponse {
        date: state.oracle.header_date(),
        day_key: scheduler.day_key().to_string(),
        theme,
        empty_reason: scheduler.empty_reason(),
        blocks: scheduler.blocks(&state.oracle),
        now: state.oracle.now_offset(),
    }))
}

pub async fn save_hour(
    State(state): State<AppState>,
    Path(hour): Path<u8>,
    Json(payload): Json<SaveHourRequest>,
) -> Result<Json<SaveHourResponse>, AppError> {
    let block = apply_save(&state, hour, &payload.text, payload.priority).await?;
    Ok(Json(SaveHourResponse {
        block,
        status: Notice::Saved.message(),
    }))
}

pub async fn save_hour_form(
    State(state): State<AppState>,
    Path(hour): Path<u8>,
    Form(payload): Form<SaveHourRequest>,
) -> Result<Redirect, AppError> {
    apply_save(&state, hour, &payload.text, payload.priority).await?;
    Ok(Redirect::to("/"))
}

pub async fn clear_day(
    State(state): State<AppState>,
    Json(payload): Json<ClearRequest>,
) -> Result<Json<ClearResponse>, AppError> {
    let mut session = state.session.lock().await;
    let session = &mut *session;
    let notice = session
        .scheduler
        .clear_day(&mut session.store, ClearDecision::from(payload.confirm));

    if let Some(notice) = notice {
        persist_data(&state.data_path, &session.store).await?;
        info!(day = %session.scheduler.day_key(), "{}", notice.message());
    }

    Ok(Json(ClearResponse {
        cleared: notice.is_some(),
        status: notice.map(Notice::message),
        blocks: session.scheduler.blocks(&state.oracle),
    }))
}

/// Minute tick: reclassifies hours and moves the now-indicator. Reads only the clock.
pub async fn get_now(State(state): State<AppState>) -> Json<NowResponse> {
    let oracle = &state.oracle;
    let hours = oracle
        .range()
        .hours()
        .map(|hour| HourState {
            hour,
            state: oracle.classify(hour),
        })
        .collect();

    Json(NowResponse {
        hours,
        now: oracle.now_offset(),
        focus_hour: oracle.focus_hour(),
    })
}

pub async fn theme_toggle(State(state): State<AppState>) -> Result<Json<ThemeResponse>, AppError> {
    let mut session = state.session.lock().await;
    let current = session.theme;
    let (theme, notice) = toggle_theme(&mut session.store, &state.keys, current);
    session.theme = theme;

    persist_data(&state.data_path, &session.store).await?;
    info!(theme = theme.as_str(), "{}", notice.message());

    Ok(Json(ThemeResponse {
        theme,
        status: notice.message().to_string(),
    }))
}

async fn apply_save(
    state: &AppState,
    hour: u8,
    text: &str,
    priority: Priority,
) -> Result<BlockView, AppError> {
    let mut session = state.session.lock().await;
    let session = &mut *session;
    let notice = session
        .scheduler
        .save_hour(&mut session.store, hour, text, priority)?;

    persist_data(&state.data_path, &session.store).await?;
    info!(day = %session.scheduler.day_key(), hour, priority = priority.as_str(), "{}", notice.message());

    session
        .scheduler
        .block(hour, &state.oracle)
        .ok_or_else(|| AppError::bad_request(format!("hour {hour} is not scheduled")))
}
