use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};

use super::error::ApiError;
use super::messages::{
    BodyDetail, BodyTable, PauseReply, RelationshipReply, ResetReply, SpeedReply, SpeedRequest,
};
use super::state::AppState;
use crate::sim::clock::{ClockSnapshot, PositionJson};

pub(super) async fn bodies(State(state): State<AppState>) -> Json<BodyTable> {
    let positions = state.clock().positions();
    Json(BodyTable::with_positions(state.registry(), positions))
}

pub(super) async fn body(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<BodyDetail>, ApiError> {
    let registry = state.registry();
    let (Some(body), Some(position)) = (registry.body(&name), state.clock().position(&name)) else {
        return Err(ApiError::BodyNotFound { name });
    };

    Ok(Json(BodyDetail {
        name: body.name.clone(),
        info: body.info.clone(),
        data: body.clone(),
        current_position: PositionJson(position),
    }))
}

pub(super) async fn relationship(
    State(state): State<AppState>,
    Path((body1, body2)): Path<(String, String)>,
) -> Json<RelationshipReply> {
    let registry = state.registry();
    let positions = state.clock().positions();

    let relationship = registry.relationship_or_default(&body1, &body2).into_owned();
    let current_distance_km = registry.distance_km(&body1, &body2, &positions);

    Json(RelationshipReply {
        body1,
        body2,
        relationship,
        current_distance_km,
    })
}

pub(super) async fn toggle_pause(State(state): State<AppState>) -> Json<PauseReply> {
    let mut clock = state.clock();
    let paused = clock.toggle_pause();
    tracing::info!(paused, "pause toggled");
    Json(PauseReply {
        paused,
        time: clock.time(),
    })
}

pub(super) async fn reset(State(state): State<AppState>) -> Json<ResetReply> {
    let mut clock = state.clock();
    let positions = clock.reset();
    tracing::info!("simulation reset");
    Json(ResetReply {
        message: "Simulation reset",
        time: clock.time(),
        positions,
    })
}

pub(super) async fn simulation_state(State(state): State<AppState>) -> Json<ClockSnapshot> {
    Json(state.clock().snapshot().rounded())
}

/// An empty body means the default speed.
pub(super) async fn set_speed(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SpeedReply>, ApiError> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        SpeedRequest::default()
    } else {
        serde_json::from_slice::<SpeedRequest>(&body)?
    };

    let speed = state.clock().set_time_scale(request.speed);
    tracing::info!(requested = request.speed, speed, "time scale set");
    Ok(Json(SpeedReply { speed }))
}
