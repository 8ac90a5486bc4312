use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;

use quest_types::GeoPoint;
use quest_types::api::{AreaStatus, Msg, NearbyPlayersRequest, PostReachedRequest};

use crate::error::ApiError;
use crate::state::{AppState, run_blocking};

pub async fn dummy() -> impl IntoResponse {
    Json(Msg { msg: "Hello".into() })
}

pub async fn welcome() -> impl IntoResponse {
    Json(Msg {
        msg: "Welcome to the Game API!".into(),
    })
}

/// GET /api/game/gamearea: the play area, latitude first.
pub async fn game_area(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.game.client_area())
}

/// GET /api/game/isuserinarea/{lon}/{lat}
pub async fn is_user_in_area(
    State(state): State<AppState>,
    WithRejection(Path((lon, lat)), _): WithRejection<Path<(f64, f64)>, ApiError>,
) -> impl IntoResponse {
    let status = state.game.is_inside_area(GeoPoint::new(lon, lat));
    let msg = if status {
        "Point was inside the tested polygon"
    } else {
        "Point was NOT inside tested polygon"
    };
    Json(AreaStatus {
        status,
        msg: msg.into(),
    })
}

/// POST /api/game/nearbyplayers: report own position, list players in range.
pub async fn nearby_players(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<NearbyPlayersRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let players = run_blocking(&state, move |s| {
        s.game
            .nearby_players(&req.user_name, &req.password, req.lat, req.lon, req.distance)
    })
    .await?;

    Ok(Json(players))
}

/// POST /api/game/getPostIfReached
pub async fn get_post_if_reached(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<PostReachedRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let post = run_blocking(&state, move |s| {
        s.game.get_post_if_reached(&req.post_id, req.lat, req.lon)
    })
    .await?;

    Ok(Json(post))
}
