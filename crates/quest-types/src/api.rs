use serde::{Deserialize, Serialize};

// -- Game --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyPlayersRequest {
    pub user_name: String,
    pub password: String,
    pub lat: f64,
    pub lon: f64,
    pub distance: f64,
}

/// One entry of a nearby-players answer.
///
/// `lat`/`lon` echo the caller's own coordinates, not the found player's.
/// Clients in the field depend on this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyPlayer {
    pub user_name: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostReachedRequest {
    pub post_id: String,
    pub lat: f64,
    pub lon: f64,
}

/// A reached post as seen by players. The solution is never included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReachedPost {
    pub post_id: String,
    pub task: String,
    pub is_url: bool,
}

// -- Play area --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaStatus {
    pub status: bool,
    pub msg: String,
}

/// Map-client vertex, latitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClientCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientPolygon {
    pub coordinates: Vec<ClientCoordinate>,
}

// -- Misc --

#[derive(Debug, Serialize, Deserialize)]
pub struct Msg {
    pub msg: String,
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}
