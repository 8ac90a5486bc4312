use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use quest_db::{Database, InsertOutcome};
use quest_geo::{build_position, game_area};
use quest_types::api::{ClientPolygon, NearbyPlayer, ReachedPost};
use quest_types::{GeoPoint, Post, Task};

use crate::error::GameError;
use crate::users::{UserDirectory, Verification};

/// Seconds a reported position stays visible without a refresh.
pub const DEFAULT_POSITION_TTL_SECS: i64 = 30;

/// How close, in metres, a player must be to a post to reach it.
pub const POST_REACH_METERS: f64 = 10.0;

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub position_ttl: Duration,
    pub post_reach_meters: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            position_ttl: Duration::seconds(DEFAULT_POSITION_TTL_SECS),
            post_reach_meters: POST_REACH_METERS,
        }
    }
}

/// Authoring input for a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub id: String,
    pub task_text: String,
    pub is_url: bool,
    pub solution: String,
    pub lon: f64,
    pub lat: f64,
}

pub struct GameFacade {
    db: Arc<Database>,
    users: Arc<UserDirectory>,
    config: GameConfig,
}

impl GameFacade {
    /// Bind the facade to a store and create the position/post indexes.
    /// Safe to repeat against the same store.
    pub fn new(
        db: Arc<Database>,
        users: Arc<UserDirectory>,
        config: GameConfig,
    ) -> Result<Self, GameError> {
        db.create_game_indexes()?;
        Ok(Self { db, users, config })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn users(&self) -> &Arc<UserDirectory> {
        &self.users
    }

    /// Record the caller's position and list the other players within
    /// `distance` metres, nearest first.
    ///
    /// Wrong credentials fail with `Forbidden` before anything is written.
    pub fn nearby_players(
        &self,
        user_name: &str,
        password: &str,
        lat: f64,
        lon: f64,
        distance: f64,
    ) -> Result<Vec<NearbyPlayer>, GameError> {
        let here = GeoPoint::new(lon, lat);
        if !here.is_valid() {
            return Err(GameError::Invalid(format!("Invalid coordinates lat={} lon={}", lat, lon)));
        }
        if !distance.is_finite() || distance < 0.0 {
            return Err(GameError::Invalid(format!("Invalid distance {}", distance)));
        }

        let user = match self.users.verify(user_name, password)? {
            Verification::Verified(user) => user,
            Verification::UnknownUser | Verification::WrongPassword => {
                warn!("Rejected position report for '{}'", user_name);
                return Err(GameError::Forbidden);
            }
        };

        self.db
            .upsert_position(&build_position(lon, lat, &user.user_name, &user.name))?;

        let fresh_since = Utc::now() - self.config.position_ttl;
        let found = self
            .db
            .find_positions_near(here, distance, &user.user_name, fresh_since)?;
        debug!("'{}' sees {} players within {}m", user_name, found.len(), distance);

        // lat/lon echo the caller's coordinates on purpose; see NearbyPlayer.
        Ok(found
            .into_iter()
            .map(|row| NearbyPlayer {
                user_name: row.position.user_name,
                name: row.position.name,
                lat,
                lon,
            })
            .collect())
    }

    /// The task of `post_id` if `(lat, lon)` is within reach of it.
    /// The solution is never returned.
    pub fn get_post_if_reached(
        &self,
        post_id: &str,
        lat: f64,
        lon: f64,
    ) -> Result<ReachedPost, GameError> {
        let here = GeoPoint::new(lon, lat);
        if !here.is_valid() {
            return Err(GameError::Invalid(format!("Invalid coordinates lat={} lon={}", lat, lon)));
        }

        let post: Post = self
            .db
            .find_post_near(post_id, here, self.config.post_reach_meters)?
            .ok_or(GameError::NotReached)?
            .into();

        Ok(ReachedPost {
            post_id: post.id,
            task: post.task.text,
            is_url: post.task.is_url,
        })
    }

    pub fn add_post(&self, new_post: NewPost) -> Result<Post, GameError> {
        if new_post.id.trim().is_empty() {
            return Err(GameError::Invalid("Post id must not be empty".into()));
        }
        let location = GeoPoint::new(new_post.lon, new_post.lat);
        if !location.is_valid() {
            return Err(GameError::Invalid(format!(
                "Invalid coordinates lat={} lon={}",
                new_post.lat, new_post.lon
            )));
        }

        let post = Post {
            id: new_post.id,
            task: Task {
                text: new_post.task_text,
                is_url: new_post.is_url,
            },
            solution: new_post.solution,
            location,
        };

        match self.db.insert_post(&post)? {
            InsertOutcome::Inserted => {
                info!("Post '{}' added", post.id);
                Ok(post)
            }
            InsertOutcome::Duplicate => {
                Err(GameError::Conflict(format!("Post {} already exists", post.id)))
            }
        }
    }

    pub fn is_inside_area(&self, point: GeoPoint) -> bool {
        game_area().contains(point)
    }

    /// The play area with latitude/longitude swapped for map clients.
    pub fn client_area(&self) -> ClientPolygon {
        game_area().to_client()
    }

    /// Delete positions older than the TTL. Returns how many went.
    pub fn prune_expired_positions(&self) -> Result<usize, GameError> {
        let cutoff = Utc::now() - self.config.position_ttl;
        Ok(self.db.delete_positions_updated_before(cutoff)?)
    }
}
