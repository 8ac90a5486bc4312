//! Database row types. These map directly to SQLite rows; conversions
//! into the shared quest-types models are below.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};

use quest_types::{GeoPoint, Position, Post, Role, Task, User};

pub struct UserRow {
    pub id: String,
    pub name: String,
    pub user_name: String,
    pub password: String,
    pub role: String,
}

pub struct PositionRow {
    pub user_name: String,
    pub name: String,
    pub last_updated_ms: i64,
    pub lon: f64,
    pub lat: f64,
}

/// A position returned by a proximity query, with its distance from the
/// query centre.
pub struct NearbyPositionRow {
    pub position: PositionRow,
    pub distance_m: f64,
}

pub struct PostRow {
    pub id: String,
    pub task_text: String,
    pub task_is_url: bool,
    pub solution: String,
    pub lon: f64,
    pub lat: f64,
}

/// Result of an insert into a table with a unique key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Duplicate,
}

pub fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

pub fn from_millis(ms: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms).ok_or_else(|| anyhow!("Timestamp out of range: {}", ms))
}

impl TryFrom<UserRow> for User {
    type Error = anyhow::Error;

    fn try_from(row: UserRow) -> Result<Self> {
        Ok(User {
            id: row
                .id
                .parse()
                .map_err(|e| anyhow!("Corrupt user id '{}': {}", row.id, e))?,
            role: row.role.parse::<Role>().map_err(|e| anyhow!(e))?,
            name: row.name,
            user_name: row.user_name,
            password: row.password,
        })
    }
}

impl TryFrom<PositionRow> for Position {
    type Error = anyhow::Error;

    fn try_from(row: PositionRow) -> Result<Self> {
        Ok(Position {
            last_updated: from_millis(row.last_updated_ms)?,
            location: GeoPoint::new(row.lon, row.lat),
            user_name: row.user_name,
            name: row.name,
        })
    }
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            task: Task {
                text: row.task_text,
                is_url: row.task_is_url,
            },
            solution: row.solution,
            location: GeoPoint::new(row.lon, row.lat),
        }
    }
}
