use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{ErrorCode, OptionalExtension, Row};

use quest_types::{GeoPoint, Position, Post};

use crate::Database;
use crate::geo::latitude_band_deg;
use crate::migrations;
use crate::models::{InsertOutcome, NearbyPositionRow, PositionRow, PostRow, UserRow, to_millis};

impl Database {
    // -- Indexes --

    pub fn create_user_indexes(&self) -> Result<()> {
        self.with_conn(migrations::create_user_indexes)
    }

    pub fn create_game_indexes(&self) -> Result<()> {
        self.with_conn(migrations::create_game_indexes)
    }

    // -- Users --

    pub fn insert_user(&self, row: &UserRow) -> Result<InsertOutcome> {
        self.with_conn(|conn| {
            let res = conn.execute(
                "INSERT INTO users (id, name, user_name, password, role) VALUES (?1, ?2, ?3, ?4, ?5)",
                (&row.id, &row.name, &row.user_name, &row.password, &row.role),
            );
            insert_outcome(res)
        })
    }

    pub fn get_user_by_user_name(&self, user_name: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, name, user_name, password, role FROM users WHERE user_name = ?1",
                    [user_name],
                    map_user,
                )
                .optional()?;
            Ok(row)
        })
    }

    pub fn list_users(&self) -> Result<Vec<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, user_name, password, role FROM users ORDER BY user_name")?;
            let rows = stmt
                .query_map([], map_user)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Positions --

    /// Insert or overwrite the position of `position.user_name` in one
    /// statement. Concurrent writers for the same handle: last one wins.
    pub fn upsert_position(&self, position: &Position) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO positions (user_name, name, last_updated_ms, lon, lat)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(user_name) DO UPDATE SET
                    name = excluded.name,
                    last_updated_ms = excluded.last_updated_ms,
                    lon = excluded.lon,
                    lat = excluded.lat",
                rusqlite::params![
                    position.user_name,
                    position.name,
                    to_millis(position.last_updated),
                    position.location.lon,
                    position.location.lat,
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_position(&self, user_name: &str) -> Result<Option<PositionRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT user_name, name, last_updated_ms, lon, lat FROM positions WHERE user_name = ?1",
                    [user_name],
                    map_position,
                )
                .optional()?;
            Ok(row)
        })
    }

    /// Positions of everyone but `exclude_user_name` within `max_distance_m`
    /// of `center`, nearest first. Rows last updated before `fresh_since`
    /// are treated as expired and never returned.
    pub fn find_positions_near(
        &self,
        center: GeoPoint,
        max_distance_m: f64,
        exclude_user_name: &str,
        fresh_since: DateTime<Utc>,
    ) -> Result<Vec<NearbyPositionRow>> {
        let band = latitude_band_deg(max_distance_m);
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT user_name, name, last_updated_ms, lon, lat, distance FROM (
                    SELECT user_name, name, last_updated_ms, lon, lat,
                           geo_distance(lon, lat, ?1, ?2) AS distance
                    FROM positions
                    WHERE user_name <> ?3
                      AND last_updated_ms >= ?4
                      AND lat BETWEEN ?5 AND ?6
                 )
                 WHERE distance <= ?7
                 ORDER BY distance ASC, user_name ASC",
            )?;

            let rows = stmt
                .query_map(
                    rusqlite::params![
                        center.lon,
                        center.lat,
                        exclude_user_name,
                        to_millis(fresh_since),
                        center.lat - band,
                        center.lat + band,
                        max_distance_m,
                    ],
                    |row| {
                        Ok(NearbyPositionRow {
                            position: map_position(row)?,
                            distance_m: row.get(5)?,
                        })
                    },
                )?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    /// Delete positions last updated before `cutoff`. Returns the count.
    pub fn delete_positions_updated_before(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "DELETE FROM positions WHERE last_updated_ms < ?1",
                [to_millis(cutoff)],
            )?;
            Ok(n)
        })
    }

    // -- Posts --

    pub fn insert_post(&self, post: &Post) -> Result<InsertOutcome> {
        self.with_conn(|conn| {
            let res = conn.execute(
                "INSERT INTO posts (id, task_text, task_is_url, solution, lon, lat)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    post.id,
                    post.task.text,
                    post.task.is_url,
                    post.solution,
                    post.location.lon,
                    post.location.lat,
                ],
            );
            insert_outcome(res)
        })
    }

    /// The post `id`, but only if it lies within `max_distance_m` of `center`.
    pub fn find_post_near(
        &self,
        id: &str,
        center: GeoPoint,
        max_distance_m: f64,
    ) -> Result<Option<PostRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, task_text, task_is_url, solution, lon, lat FROM posts
                     WHERE id = ?1 AND geo_distance(lon, lat, ?2, ?3) <= ?4",
                    rusqlite::params![id, center.lon, center.lat, max_distance_m],
                    map_post,
                )
                .optional()?;
            Ok(row)
        })
    }
}

fn insert_outcome(res: rusqlite::Result<usize>) -> Result<InsertOutcome> {
    match res {
        Ok(_) => Ok(InsertOutcome::Inserted),
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            Ok(InsertOutcome::Duplicate)
        }
        Err(e) => Err(e.into()),
    }
}

fn map_user(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        name: row.get(1)?,
        user_name: row.get(2)?,
        password: row.get(3)?,
        role: row.get(4)?,
    })
}

fn map_position(row: &Row<'_>) -> rusqlite::Result<PositionRow> {
    Ok(PositionRow {
        user_name: row.get(0)?,
        name: row.get(1)?,
        last_updated_ms: row.get(2)?,
        lon: row.get(3)?,
        lat: row.get(4)?,
    })
}

fn map_post(row: &Row<'_>) -> rusqlite::Result<PostRow> {
    Ok(PostRow {
        id: row.get(0)?,
        task_text: row.get(1)?,
        task_is_url: row.get(2)?,
        solution: row.get(3)?,
        lon: row.get(4)?,
        lat: row.get(5)?,
    })
}
