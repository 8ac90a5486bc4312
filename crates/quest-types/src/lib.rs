/// Shared types for the quest backend.
///
/// `models` holds the domain records every crate agrees on; `api` holds the
/// JSON shapes of the REST surface. Storage row types live in quest-db.

pub mod api;
pub mod models;

pub use models::{GeoPoint, NewUser, Position, Post, Role, Task, User};
