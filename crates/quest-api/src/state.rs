use std::sync::Arc;

use quest_core::{GameError, GameFacade, UserDirectory};
use tracing::error;

use crate::error::ApiError;
use crate::graphql::{QuestSchema, build_schema};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub game: Arc<GameFacade>,
    pub users: Arc<UserDirectory>,
    pub schema: QuestSchema,
    /// Basic auth on /graphql, admin role for mutations.
    pub graphql_auth: bool,
}

impl AppStateInner {
    pub fn new(game: Arc<GameFacade>, graphql_auth: bool) -> AppState {
        let users = game.users().clone();
        let schema = build_schema(game.clone(), users.clone(), graphql_auth);
        Arc::new(Self {
            game,
            users,
            schema,
            graphql_auth,
        })
    }
}

/// Run facade work off the async runtime. The facades hit SQLite and
/// Argon2, both blocking.
pub async fn run_blocking<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&AppStateInner) -> Result<T, GameError> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal
        })?
        .map_err(ApiError::from)
}
