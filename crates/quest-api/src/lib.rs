pub mod error;
pub mod game;
pub mod graphql;
pub mod middleware;
pub mod state;

use std::path::Path;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower_http::services::ServeDir;

pub use state::{AppState, AppStateInner};

/// All routes: the REST game API under `/api`, GraphQL at `/graphql`, and
/// optionally a static directory for everything else.
pub fn router(state: AppState, public_dir: Option<&Path>) -> Router {
    let api_routes = Router::new()
        .route("/dummy", get(game::dummy))
        .route("/game", get(game::welcome))
        .route("/game/", get(game::welcome))
        .route("/game/gamearea", get(game::game_area))
        .route("/game/isuserinarea/{lon}/{lat}", get(game::is_user_in_area))
        .route("/game/nearbyplayers", post(game::nearby_players))
        .route("/game/getPostIfReached", post(game::get_post_if_reached))
        .method_not_allowed_fallback(error::api_not_found)
        .fallback(error::api_not_found);

    let mut graphql_routes = Router::new()
        .route("/graphql", get(graphql::graphiql).post(graphql::graphql_handler));
    if state.graphql_auth {
        graphql_routes = graphql_routes.layer(from_fn_with_state(
            state.clone(),
            middleware::require_basic_auth,
        ));
    }

    let app = Router::new()
        .nest("/api", api_routes)
        .merge(graphql_routes)
        .with_state(state);

    match public_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    }
}
