#![allow(dead_code)]

use std::sync::Arc;

use argon2::{Algorithm, Argon2, Params, Version};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use quest_api::{AppStateInner, router};
use quest_core::{GameConfig, GameFacade, NewPost, UserDirectory};
use quest_db::Database;
use quest_geo::{build_position, latitude_inside, latitude_outside};
use quest_types::{NewUser, Role};

pub const DISTANCE_TO_SEARCH: f64 = 10.0;

pub struct TestApp {
    pub app: Router,
    pub db: Arc<Database>,
}

/// Teams t1..t3 ("secret"), an admin ("admin"/"boss"), three fresh
/// positions around (55.77, 12.48) and Post1 at (55.77, 12.49).
pub fn app(graphql_auth: bool) -> TestApp {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let argon2 = Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(8, 1, 1, None).unwrap(),
    );
    let users = Arc::new(UserDirectory::with_argon2(db.clone(), argon2).unwrap());
    let game = Arc::new(GameFacade::new(db.clone(), users.clone(), GameConfig::default()).unwrap());

    for (user_name, name, password, role) in [
        ("t1", "Team1", "secret", Role::Team),
        ("t2", "Team2", "secret", Role::Team),
        ("t3", "Team3", "secret", Role::Team),
        ("admin", "Admin", "boss", Role::Admin),
    ] {
        users
            .add_user(NewUser {
                name: name.into(),
                user_name: user_name.into(),
                password: password.into(),
                role,
            })
            .unwrap();
    }

    db.upsert_position(&build_position(12.48, 55.77, "t1", "Team1")).unwrap();
    db.upsert_position(&build_position(
        12.48,
        latitude_inside(55.77, DISTANCE_TO_SEARCH),
        "t2",
        "Team2",
    ))
    .unwrap();
    db.upsert_position(&build_position(
        12.48,
        latitude_outside(55.77, DISTANCE_TO_SEARCH),
        "t3",
        "Team3",
    ))
    .unwrap();

    game.add_post(NewPost {
        id: "Post1".into(),
        task_text: "1+1".into(),
        is_url: false,
        solution: "2".into(),
        lon: 12.49,
        lat: 55.77,
    })
    .unwrap();

    let state = AppStateInner::new(game, graphql_auth);
    TestApp {
        app: router(state, None),
        db,
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
