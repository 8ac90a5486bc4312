mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{DISTANCE_TO_SEARCH, get, post_json, send};

fn nearby(password: &str, distance: f64) -> serde_json::Value {
    json!({
        "userName": "t1",
        "password": password,
        "lat": 55.77,
        "lon": 12.48,
        "distance": distance,
    })
}

#[tokio::test]
async fn nearby_finds_team2_inside_range() {
    let t = common::app(false);
    let (status, body) = send(
        &t.app,
        post_json("/api/game/nearbyplayers", &nearby("secret", DISTANCE_TO_SEARCH)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let players = body.as_array().unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0]["name"], "Team2");
    assert_eq!(players[0]["userName"], "t2");
    assert_eq!(players[0]["lat"], 55.77);
    assert_eq!(players[0]["lon"], 12.48);
}

#[tokio::test]
async fn nearby_finds_team2_and_team3_in_order() {
    let t = common::app(false);
    let (status, body) = send(
        &t.app,
        post_json("/api/game/nearbyplayers", &nearby("secret", DISTANCE_TO_SEARCH + 1.0)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Team2", "Team3"]);
}

#[tokio::test]
async fn nearby_finds_nobody_out_of_range() {
    let t = common::app(false);
    let (status, body) = send(
        &t.app,
        post_json("/api/game/nearbyplayers", &nearby("secret", DISTANCE_TO_SEARCH - 2.0)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn nearby_with_wrong_credentials_is_403() {
    let t = common::app(false);
    let (status, body) = send(
        &t.app,
        post_json("/api/game/nearbyplayers", &nearby("xxxx", DISTANCE_TO_SEARCH)),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 403);
    assert_eq!(body["message"], "Wrong username or password");
}

#[tokio::test]
async fn malformed_body_is_structured_400() {
    let t = common::app(false);
    let (status, body) = send(
        &t.app,
        post_json("/api/game/nearbyplayers", &json!({ "userName": "t1" })),
    )
    .await;

    assert!(status.is_client_error());
    assert_eq!(body["code"], status.as_u16());
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn post_found_when_reached() {
    let t = common::app(false);
    let (status, body) = send(
        &t.app,
        post_json(
            "/api/game/getPostIfReached",
            &json!({ "postId": "Post1", "lat": 55.77, "lon": 12.49 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "postId": "Post1", "task": "1+1", "isUrl": false }));
}

#[tokio::test]
async fn post_not_reached_is_400() {
    let t = common::app(false);
    let (status, body) = send(
        &t.app,
        post_json(
            "/api/game/getPostIfReached",
            &json!({ "postId": "Post1", "lat": 55.78, "lon": 12.49 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "code": 400, "message": "Post not reached" }));
}

#[tokio::test]
async fn game_area_is_lat_first() {
    let t = common::app(false);
    let (status, body) = send(&t.app, get("/api/game/gamearea")).await;

    assert_eq!(status, StatusCode::OK);
    let coords = body["coordinates"].as_array().unwrap();
    assert_eq!(coords.len(), 7);
    assert_eq!(coords[0]["latitude"], 55.77594546428934);
    assert_eq!(coords[0]["longitude"], 12.544240951538086);
}

#[tokio::test]
async fn area_check_inside_and_outside() {
    let t = common::app(false);

    let (status, body) = send(&t.app, get("/api/game/isuserinarea/12.565/55.78")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": true, "msg": "Point was inside the tested polygon" })
    );

    let (_, body) = send(&t.app, get("/api/game/isuserinarea/12.48/55.77")).await;
    assert_eq!(
        body,
        json!({ "status": false, "msg": "Point was NOT inside tested polygon" })
    );
}

#[tokio::test]
async fn area_check_with_bad_number_is_400() {
    let t = common::app(false);
    let (status, body) = send(&t.app, get("/api/game/isuserinarea/east/55.78")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn greetings() {
    let t = common::app(false);
    let (_, body) = send(&t.app, get("/api/dummy")).await;
    assert_eq!(body, json!({ "msg": "Hello" }));
    let (_, body) = send(&t.app, get("/api/game/")).await;
    assert_eq!(body, json!({ "msg": "Welcome to the Game API!" }));
}

#[tokio::test]
async fn unknown_api_path_is_json_404() {
    let t = common::app(false);
    let (status, body) = send(&t.app, get("/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "code": 404, "msg": "this API does not contain this endpoint" })
    );
}

#[tokio::test]
async fn wrong_method_on_api_route_is_json_404() {
    let t = common::app(false);
    let expected = json!({ "code": 404, "msg": "this API does not contain this endpoint" });

    let (status, body) = send(&t.app, get("/api/game/nearbyplayers")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, expected);

    let (status, body) = send(&t.app, post_json("/api/game/gamearea", &json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, expected);
}

#[tokio::test]
async fn nearby_refreshes_caller_position() {
    let t = common::app(false);
    let before = t.db.get_position("t1").unwrap().unwrap();
    let (status, _) = send(
        &t.app,
        post_json(
            "/api/game/nearbyplayers",
            &json!({ "userName": "t1", "password": "secret", "lat": 55.7705, "lon": 12.4805, "distance": 5 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let after = t.db.get_position("t1").unwrap().unwrap();
    assert_eq!(after.lat, 55.7705);
    assert!(after.last_updated_ms >= before.last_updated_ms);
}
