use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use bvb_persistence_sea_orm::{
    ActionRepositoryImpl, GameRepositoryImpl, PlayerRepositoryImpl, connect, create_schema,
};
use bvb_stats_api::router;
use bvb_stats_app::build_application;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn setup() -> Router {
    let db = connect("sqlite::memory:", 1).await.unwrap();
    create_schema(&db).await.unwrap();
    let app = build_application(
        Arc::new(PlayerRepositoryImpl::new(db.clone())),
        Arc::new(GameRepositoryImpl::new(db.clone())),
        Arc::new(ActionRepositoryImpl::new(db)),
    );
    router(Arc::new(app))
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Method::GET, uri, None).await
}

async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, Method::POST, uri, Some(body)).await
}

/// Players A (1) and B (2) facing each other in game 1 on 2024-01-01.
async fn setup_game() -> Router {
    let router = setup().await;
    assert_eq!(
        post(&router, "/api/players", json!({"name": "A"})).await,
        (StatusCode::OK, json!({"id": 1, "name": "A"}))
    );
    assert_eq!(
        post(&router, "/api/players", json!({"name": "B"})).await,
        (StatusCode::OK, json!({"id": 2, "name": "B"}))
    );
    let (status, game) = post(
        &router,
        "/api/games",
        json!({"date": "2024-01-01", "team1": [1], "team2": [2]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        game,
        json!({"id": 1, "date": "2024-01-01", "team1": [1], "team2": [2]})
    );
    router
}

#[tokio::test]
async fn test_record_ace_and_summarize() {
    let router = setup_game().await;

    let (status, stat) = post(
        &router,
        "/api/games/1/stats",
        json!({
            "base_stat": {"player_id": 1, "action_type": "serving", "timestamp": "2024-01-01T10:00:00Z"},
            "serve_stat": {"is_ace": true}
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        stat["base"],
        json!({
            "id": 1,
            "game_id": 1,
            "player_id": 1,
            "player_name": "A",
            "action_type": "serving",
            "timestamp": "2024-01-01T10:00:00Z"
        })
    );
    assert_eq!(stat["details"]["stat_id"], json!(1));
    assert_eq!(stat["details"]["is_ace"], json!(true));
    assert_eq!(stat["details"]["is_missed"], json!(false));

    let (status, summary) = get(&router, "/api/stats/summary/player/1/game/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["player"], json!({"id": 1, "name": "A"}));
    assert_eq!(summary["game"]["id"], json!(1));
    assert_eq!(summary["total_serves"], json!(1));
    assert_eq!(summary["aces"], json!(1));
    assert_eq!(summary["missed_serves"], json!(0));
    assert_eq!(summary["total_attacks"], json!(0));

    let (status, _) = get(&router, "/api/stats/summary/player/1/game/9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_attack_categories() {
    let router = setup_game().await;
    let (status, _) = post(
        &router,
        "/api/games/1/stats",
        json!({
            "base_stat": {"player_id": 2, "action_type": "attack"},
            "attack_stat": {"attack_type": "hard", "attack_direction": "line", "is_kill": true}
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&router, "/api/players/2/stats").await;
    assert_eq!(status, StatusCode::OK);
    let categories = body["categories"].as_object().unwrap();
    assert_eq!(categories.len(), 1);
    let attack = &categories["attack"];
    assert_eq!(attack["total_attacks"], json!(1));
    assert_eq!(attack["kills"], json!(1));
    assert_eq!(attack["attack_types"], json!({"hard": 1}));
    assert_eq!(attack["attack_directions"], json!({"line": 1}));

    assert_eq!(
        get(&router, "/api/players/1/stats?game_id=1").await,
        (StatusCode::OK, json!({"categories": {}}))
    );
    let (status, _) = get(&router, "/api/players/7/stats").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_and_delete_stats() {
    let router = setup_game().await;
    assert_eq!(
        get(&router, "/api/games/1/stats").await,
        (StatusCode::OK, json!([]))
    );

    for (player_id, second, action_type, detail) in [
        (1, 0, "dig", json!({"dig_stat": {"is_successful": true}})),
        (2, 5, "block", json!({"block_stat": {"is_stuff": true}})),
        (1, 9, "set", json!({"set_stat": {"set_type": "hand"}})),
    ] {
        let mut body = detail;
        body["base_stat"] = json!({
            "player_id": player_id,
            "action_type": action_type,
            "timestamp": format!("2024-01-01T10:00:0{}", second)
        });
        let (status, _) = post(&router, "/api/games/1/stats", body).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, stats) = get(&router, "/api/games/1/stats").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = stats
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["base"]["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);

    let (_, only_a) = get(&router, "/api/games/1/stats?player_id=1&action_type=dig").await;
    assert_eq!(only_a.as_array().unwrap().len(), 1);
    assert_eq!(only_a[0]["details"]["is_successful"], json!(true));

    let (_, by_player) = get(&router, "/api/stats/player/1").await;
    assert_eq!(by_player.as_array().unwrap().len(), 2);

    let (status, deleted) = send(&router, Method::DELETE, "/api/games/1/stats/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["base"]["action_type"], json!("block"));
    assert_eq!(deleted["details"]["is_stuff"], json!(true));

    let (_, stats) = get(&router, "/api/games/1/stats").await;
    assert!(stats.as_array().unwrap().iter().all(|s| s["base"]["id"] != json!(2)));

    let (status, body) = send(&router, Method::DELETE, "/api/games/1/stats/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_rejected_stats() {
    let router = setup_game().await;
    post(&router, "/api/players", json!({"name": "C"})).await;

    let cases = [
        (
            "/api/games/9/stats",
            json!({"base_stat": {"player_id": 1, "action_type": "block"}, "block_stat": {}}),
            StatusCode::NOT_FOUND,
        ),
        (
            "/api/games/1/stats",
            json!({"base_stat": {"player_id": 8, "action_type": "block"}, "block_stat": {}}),
            StatusCode::NOT_FOUND,
        ),
        (
            "/api/games/1/stats",
            json!({"base_stat": {"player_id": 3, "action_type": "block"}, "block_stat": {}}),
            StatusCode::BAD_REQUEST,
        ),
        (
            "/api/games/1/stats",
            json!({"base_stat": {"player_id": 1, "action_type": "attack"}, "serve_stat": {}}),
            StatusCode::BAD_REQUEST,
        ),
        (
            "/api/games/1/stats",
            json!({"base_stat": {"player_id": 1, "action_type": "block", "game_id": 2}, "block_stat": {}}),
            StatusCode::BAD_REQUEST,
        ),
        (
            "/api/games/1/stats",
            json!({"base_stat": {"player_id": 1, "action_type": "block"}, "block_stat": {}, "dig_stat": {}}),
            StatusCode::BAD_REQUEST,
        ),
        (
            "/api/games/1/stats",
            json!({"base_stat": {"player_id": 1, "action_type": "spike"}, "block_stat": {}}),
            StatusCode::BAD_REQUEST,
        ),
        (
            "/api/games/1/stats",
            json!({"base_stat": {"player_id": 1, "action_type": "block", "timestamp": "noon"}, "block_stat": {}}),
            StatusCode::BAD_REQUEST,
        ),
    ];
    for (uri, body, expected) in cases {
        let (status, response) = post(&router, uri, body.clone()).await;
        assert_eq!(status, expected, "{}", body);
        assert!(response["error"].is_string(), "{}", body);
    }

    assert_eq!(
        get(&router, "/api/games/1/stats").await,
        (StatusCode::OK, json!([]))
    );
    let (status, _) = get(&router, "/api/games/9/stats").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_player_endpoints() {
    let router = setup_game().await;

    let (status, body) = post(&router, "/api/players", json!({"name": "A"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    let (status, _) = post(&router, "/api/players", json!({"name": "  "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        get(&router, "/api/players/1").await,
        (StatusCode::OK, json!({"id": 1, "name": "A"}))
    );

    let patch = |id: i32, name: &str| {
        let router = router.clone();
        let uri = format!("/api/players/{}", id);
        let body = json!({ "name": name });
        async move { send(&router, Method::PATCH, &uri, Some(body)).await }
    };
    assert_eq!(
        patch(1, "Ann").await,
        (StatusCode::OK, json!({"success": true}))
    );
    assert_eq!(patch(1, "B").await.0, StatusCode::CONFLICT);
    assert_eq!(patch(1, "").await.0, StatusCode::BAD_REQUEST);
    assert_eq!(patch(9, "Zed").await.0, StatusCode::NOT_FOUND);

    let (_, players) = get(&router, "/api/players").await;
    assert_eq!(
        players,
        json!([{"id": 1, "name": "Ann"}, {"id": 2, "name": "B"}])
    );

    assert_eq!(
        send(&router, Method::DELETE, "/api/players/1", None).await.0,
        StatusCode::CONFLICT
    );
    post(&router, "/api/players", json!({"name": "C"})).await;
    assert_eq!(
        send(&router, Method::DELETE, "/api/players/3", None).await,
        (StatusCode::OK, json!({"id": 3, "name": "C"}))
    );
    assert_eq!(
        get(&router, "/api/players/3").await.0,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_game_endpoints() {
    let router = setup_game().await;

    let (status, _) = post(
        &router,
        "/api/games",
        json!({"date": "2024-01-02", "team1": [1], "team2": [1]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = post(
        &router,
        "/api/games",
        json!({"date": "2024-01-02", "team1": [1], "team2": [5]}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, later) = post(
        &router,
        "/api/games",
        json!({"date": "2024-02-01", "team1": [2], "team2": [1]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, games) = get(&router, "/api/games").await;
    let ids: Vec<&Value> = games.as_array().unwrap().iter().map(|g| &g["id"]).collect();
    assert_eq!(ids, vec![&later["id"], &json!(1)]);

    post(
        &router,
        "/api/games/1/stats",
        json!({"base_stat": {"player_id": 1, "action_type": "dig"}, "dig_stat": {}}),
    )
    .await;
    assert_eq!(
        send(&router, Method::DELETE, "/api/games/1", None).await.0,
        StatusCode::CONFLICT
    );
    send(&router, Method::DELETE, "/api/games/1/stats/1", None).await;
    let (status, deleted) = send(&router, Method::DELETE, "/api/games/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], json!(1));
    assert_eq!(get(&router, "/api/games/1").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_players_summary() {
    let router = setup_game().await;
    post(
        &router,
        "/api/games",
        json!({"date": "2024-01-02", "team1": [1], "team2": [2]}),
    )
    .await;
    for (game_id, body) in [
        (1, json!({"base_stat": {"player_id": 1, "action_type": "serving"}, "serve_stat": {"is_ace": true}})),
        (2, json!({"base_stat": {"player_id": 1, "action_type": "attack"}, "attack_stat": {"is_kill": true}})),
        (2, json!({"base_stat": {"player_id": 1, "action_type": "attack"}, "attack_stat": {"is_kill": true}})),
    ] {
        let (status, _) = post(&router, &format!("/api/games/{}/stats", game_id), body).await;
        assert_eq!(status, StatusCode::OK);
    }
    post(&router, "/api/players", json!({"name": "Aa"})).await;

    assert_eq!(
        get(&router, "/api/players/summary").await,
        (
            StatusCode::OK,
            json!([
                {"id": 1, "name": "A", "games_played": 2, "total_kills": 2, "total_aces": 1},
                {"id": 3, "name": "Aa", "games_played": 0, "total_kills": 0, "total_aces": 0},
                {"id": 2, "name": "B", "games_played": 2, "total_kills": 0, "total_aces": 0}
            ])
        )
    );
}

#[tokio::test]
async fn test_malformed_path_ids() {
    let router = setup_game().await;
    for (method, uri) in [
        (Method::GET, "/api/games/abc"),
        (Method::DELETE, "/api/players/first"),
        (Method::DELETE, "/api/games/1/stats/x"),
        (Method::GET, "/api/stats/summary/player/1/game/last"),
    ] {
        let (status, body) = send(&router, method.clone(), uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
        assert!(body["error"].is_string(), "{} {}", method, uri);
    }
}
