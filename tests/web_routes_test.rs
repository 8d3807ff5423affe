//! Integration tests for web routes, driving the real router.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use thumbboard::db::{
    create_default_board, get_all_boards, get_thumbnails_for_board, insert_thumbnail, Database,
    NewThumbnail,
};
use thumbboard::web::{self, AppState};
use thumbboard::youtube;

async fn setup() -> (Router, Database, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.sqlite");
    let db = Database::new(&db_path)
        .await
        .expect("Failed to create database");

    let state = AppState { db: db.clone() };

    (web::app(state), db, temp_dir)
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ========== HTML Routes ==========

#[tokio::test]
async fn test_index_empty_store() {
    let (app, _db, _temp_dir) = setup().await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("No boards yet"));
}

#[tokio::test]
async fn test_new_board_redirects_and_persists() {
    let (app, db, _temp_dir) = setup().await;

    let response = app
        .clone()
        .oneshot(form_request("/new_board", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

    let boards = get_all_boards(db.pool()).await.unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].name, "Board 1");

    // The board shows up on the index page
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("Board 1"));
    assert!(body.contains("youtube_link"));
}

#[tokio::test]
async fn test_submit_link_saves_to_first_board() {
    let (app, db, _temp_dir) = setup().await;
    let board = create_default_board(db.pool()).await.unwrap();

    let response = app
        .oneshot(form_request(
            "/",
            "youtube_link=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3DdQw4w9WgXcQ",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/?notice=saved"
    );

    let thumbs = get_thumbnails_for_board(db.pool(), board.id).await.unwrap();
    assert_eq!(thumbs.len(), 1);
    assert_eq!(thumbs[0].video_id, "dQw4w9WgXcQ");
}

#[tokio::test]
async fn test_submit_link_without_video_id() {
    let (app, db, _temp_dir) = setup().await;
    let board = create_default_board(db.pool()).await.unwrap();

    let response = app
        .oneshot(form_request("/", "youtube_link=not%20a%20url"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/?notice=no-match"
    );

    let thumbs = get_thumbnails_for_board(db.pool(), board.id).await.unwrap();
    assert!(thumbs.is_empty());
}

#[tokio::test]
async fn test_submit_link_without_boards() {
    let (app, _db, _temp_dir) = setup().await;

    let response = app
        .oneshot(form_request(
            "/",
            "youtube_link=https%3A%2F%2Fyoutu.be%2FdQw4w9WgXcQ",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/?notice=no-board"
    );
}

#[tokio::test]
async fn test_submit_duplicate_link_flashes_notice() {
    let (app, db, _temp_dir) = setup().await;
    let board = create_default_board(db.pool()).await.unwrap();
    insert_thumbnail(
        db.pool(),
        &NewThumbnail {
            video_id: "dQw4w9WgXcQ".to_string(),
            thumbnail_url: youtube::thumbnail_url("dQw4w9WgXcQ"),
            board_id: board.id,
        },
    )
    .await
    .unwrap();

    let response = app
        .clone()
        .oneshot(form_request(
            "/",
            "youtube_link=https%3A%2F%2Fyoutu.be%2FdQw4w9WgXcQ",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/?notice=duplicate"
    );

    // Following the redirect renders the alert
    let response = app
        .oneshot(
            Request::builder()
                .uri("/?notice=duplicate")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(body.contains("already saved"));
}

#[tokio::test]
async fn test_switch_board_shows_its_thumbnails() {
    let (app, db, _temp_dir) = setup().await;
    create_default_board(db.pool()).await.unwrap();
    let second = create_default_board(db.pool()).await.unwrap();
    insert_thumbnail(
        db.pool(),
        &NewThumbnail {
            video_id: "abcDEF12345".to_string(),
            thumbnail_url: youtube::thumbnail_url("abcDEF12345"),
            board_id: second.id,
        },
    )
    .await
    .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/switch_board/{}", second.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("abcDEF12345"));
    assert!(body.contains("Board 2"));

    // The plain index still defaults to the first board, which is empty
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_string(response).await;
    assert!(!body.contains("abcDEF12345"));
}

#[tokio::test]
async fn test_switch_board_missing() {
    let (app, _db, _temp_dir) = setup().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/switch_board/9999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_healthz() {
    let (app, _db, _temp_dir) = setup().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
}

// ========== JSON API Routes ==========

#[tokio::test]
async fn test_api_boards_empty() {
    let (app, _db, _temp_dir) = setup().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/boards")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_api_boards_lists_in_order() {
    let (app, db, _temp_dir) = setup().await;
    create_default_board(db.pool()).await.unwrap();
    create_default_board(db.pool()).await.unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/boards")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body[0]["name"], "Board 1");
    assert_eq!(body[1]["name"], "Board 2");
}

#[tokio::test]
async fn test_api_save_thumbnail_missing_fields() {
    let (app, _db, _temp_dir) = setup().await;

    let response = app
        .oneshot(json_request(
            "/api/save_thumbnail",
            serde_json::json!({"video_id": "dQw4w9WgXcQ"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Missing video_id or board_id");
}

#[tokio::test]
async fn test_api_save_thumbnail_invalid_board() {
    let (app, _db, _temp_dir) = setup().await;

    let response = app
        .oneshot(json_request(
            "/api/save_thumbnail",
            serde_json::json!({"video_id": "abc", "board_id": 9999}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid board_id");
}

#[tokio::test]
async fn test_api_save_thumbnail_success_then_duplicate() {
    let (app, db, _temp_dir) = setup().await;
    let board = create_default_board(db.pool()).await.unwrap();

    let request = serde_json::json!({"video_id": "dQw4w9WgXcQ", "board_id": board.id});

    let response = app
        .clone()
        .oneshot(json_request("/api/save_thumbnail", request.clone()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Thumbnail saved successfully");

    let thumbs = get_thumbnails_for_board(db.pool(), board.id).await.unwrap();
    assert_eq!(thumbs.len(), 1);
    assert_eq!(
        thumbs[0].thumbnail_url,
        "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"
    );

    // Saving the same video again is a conflict
    let response = app
        .oneshot(json_request("/api/save_thumbnail", request))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Thumbnail already exists");
}

#[tokio::test]
async fn test_api_allows_cross_origin_requests() {
    let (app, _db, _temp_dir) = setup().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/boards")
                .header(header::ORIGIN, "https://www.youtube.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
