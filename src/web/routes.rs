use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Form;
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};

use super::pages::{render_board_page, Notice};
use super::AppState;
use crate::db::{
    create_default_board, get_all_boards, get_board, get_board_summaries, get_first_board,
    get_thumbnails_for_board, insert_thumbnail, Board, NewThumbnail, StoreError,
};
use crate::youtube;

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(submit_link))
        .route("/new_board", post(new_board))
        .route("/switch_board/:board_id", get(switch_board))
        .route("/api/boards", get(api_boards))
        .route("/api/save_thumbnail", post(api_save_thumbnail))
        .route("/healthz", get(health))
        .route("/favicon.ico", get(favicon))
}

// ========== HTML Routes ==========

#[derive(Debug, Deserialize)]
pub struct IndexParams {
    notice: Option<String>,
}

async fn index(State(state): State<AppState>, Query(params): Query<IndexParams>) -> Response {
    // The active board is recomputed per request: first board in creation
    // order, unless /switch_board selected one for this render.
    let active = match get_first_board(state.db.pool()).await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!("Failed to fetch first board: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    };

    let notice = params.notice.as_deref().and_then(Notice::from_code);
    render_view(&state, active.as_ref(), notice).await
}

#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    youtube_link: String,
}

/// Handler for the link submission form (POST /).
///
/// Always redirects back to the root view so a refresh never resubmits;
/// the outcome travels as a `notice` query parameter.
async fn submit_link(State(state): State<AppState>, Form(form): Form<SubmitForm>) -> Response {
    let active = match get_first_board(state.db.pool()).await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!("Failed to fetch first board: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    };

    let Some(board) = active else {
        return redirect_with_notice(Notice::NoBoard);
    };

    let Some(video_id) = youtube::extract_video_id(&form.youtube_link) else {
        return redirect_with_notice(Notice::NoMatch);
    };

    let thumbnail = NewThumbnail {
        video_id: video_id.to_string(),
        thumbnail_url: youtube::thumbnail_url(video_id),
        board_id: board.id,
    };

    match insert_thumbnail(state.db.pool(), &thumbnail).await {
        Ok(id) => {
            tracing::info!(thumbnail_id = id, video_id, board_id = board.id, "Thumbnail saved");
            redirect_with_notice(Notice::Saved)
        }
        Err(StoreError::DuplicateVideo(_)) => redirect_with_notice(Notice::Duplicate),
        Err(e) => {
            tracing::error!("Failed to save thumbnail: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}

/// Handler for creating a board (POST /new_board).
async fn new_board(State(state): State<AppState>) -> Response {
    match create_default_board(state.db.pool()).await {
        Ok(board) => {
            tracing::info!(board_id = board.id, name = %board.name, "Board created");
            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create board: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}

/// Handler for viewing a specific board (GET /switch_board/:board_id).
async fn switch_board(State(state): State<AppState>, Path(board_id): Path<i64>) -> Response {
    let board = match get_board(state.db.pool(), board_id).await {
        Ok(Some(b)) => b,
        Ok(None) => {
            return (StatusCode::NOT_FOUND, "Board not found").into_response();
        }
        Err(e) => {
            tracing::error!("Failed to fetch board: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    };

    render_view(&state, Some(&board), None).await
}

/// Render the board view with the given active board.
async fn render_view(state: &AppState, active: Option<&Board>, notice: Option<Notice>) -> Response {
    let boards = match get_all_boards(state.db.pool()).await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!("Failed to fetch boards: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    };

    let thumbnails = match active {
        Some(board) => match get_thumbnails_for_board(state.db.pool(), board.id).await {
            Ok(t) => t,
            Err(e) => {
                tracing::error!("Failed to fetch thumbnails: {e}");
                return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
            }
        },
        None => Vec::new(),
    };

    render_board_page(&boards, active, &thumbnails, notice).into_response()
}

fn redirect_with_notice(notice: Notice) -> Response {
    Redirect::to(&format!("/?notice={}", notice.code())).into_response()
}

// ========== JSON API Routes ==========

#[derive(Debug, Serialize)]
struct ApiError {
    success: bool,
    error: &'static str,
}

#[derive(Debug, Serialize)]
struct ApiSuccess {
    success: bool,
    message: &'static str,
}

fn api_error(status: StatusCode, error: &'static str) -> Response {
    (
        status,
        Json(ApiError {
            success: false,
            error,
        }),
    )
        .into_response()
}

/// Handler for listing boards (GET /api/boards).
async fn api_boards(State(state): State<AppState>) -> Response {
    match get_board_summaries(state.db.pool()).await {
        Ok(boards) => Json(boards).into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch boards: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SaveThumbnailRequest {
    video_id: Option<String>,
    board_id: Option<i64>,
}

/// Handler for saving a thumbnail from the extension (POST /api/save_thumbnail).
async fn api_save_thumbnail(
    State(state): State<AppState>,
    Json(req): Json<SaveThumbnailRequest>,
) -> Response {
    let (video_id, board_id) = match (req.video_id, req.board_id) {
        (Some(v), Some(b)) if !v.is_empty() => (v, b),
        _ => {
            return api_error(StatusCode::BAD_REQUEST, "Missing video_id or board_id");
        }
    };

    let thumbnail = NewThumbnail {
        thumbnail_url: youtube::thumbnail_url(&video_id),
        video_id,
        board_id,
    };

    match insert_thumbnail(state.db.pool(), &thumbnail).await {
        Ok(id) => {
            tracing::info!(
                thumbnail_id = id,
                video_id = %thumbnail.video_id,
                board_id,
                "Thumbnail saved via API"
            );
            Json(ApiSuccess {
                success: true,
                message: "Thumbnail saved successfully",
            })
            .into_response()
        }
        Err(StoreError::BoardNotFound(_)) => api_error(StatusCode::BAD_REQUEST, "Invalid board_id"),
        Err(StoreError::DuplicateVideo(_)) => {
            api_error(StatusCode::BAD_REQUEST, "Thumbnail already exists")
        }
        Err(e) => {
            tracing::error!("Failed to save thumbnail: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
        }
    }
}

// ========== Misc Routes ==========

async fn health() -> &'static str {
    "OK"
}

async fn favicon() -> Response {
    // Return a simple SVG favicon (pin emoji)
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><text y=".9em" font-size="90">📌</text></svg>"#;
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/svg+xml")],
        svg,
    )
        .into_response()
}
