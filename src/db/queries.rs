use anyhow::{Context, Result};
use sqlx::SqlitePool;
use thiserror::Error;

use super::models::{Board, BoardSummary, NewThumbnail, Thumbnail};

/// Failures surfaced by thumbnail writes.
///
/// Handlers map these onto their own error contracts (404 page, API error
/// body, form flash) instead of treating every failure as a 500.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("board {0} not found")]
    BoardNotFound(i64),
    #[error("video {0} is already saved")]
    DuplicateVideo(String),
    #[error("database error")]
    Database(#[from] sqlx::Error),
}

// ========== Boards ==========

/// Create a board with the next default name ("Board N").
pub async fn create_default_board(pool: &SqlitePool) -> Result<Board> {
    let count = count_boards(pool).await?;
    let name = format!("Board {}", count + 1);

    let result = sqlx::query("INSERT INTO boards (name) VALUES (?)")
        .bind(&name)
        .execute(pool)
        .await
        .context("Failed to insert board")?;

    get_board(pool, result.last_insert_rowid())
        .await?
        .context("Inserted board not found")
}

/// Get a board by id.
pub async fn get_board(pool: &SqlitePool, id: i64) -> Result<Option<Board>> {
    sqlx::query_as("SELECT * FROM boards WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to fetch board")
}

/// Get the first board in creation order, if any exist.
pub async fn get_first_board(pool: &SqlitePool) -> Result<Option<Board>> {
    sqlx::query_as("SELECT * FROM boards ORDER BY id LIMIT 1")
        .fetch_optional(pool)
        .await
        .context("Failed to fetch first board")
}

/// Get all boards in creation order.
pub async fn get_all_boards(pool: &SqlitePool) -> Result<Vec<Board>> {
    sqlx::query_as("SELECT * FROM boards ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to fetch boards")
}

/// Get all boards as API summaries, in creation order.
pub async fn get_board_summaries(pool: &SqlitePool) -> Result<Vec<BoardSummary>> {
    sqlx::query_as("SELECT id, name FROM boards ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to fetch board summaries")
}

/// Count all boards.
pub async fn count_boards(pool: &SqlitePool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM boards")
        .fetch_one(pool)
        .await
        .context("Failed to count boards")?;
    Ok(count)
}

// ========== Thumbnails ==========

/// Insert a new thumbnail, returning its id.
///
/// # Errors
///
/// Returns [`StoreError::BoardNotFound`] if the referenced board does not
/// exist and [`StoreError::DuplicateVideo`] if the video id is already saved
/// to any board. Duplicates are caught by the UNIQUE constraint on
/// `video_id`, so concurrent writers cannot race past the check.
pub async fn insert_thumbnail(
    pool: &SqlitePool,
    thumbnail: &NewThumbnail,
) -> Result<i64, StoreError> {
    let board: Option<(i64,)> = sqlx::query_as("SELECT id FROM boards WHERE id = ?")
        .bind(thumbnail.board_id)
        .fetch_optional(pool)
        .await?;
    if board.is_none() {
        return Err(StoreError::BoardNotFound(thumbnail.board_id));
    }

    let result = sqlx::query(
        r"
        INSERT INTO thumbnails (video_id, thumbnail_url, board_id)
        VALUES (?, ?, ?)
        ",
    )
    .bind(&thumbnail.video_id)
    .bind(&thumbnail.thumbnail_url)
    .bind(thumbnail.board_id)
    .execute(pool)
    .await;

    match result {
        Ok(r) => Ok(r.last_insert_rowid()),
        Err(e) => {
            if is_unique_violation(&e) {
                Err(StoreError::DuplicateVideo(thumbnail.video_id.clone()))
            } else {
                Err(StoreError::Database(e))
            }
        }
    }
}

/// Check whether a video id is saved to any board.
pub async fn thumbnail_exists(pool: &SqlitePool, video_id: &str) -> Result<bool> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM thumbnails WHERE video_id = ?")
        .bind(video_id)
        .fetch_optional(pool)
        .await
        .context("Failed to check for existing thumbnail")?;
    Ok(row.is_some())
}

/// Get all thumbnails for a board, in creation order.
pub async fn get_thumbnails_for_board(pool: &SqlitePool, board_id: i64) -> Result<Vec<Thumbnail>> {
    sqlx::query_as("SELECT * FROM thumbnails WHERE board_id = ? ORDER BY id")
        .bind(board_id)
        .fetch_all(pool)
        .await
        .context("Failed to fetch thumbnails for board")
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error().is_some_and(|d| d.is_unique_violation())
}
