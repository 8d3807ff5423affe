use serde::{Deserialize, Serialize};

/// A named collection of saved thumbnails.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Board {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

/// A saved video thumbnail belonging to a board.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Thumbnail {
    pub id: i64,
    pub video_id: String,
    pub thumbnail_url: String,
    pub board_id: i64,
    pub created_at: String,
}

/// Data for inserting a new thumbnail.
#[derive(Debug, Clone)]
pub struct NewThumbnail {
    pub video_id: String,
    pub thumbnail_url: String,
    pub board_id: i64,
}

/// Board as exposed by the JSON API.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BoardSummary {
    pub id: i64,
    pub name: String,
}
