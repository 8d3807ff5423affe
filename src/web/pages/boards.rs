//! The board view: board tabs, the submit form, and the thumbnail grid.

use maud::{html, Markup, Render};

use crate::components::{Alert, BaseLayout};
use crate::db::{Board, Thumbnail};

/// Outcome of a form submission, carried across the redirect as a
/// `?notice=<code>` query parameter and rendered as an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Thumbnail saved.
    Saved,
    /// The video is already saved to a board.
    Duplicate,
    /// No video id could be extracted from the submitted link.
    NoMatch,
    /// There is no board to save to yet.
    NoBoard,
}

impl Notice {
    /// The query-parameter code for this notice.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::Duplicate => "duplicate",
            Self::NoMatch => "no-match",
            Self::NoBoard => "no-board",
        }
    }

    /// Parse a query-parameter code. Unknown codes are ignored.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "saved" => Some(Self::Saved),
            "duplicate" => Some(Self::Duplicate),
            "no-match" => Some(Self::NoMatch),
            "no-board" => Some(Self::NoBoard),
            _ => None,
        }
    }

    fn alert(&self) -> Alert<'static> {
        match self {
            Self::Saved => Alert::success("Thumbnail saved."),
            Self::Duplicate => Alert::error("That video is already saved to a board."),
            Self::NoMatch => Alert::warning("Could not find a video id in that link."),
            Self::NoBoard => Alert::warning("Create a board before saving thumbnails."),
        }
    }
}

impl Render for Notice {
    fn render(&self) -> Markup {
        self.alert().render()
    }
}

/// Render the board page.
///
/// `active` is the board whose thumbnails are shown; it is `None` only when
/// no boards exist yet.
#[must_use]
pub fn render_board_page(
    boards: &[Board],
    active: Option<&Board>,
    thumbnails: &[Thumbnail],
    notice: Option<Notice>,
) -> Markup {
    let title = active.map_or("Boards", |b| b.name.as_str());

    let content = html! {
        @if let Some(n) = notice {
            (n)
        }

        (board_tabs(boards, active))

        @if active.is_some() {
            (submit_form())
        } @else {
            p { "No boards yet. Create one to start collecting thumbnails." }
        }

        (thumbnail_grid(thumbnails))
    };

    BaseLayout::new(title).render(content)
}

/// Render the tab strip of boards plus the new-board button.
fn board_tabs(boards: &[Board], active: Option<&Board>) -> Markup {
    let active_id = active.map(|b| b.id);

    html! {
        nav class="board-tabs" {
            ul {
                @for board in boards {
                    @let class = if Some(board.id) == active_id { "board-tab active" } else { "board-tab" };
                    li {
                        a href=(format!("/switch_board/{}", board.id)) class=(class) {
                            (board.name)
                        }
                    }
                }
                li {
                    form method="post" action="/new_board" {
                        button type="submit" class="new-board" { "+ New Board" }
                    }
                }
            }
        }
    }
}

/// Render the link submission form.
fn submit_form() -> Markup {
    html! {
        form method="post" action="/" class="submit-form" {
            input
                type="url"
                name="youtube_link"
                placeholder="Paste a YouTube link..."
                required;
            button type="submit" { "Save thumbnail" }
        }
    }
}

/// Render the thumbnail grid for the active board.
fn thumbnail_grid(thumbnails: &[Thumbnail]) -> Markup {
    html! {
        @if thumbnails.is_empty() {
            p class="empty" { "No thumbnails on this board yet." }
        } @else {
            div class="thumbnail-grid" {
                @for thumb in thumbnails {
                    figure class="thumbnail-card" {
                        a href=(format!("https://www.youtube.com/watch?v={}", thumb.video_id)) {
                            img src=(thumb.thumbnail_url) alt=(thumb.video_id) loading="lazy";
                        }
                        figcaption { (thumb.video_id) }
                    }
                }
            }
        }
    }
}
