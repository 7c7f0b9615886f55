//! Comment gate: who may annotate a game, and the comment feed.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::info;

use crate::domain::access::{Action, Caller};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::comments::{self, Comment};
use crate::repos::games;
use crate::repos::users::{self, User};
use crate::services::game_records::UserSummary;
use crate::services::guard;
use crate::services::roster::RosterService;

pub const MAX_COMMENT_CHARS: usize = 2000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentRecord {
    pub id: i64,
    pub game_id: i64,
    pub author: UserSummary,
    pub author_name: String,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
}

impl CommentRecord {
    fn new(comment: Comment, author: &User) -> Self {
        let author_name = if author.name.is_empty() {
            author.username.clone().unwrap_or_default()
        } else {
            author.name.clone()
        };
        Self {
            id: comment.id,
            game_id: comment.game_id,
            author: UserSummary::from(author),
            author_name,
            text: comment.body,
            created: comment.created_at,
        }
    }
}

fn clean_text(raw: &str) -> Result<String, DomainError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidComment,
            "Comment text must not be empty",
        ));
    }
    if text.chars().count() > MAX_COMMENT_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidComment,
            format!("Comment text must be at most {MAX_COMMENT_CHARS} characters"),
        ));
    }
    Ok(text.to_string())
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CommentService;

impl CommentService {
    pub fn new() -> Self {
        Self
    }

    /// Post a comment as the creator or a current participant.
    pub async fn post_comment<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
        author_id: i64,
        text: &str,
    ) -> Result<CommentRecord, DomainError> {
        let game = games::require_game(conn, game_id).await?;
        let on_roster = RosterService
            .is_creator_or_participant(conn, &game, author_id)
            .await?;
        guard(
            &game,
            Caller::new(author_id).on_roster(on_roster),
            Action::Comment,
        )?;

        let body = clean_text(text)?;
        let author = users::require_user(conn, author_id).await?;
        let comment = comments::create_comment(conn, game_id, author_id, body).await?;

        info!(game_id, author_id, comment_id = comment.id, "comment.posted");
        Ok(CommentRecord::new(comment, &author))
    }

    /// All comments on a game, oldest first.
    pub async fn list_comments<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        game_id: i64,
    ) -> Result<Vec<CommentRecord>, DomainError> {
        games::require_game(conn, game_id).await?;
        let rows = comments::list_for_game(conn, game_id).await?;
        Ok(rows
            .into_iter()
            .map(|(comment, author)| CommentRecord::new(comment, &author))
            .collect())
    }
}
