use backend::errors::domain::{DomainError, ForbiddenKind, NotFoundKind, ValidationKind};
use backend::services::comments::{CommentService, MAX_COMMENT_CHARS};
use backend::services::roster::RosterService;

use crate::support::build_test_state;
use crate::support::factory::{create_user, upcoming_game};

#[tokio::test]
async fn only_creator_and_participants_may_comment() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let creator = create_user(db, "Creator").await;
    let player = create_user(db, "Player").await;
    let outsider = create_user(db, "Outsider").await;
    let game = upcoming_game(db, &creator, None).await;

    let err = CommentService
        .post_comment(db, game.id, outsider.id, "can I play?")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(ForbiddenKind::NotParticipant, _)));

    CommentService.post_comment(db, game.id, creator.id, "bring water").await?;
    RosterService.join(db, game.id, player.id).await?;
    let posted = CommentService
        .post_comment(db, game.id, player.id, "  on my way  ")
        .await?;
    assert_eq!(posted.text, "on my way");
    assert_eq!(posted.author.id, player.id);
    assert_eq!(posted.author_name, "Player");

    // Leaving the roster revokes the right to comment
    RosterService.leave(db, game.id, player.id).await?;
    let err = CommentService
        .post_comment(db, game.id, player.id, "nevermind")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(ForbiddenKind::NotParticipant, _)));
    Ok(())
}

#[tokio::test]
async fn comments_list_oldest_first() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let creator = create_user(db, "Creator").await;
    let game = upcoming_game(db, &creator, None).await;

    for text in ["first", "second", "third"] {
        CommentService.post_comment(db, game.id, creator.id, text).await?;
    }

    let listed = CommentService.list_comments(db, game.id).await?;
    let texts: Vec<&str> = listed.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, ["first", "second", "third"]);
    assert!(listed.windows(2).all(|w| w[0].created <= w[1].created));
    Ok(())
}

#[tokio::test]
async fn comment_text_is_validated() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let creator = create_user(db, "Creator").await;
    let game = upcoming_game(db, &creator, None).await;

    let too_long = "x".repeat(MAX_COMMENT_CHARS + 1);
    for text in ["", "   ", too_long.as_str()] {
        let err = CommentService
            .post_comment(db, game.id, creator.id, text)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(ValidationKind::InvalidComment, _)));
    }
    assert!(CommentService.list_comments(db, game.id).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn missing_game_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let user = create_user(db, "User").await;

    let err = CommentService.list_comments(db, 424_242).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));
    let err = CommentService
        .post_comment(db, 424_242, user.id, "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));
    Ok(())
}
