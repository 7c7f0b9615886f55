use actix_web::http::header;
use actix_web::test;
use backend::repos::users::User;
use serde_json::json;

use crate::common::{assert_problem_details_structure, read_json};
use crate::support::auth::bearer_for;
use crate::support::factory::{create_user, upcoming_game};
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn join_leave_and_capacity() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let creator = create_user(db, "Creator").await;
    let first = create_user(db, "First").await;
    let second = create_user(db, "Second").await;
    let game = upcoming_game(db, &creator, Some(1)).await;
    let app = create_test_app(state.clone()).build().await;
    let join_uri = format!("/api/games/{}/join", game.id);
    let leave_uri = format!("/api/games/{}/leave", game.id);
    let bearer = |u: &User| (header::AUTHORIZATION, bearer_for(u, &state.security));

    let req = test::TestRequest::post()
        .uri(&join_uri)
        .insert_header(bearer(&first))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body = read_json(resp).await;
    assert_eq!(body, json!({ "game_id": game.id, "user_id": first.id, "participant_count": 1 }));

    let req = test::TestRequest::post()
        .uri(&join_uri)
        .insert_header(bearer(&first))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "ALREADY_JOINED").await;

    let req = test::TestRequest::post()
        .uri(&join_uri)
        .insert_header(bearer(&second))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "GAME_FULL").await;

    let req = test::TestRequest::post()
        .uri(&join_uri)
        .insert_header(bearer(&creator))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 403, "CREATOR_CANNOT_JOIN").await;

    let req = test::TestRequest::post()
        .uri(&leave_uri)
        .insert_header(bearer(&second))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "NOT_JOINED").await;

    let req = test::TestRequest::post()
        .uri(&leave_uri)
        .insert_header(bearer(&first))
        .to_request();
    let body = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["participant_count"], 0);

    let req = test::TestRequest::post()
        .uri(&join_uri)
        .insert_header(bearer(&second))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 200);
    Ok(())
}

#[actix_web::test]
async fn comments_follow_the_roster() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let creator = create_user(db, "Creator").await;
    let player = create_user(db, "Player").await;
    let game = upcoming_game(db, &creator, None).await;
    let app = create_test_app(state.clone()).build().await;
    let comments_uri = format!("/api/games/{}/comments", game.id);
    let bearer = |u: &User| (header::AUTHORIZATION, bearer_for(u, &state.security));

    let req = test::TestRequest::post()
        .uri(&comments_uri)
        .insert_header(bearer(&player))
        .set_json(json!({ "text": "room for one more?" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 403, "NOT_PARTICIPANT").await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{}/join", game.id))
        .insert_header(bearer(&player))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 200);

    let req = test::TestRequest::post()
        .uri(&comments_uri)
        .insert_header(bearer(&player))
        .set_json(json!({ "text": "see you at six" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let posted = read_json(resp).await;
    assert_eq!(posted["text"], "see you at six");
    assert_eq!(posted["author_name"], "Player");

    let req = test::TestRequest::post()
        .uri(&comments_uri)
        .insert_header(bearer(&creator))
        .set_json(json!({ "text": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "INVALID_COMMENT").await;

    let req = test::TestRequest::get().uri(&comments_uri).to_request();
    let listed = read_json(test::call_service(&app, req).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["author"]["id"], player.id);
    Ok(())
}
