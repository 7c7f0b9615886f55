use actix_web::http::header;
use actix_web::test;
use backend::services::roster::RosterService;
use serde_json::json;

use crate::common::{assert_problem_details_structure, read_json};
use crate::support::auth::bearer_for;
use crate::support::factory::{create_user, upcoming_game};
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn search_and_public_profile() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let user = create_user(state.db(), "Marisol Vega").await;
    let app = create_test_app(state.clone()).build().await;

    let req = test::TestRequest::get()
        .uri("/api/users/search?q=")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(read_json(resp).await, json!([]));

    let req = test::TestRequest::get()
        .uri("/api/users/search?q=marisol")
        .to_request();
    let found = read_json(test::call_service(&app, req).await).await;
    assert!(found
        .as_array()
        .unwrap()
        .iter()
        .any(|u| u["id"] == user.id));

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", user.id))
        .to_request();
    let profile = read_json(test::call_service(&app, req).await).await;
    assert_eq!(profile["name"], "Marisol Vega");
    assert!(profile.get("email").is_none());

    let req = test::TestRequest::get().uri("/api/users/424242").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "USER_NOT_FOUND").await;

    let req = test::TestRequest::get().uri("/api/users/zero").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "INVALID_USER_ID").await;
    Ok(())
}

#[actix_web::test]
async fn games_by_user_are_listed_once() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db();
    let host = create_user(db, "Host").await;
    let player = create_user(db, "Player").await;
    let hosted = upcoming_game(db, &player, None).await;
    let joined = upcoming_game(db, &host, None).await;
    RosterService.join(db, joined.id, player.id).await?;
    let app = create_test_app(state.clone()).build().await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}/games", player.id))
        .to_request();
    let listed = read_json(test::call_service(&app, req).await).await;
    let mut ids: Vec<i64> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["id"].as_i64().unwrap())
        .collect();
    ids.sort_unstable();
    let mut expected = vec![hosted.id, joined.id];
    expected.sort_unstable();
    assert_eq!(ids, expected);

    let req = test::TestRequest::get()
        .uri("/api/users/424242/games")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "USER_NOT_FOUND").await;
    Ok(())
}

#[actix_web::test]
async fn profile_update_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let user = create_user(state.db(), "Devon").await;
    let other = create_user(state.db(), "Other").await;
    let app = create_test_app(state.clone()).build().await;
    let auth = (header::AUTHORIZATION, bearer_for(&user, &state.security));

    let req = test::TestRequest::patch()
        .uri("/api/profile")
        .insert_header(auth.clone())
        .set_json(json!({ "bio": "Left-footed", "favorite_sports": [1, 2] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let profile = read_json(resp).await;
    assert_eq!(profile["bio"], "Left-footed");
    assert_eq!(profile["favorite_sports"].as_array().unwrap().len(), 2);
    assert_eq!(profile["email"], user.email);

    let req = test::TestRequest::patch()
        .uri("/api/profile")
        .insert_header(auth.clone())
        .set_json(json!({ "favorite_sports": [999] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "UNKNOWN_SPORT").await;

    let req = test::TestRequest::patch()
        .uri("/api/profile")
        .insert_header(auth)
        .set_json(json!({ "email": other.email }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 409, "UNIQUE_EMAIL").await;
    Ok(())
}
