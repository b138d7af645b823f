// print_shop/tests/auth_api_tests.rs

#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use chrono::Duration;
use common::{bearer, body_json, signed_up, test_context};
use serde_json::json;

#[actix_web::test]
async fn register_issues_token_and_rejects_duplicates() {
  let ctx = test_context().await;
  let app = spawn_app!(ctx);

  let payload = json!({
      "name": "Ada",
      "email": "ada@example.com",
      "password": "first-password",
      "phone": "555-0100",
  });
  let req = test::TestRequest::post().uri("/api/register").set_json(&payload).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let body = body_json(resp).await;
  assert_eq!(body["message"], "User registered successfully");
  assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
  let user_id = body["userId"].as_str().expect("userId").to_string();

  let duplicate = json!({
      "name": "Impostor",
      "email": "ada@example.com",
      "password": "second-password",
  });
  let req = test::TestRequest::post().uri("/api/register").set_json(&duplicate).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CONFLICT);

  // The first account is untouched.
  let login = json!({ "email": "ada@example.com", "password": "first-password" });
  let req = test::TestRequest::post().uri("/api/login").set_json(&login).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = body_json(resp).await;
  assert_eq!(body["userId"], user_id.as_str());
  assert_eq!(body["name"], "Ada");
  assert_eq!(body["message"], "Login successful");
}

#[actix_web::test]
async fn register_requires_fields() {
  let ctx = test_context().await;
  let app = spawn_app!(ctx);

  for payload in [
    json!({ "email": "a@example.com", "password": "pw" }),
    json!({ "name": "A", "password": "pw" }),
    json!({ "name": "A", "email": "not-an-email", "password": "pw" }),
    json!({ "name": "A", "email": "a@example.com" }),
  ] {
    let req = test::TestRequest::post().uri("/api/register").set_json(&payload).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload {payload}");
    let body = body_json(resp).await;
    assert!(body["message"].is_string());
  }
}

#[actix_web::test]
async fn login_failures_are_indistinguishable() {
  let ctx = test_context().await;
  signed_up(&ctx, "known@example.com").await;
  let app = spawn_app!(ctx);

  let wrong_password = json!({ "email": "known@example.com", "password": "nope" });
  let req = test::TestRequest::post().uri("/api/login").set_json(&wrong_password).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  let wrong_password_body = body_json(resp).await;

  let unknown_email = json!({ "email": "ghost@example.com", "password": "nope" });
  let req = test::TestRequest::post().uri("/api/login").set_json(&unknown_email).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  let unknown_email_body = body_json(resp).await;

  assert_eq!(wrong_password_body, unknown_email_body);
  assert_eq!(wrong_password_body["message"], "Invalid email or password");
}

#[actix_web::test]
async fn protected_routes_need_a_bearer_token() {
  let ctx = test_context().await;
  let app = spawn_app!(ctx);

  let req = test::TestRequest::get().uri("/api/orders").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let req = test::TestRequest::get()
    .uri("/api/orders")
    .insert_header(("Authorization", "Basic dXNlcjpwdw=="))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let req = test::TestRequest::get()
    .uri("/api/dashboard")
    .insert_header(bearer("not-a-jwt"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn session_expires_after_a_day() {
  let ctx = test_context().await;
  let (_, token) = signed_up(&ctx, "clock@example.com").await;
  let app = spawn_app!(ctx);

  ctx.clock.advance(Duration::hours(24) - Duration::seconds(1));
  let req = test::TestRequest::get().uri("/api/orders").insert_header(bearer(&token)).to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

  ctx.clock.advance(Duration::seconds(2));
  let req = test::TestRequest::get().uri("/api/orders").insert_header(bearer(&token)).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn profile_read_update_and_password_change() {
  let ctx = test_context().await;
  let (user_id, token) = signed_up(&ctx, "profile@example.com").await;
  let app = spawn_app!(ctx);

  let req = test::TestRequest::get().uri("/api/profile").insert_header(bearer(&token)).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = body_json(resp).await;
  assert_eq!(body["id"], user_id.to_string());
  assert_eq!(body["email"], "profile@example.com");
  assert!(body["createdAt"].is_string());
  assert!(body.get("password_hash").is_none() && body.get("passwordHash").is_none());

  let req = test::TestRequest::put()
    .uri("/api/profile")
    .insert_header(bearer(&token))
    .set_json(json!({ "name": "Renamed", "phone": "555-0199" }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

  let req = test::TestRequest::get().uri("/api/profile").insert_header(bearer(&token)).to_request();
  let body = body_json(test::call_service(&app, req).await).await;
  assert_eq!(body["name"], "Renamed");
  assert_eq!(body["phone"], "555-0199");

  let req = test::TestRequest::put()
    .uri("/api/change-password")
    .insert_header(bearer(&token))
    .set_json(json!({ "currentPassword": "wrong", "newPassword": "new-secret" }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

  let req = test::TestRequest::put()
    .uri("/api/change-password")
    .insert_header(bearer(&token))
    .set_json(json!({ "currentPassword": "correct horse", "newPassword": "new-secret" }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

  let req = test::TestRequest::post()
    .uri("/api/login")
    .set_json(json!({ "email": "profile@example.com", "password": "new-secret" }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

  let req = test::TestRequest::post()
    .uri("/api/login")
    .set_json(json!({ "email": "profile@example.com", "password": "correct horse" }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}
