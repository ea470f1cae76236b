mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use common::{
    TEST_PASSWORD, admin_token, app, body_json, create_test_document, create_test_user, delete,
    generate_unique_email, get, json_request, lazy_app, regular_token, token_for_user,
};
use docvault_core::verify_password;
use docvault_models::{AccessLevel, system_roles};

#[tokio::test]
async fn test_list_users_requires_token() {
    let response = lazy_app()
        .oneshot(get("/api/v1/users", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Failed to authenticate token.");
}

#[tokio::test]
async fn test_list_users_rejects_tampered_token() {
    let token = format!("{}x", regular_token(2));
    let response = lazy_app()
        .oneshot(get("/api/v1/users", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_users_is_admin_only() {
    let response = lazy_app()
        .oneshot(get("/api/v1/users", Some(&regular_token(2))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Access Denied");
}

#[tokio::test]
async fn test_bearer_header_is_accepted() {
    let request = axum::http::Request::builder()
        .uri("/api/v1/roles")
        .header("authorization", format!("Bearer {}", regular_token(2)))
        .body(axum::body::Body::empty())
        .unwrap();

    // Authenticated but not an admin.
    let response = lazy_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_search_users_is_admin_only() {
    let response = lazy_app()
        .oneshot(get("/api/v1/search/users?query=ada", Some(&regular_token(2))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_search_users_requires_query() {
    for uri in ["/api/v1/search/users", "/api/v1/search/users?query=%20"] {
        let response = lazy_app()
            .oneshot(get(uri, Some(&admin_token())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body = body_json(response).await;
        assert_eq!(body["message"], "Search query not found");
    }
}

#[tokio::test]
async fn test_get_other_user_is_wrong_move() {
    let response = lazy_app()
        .oneshot(get("/api/v1/users/99", Some(&regular_token(2))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Wrong Move");
}

#[tokio::test]
async fn test_list_other_users_documents_is_wrong_move() {
    let response = lazy_app()
        .oneshot(get("/api/v1/users/99/documents", Some(&regular_token(2))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Wrong Move");
}

#[tokio::test]
async fn test_delete_other_user_is_refused() {
    let response = lazy_app()
        .oneshot(delete("/api/v1/users/99", Some(&regular_token(2))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Cannot delete user");
}

#[tokio::test]
async fn test_update_user_validation() {
    let response = lazy_app()
        .oneshot(json_request(
            "PUT",
            "/api/v1/users/2",
            Some(&regular_token(2)),
            json!({ "email": "not-an-email" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errors"]["email"], "Email is invalid");
}

#[tokio::test]
async fn test_change_password_mismatch() {
    let response = lazy_app()
        .oneshot(json_request(
            "PUT",
            "/api/v1/users/password/2",
            Some(&regular_token(2)),
            json!({ "password": "newpass123", "passwordConfirm": "other123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errors"]["passwordConfirmation"], "Passwords do not match");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_lists_users_with_pagination(pool: PgPool) {
    for _ in 0..3 {
        create_test_user(&pool, &generate_unique_email(), system_roles::REGULAR).await;
    }

    let response = app(pool)
        .oneshot(get("/api/v1/users?limit=2&offset=2", Some(&admin_token())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["users"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["totalCount"], 3);
    assert_eq!(body["pagination"]["pages"], 2);
    assert_eq!(body["pagination"]["currentPage"], 2);
    assert_eq!(body["pagination"]["pageSize"], 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_searches_users(pool: PgPool) {
    create_test_user(&pool, "gimli@erebor.com", system_roles::REGULAR).await;
    create_test_user(&pool, "legolas@mirkwood.com", system_roles::REGULAR).await;

    let response = app(pool)
        .oneshot(get("/api/v1/search/users?query=EREBOR", Some(&admin_token())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "gimli@erebor.com");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_own_profile(pool: PgPool) {
    let user = create_test_user(&pool, &generate_unique_email(), system_roles::REGULAR).await;
    let token = token_for_user(&user);
    let app = app(pool);

    for uri in [format!("/api/v1/users/{}", user.id), "/api/v1/users/me".to_string()] {
        let response = app.clone().oneshot(get(&uri, Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let body = body_json(response).await;
        assert_eq!(body["firstName"], "Test");
        assert_eq!(body["email"], user.email.as_str());
        assert!(body.get("password").is_none());
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_missing_user(pool: PgPool) {
    let response = app(pool)
        .oneshot(get("/api/v1/users/424242", Some(&admin_token())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "User Not Found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_own_profile(pool: PgPool) {
    let user = create_test_user(&pool, &generate_unique_email(), system_roles::REGULAR).await;

    let response = app(pool)
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/users/{}", user.id),
            Some(&token_for_user(&user)),
            json!({ "firstName": "Gimli" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["firstName"], "Gimli");
    assert_eq!(body["lastName"], "User");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_email_in_use(pool: PgPool) {
    let taken = generate_unique_email();
    create_test_user(&pool, &taken, system_roles::REGULAR).await;
    let user = create_test_user(&pool, &generate_unique_email(), system_roles::REGULAR).await;

    let response = app(pool)
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/users/{}", user.id),
            Some(&token_for_user(&user)),
            json!({ "email": taken }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Email already in use");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_change_password(pool: PgPool) {
    let user = create_test_user(&pool, &generate_unique_email(), system_roles::REGULAR).await;

    let response = app(pool.clone())
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/users/password/{}", user.id),
            Some(&token_for_user(&user)),
            json!({ "password": "newpass123", "passwordConfirm": "newpass123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let hash = sqlx::query_scalar::<_, String>("SELECT password FROM users WHERE id = $1")
        .bind(user.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(verify_password("newpass123", &hash).unwrap());
    assert!(!verify_password(TEST_PASSWORD, &hash).unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_user_blocked_while_owning_documents(pool: PgPool) {
    let user = create_test_user(&pool, &generate_unique_email(), system_roles::REGULAR).await;
    let document = create_test_document(&pool, &user, "Keep me", AccessLevel::Public).await;
    let token = token_for_user(&user);
    let app = app(pool);
    let uri = format!("/api/v1/users/{}", user.id);

    let response = app.clone().oneshot(delete(&uri, Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/documents/{}", document.id), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(delete(&uri, Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(delete(&uri, Some(&admin_token()))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_user_documents(pool: PgPool) {
    let user = create_test_user(&pool, &generate_unique_email(), system_roles::REGULAR).await;
    create_test_document(&pool, &user, "First", AccessLevel::Private).await;
    create_test_document(&pool, &user, "Second", AccessLevel::Public).await;

    let response = app(pool)
        .oneshot(get(
            &format!("/api/v1/users/{}/documents", user.id),
            Some(&token_for_user(&user)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["documents"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["totalCount"], 2);
    assert_eq!(body["pagination"]["pages"], 1);
    assert!(body["documents"][0]["title"].is_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_lists_roles(pool: PgPool) {
    let response = app(pool)
        .oneshot(get("/api/v1/roles", Some(&admin_token())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let titles: Vec<&str> = body["roles"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["title"].as_str())
        .collect();
    assert_eq!(titles, ["admin", "regular"]);
}
