mod common;

use common::{TestApp, error_code};
use http::StatusCode;
use serde_json::json;
use shared::models::Role;

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();
    let (status, body) = app.get("/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "memory");
}

#[tokio::test]
async fn test_access_code_picks_role() {
    let app = TestApp::new();

    let (status, body) = app.sign_up("chefe@obra.com", "admin123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "admin");

    let (status, body) = app.sign_up("ana@obra.com", "buscador123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "buscador");
}

#[tokio::test]
async fn test_invalid_access_code_creates_nothing() {
    let app = TestApp::new();

    let (status, body) = app.sign_up("intruso@obra.com", "chute").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 1006);
    assert_eq!(
        body["message"],
        "Código inválido! Busque seu código com o administrador."
    );

    // No account was created, so the same email can still sign up
    let (status, _) = app.sign_up("intruso@obra.com", "buscador123").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_duplicate_sign_up_rejected() {
    let app = TestApp::new();
    app.sign_up("ana@obra.com", "buscador123").await;

    let (status, body) = app.sign_up("ana@obra.com", "buscador123").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already registered");
}

#[tokio::test]
async fn test_login_redirects_by_role() {
    let app = TestApp::new();
    app.sign_up("chefe@obra.com", "admin123").await;
    app.sign_up("ana@obra.com", "buscador123").await;

    let (status, body) = app.login("chefe@obra.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["redirect"], "/admin");
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    let (status, body) = app.login("ana@obra.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["redirect"], "/busca");
    assert_eq!(body["user"]["name"], "ana");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();
    app.sign_up("ana@obra.com", "buscador123").await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({"email": "ana@obra.com", "password": "errada"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), 1002);
    assert_eq!(body["message"], "Invalid login credentials");
}

#[tokio::test]
async fn test_pending_profile_cannot_log_in() {
    let app = TestApp::new();
    let (_, body) = app.sign_up("nova@obra.com", "buscador123").await;
    let user_id = body["user_id"].as_str().unwrap();
    assert!(app.profiles.set_role(user_id, Role::Pending));

    let (status, body) = app.login("nova@obra.com").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), 1005);
    assert_eq!(
        body["message"],
        "Cadastro pendente: aguarde aprovação ou insira o código correto."
    );
}

#[tokio::test]
async fn test_unknown_profile_role_refused() {
    let app = TestApp::new();
    let (_, body) = app.sign_up("gerente@obra.com", "buscador123").await;
    app.profiles
        .set_role(body["user_id"].as_str().unwrap(), Role::Unknown);

    let (status, body) = app.login("gerente@obra.com").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Perfil inválido no cadastro.");
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), 1001);

    let (status, body) = app.get("/api/auth/me", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), 1004);

    let token = app.searcher_token().await;
    let (status, body) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "busca@obra.com");
    assert_eq!(body["role"], "buscador");
    assert_eq!(body["name"], "busca");
}
