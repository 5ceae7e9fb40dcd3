mod common;

use common::{TestApp, error_code};
use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_public_registration_normalizes_fields() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/register",
            None,
            json!({
                "nome": "  Ana  ",
                "empresa": "Ana Materiais",
                "whatsapp": "(85) 99620-4919",
                "tags": "#Cimento, areia #Brita #",
                "categoria": "material",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["nome"], "Ana");
    assert_eq!(body["whatsapp"], "(85) 996204919");
    assert_eq!(body["tags"], json!(["#cimento", "#brita"]));
    assert_eq!(body["whatsapp_link"], "https://wa.me/85996204919");
    assert_eq!(body["verified"], false);
}

#[tokio::test]
async fn test_registration_rejects_bad_phone_and_duplicates() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/register",
            None,
            json!({"nome": "Ana", "empresa": "X", "whatsapp": "1234", "tags": ""}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Número de WhatsApp inválido. Use o formato: 85996204919"
    );

    app.add_supplier("Ana", "85996204919", "#areia").await;
    let (status, body) = app
        .post(
            "/api/register",
            None,
            json!({"nome": "Outra", "empresa": "Y", "whatsapp": "(85) 9962-04919", "tags": ""}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Este número de WhatsApp já está cadastrado.");
}

#[tokio::test]
async fn test_list_requires_session() {
    let app = TestApp::new();
    let (status, _) = app.get("/api/suppliers", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_filters_and_sorts_by_name() {
    let app = TestApp::new();
    app.add_supplier("Carlos", "85911111111", "#cimento").await;
    app.add_supplier("Álvaro", "85922222222", "#brita").await;
    app.add_supplier("Bia", "85933333333", "#areia #cimento").await;
    let token = app.searcher_token().await;

    let (status, body) = app.get("/api/suppliers", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["suppliers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["nome"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Álvaro", "Bia", "Carlos"]);

    let (_, body) = app.get("/api/suppliers?q=%23are", Some(&token)).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["suppliers"][0]["nome"], "Bia");

    let (_, body) = app.get("/api/suppliers?q=CIMENTO", Some(&token)).await;
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn test_suggestions_follow_last_load() {
    let app = TestApp::new();
    app.add_supplier("Bia", "85933333333", "#areia #areal #cimento").await;
    let token = app.searcher_token().await;

    // Nothing loaded yet
    let (status, body) = app
        .get("/api/tags/suggest?text=%23are", Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestions"], json!([]));

    app.get("/api/suppliers", Some(&token)).await;

    let (_, body) = app
        .get("/api/tags/suggest?text=%23cim%20%23are&surface=form", Some(&token))
        .await;
    assert_eq!(body["suggestions"], json!(["#areia", "#areal"]));

    let (_, body) = app
        .get("/api/tags/suggest?text=ment&surface=search", Some(&token))
        .await;
    assert_eq!(body["suggestions"], json!(["#cimento"]));

    // Added after the load: invisible until the next list call
    app.add_supplier("Davi", "85944444444", "#areola").await;
    let (_, body) = app
        .get("/api/tags/suggest?text=%23areo", Some(&token))
        .await;
    assert_eq!(body["suggestions"], json!([]));

    app.get("/api/suppliers", Some(&token)).await;
    let (_, body) = app
        .get("/api/tags/suggest?text=%23areo", Some(&token))
        .await;
    assert_eq!(body["suggestions"], json!(["#areola"]));
}

#[tokio::test]
async fn test_writes_are_admin_only() {
    let app = TestApp::new();
    let id = app.add_supplier("Ana", "85996204919", "").await;
    let token = app.searcher_token().await;

    let (status, body) = app
        .call(Method::DELETE, &format!("/api/suppliers/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), 2003);

    let (status, _) = app
        .post(
            "/api/suppliers",
            Some(&token),
            json!({"nome": "B", "empresa": "B", "whatsapp": "85900000000"}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_update_and_delete() {
    let app = TestApp::new();
    let ana = app.add_supplier("Ana", "85996204919", "#areia").await;
    let bia = app.add_supplier("Bia", "85911111111", "").await;
    let token = app.admin_token().await;

    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/suppliers/{ana}"),
            Some(&token),
            Some(json!({"tags": "#CooperCon #areia", "whatsapp": "85996204919"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["tags"], json!(["#coopercon", "#areia"]));
    assert_eq!(body["verified"], true);

    // Taking Bia's number is refused
    let (status, _) = app
        .call(
            Method::PUT,
            &format!("/api/suppliers/{ana}"),
            Some(&token),
            Some(json!({"whatsapp": "(85) 911111111"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app
        .call(Method::PUT, "/api/suppliers/999", Some(&token), Some(json!({"nome": "X"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), 3001);

    let (status, body) = app
        .call(Method::DELETE, &format!("/api/suppliers/{bia}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(true));

    let (status, _) = app
        .call(Method::DELETE, &format!("/api/suppliers/{bia}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bulk_delete() {
    let app = TestApp::new();
    let a = app.add_supplier("A", "85911111111", "").await;
    let b = app.add_supplier("B", "85922222222", "").await;
    app.add_supplier("C", "85933333333", "").await;
    let token = app.admin_token().await;

    let (status, body) = app
        .post("/api/suppliers/bulk-delete", Some(&token), json!({"ids": []}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), 3004);

    let (status, body) = app
        .post(
            "/api/suppliers/bulk-delete",
            Some(&token),
            json!({"ids": [a, b, 999]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 2);

    let (_, body) = app.get("/api/suppliers", Some(&token)).await;
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_contacts_in_selection_order() {
    let app = TestApp::new();
    let ana = app.add_supplier("Ana", "85911111111", "").await;
    let bia = app.add_supplier("Bia", "85922222222", "").await;
    let token = app.searcher_token().await;

    let (status, body) = app
        .post("/api/suppliers/contacts", Some(&token), json!({"ids": [bia, ana]}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(
        body["text"],
        "Nome: Bia\nEmpresa: Bia Materiais\nWhatsApp: (85) 922222222\n\n\
         Nome: Ana\nEmpresa: Ana Materiais\nWhatsApp: (85) 911111111"
    );
}

#[tokio::test]
async fn test_contacts_count_repeated_ids_once() {
    let app = TestApp::new();
    let ana = app.add_supplier("Ana", "85911111111", "").await;
    let bia = app.add_supplier("Bia", "85922222222", "").await;
    let token = app.searcher_token().await;

    let (status, body) = app
        .post(
            "/api/suppliers/contacts",
            Some(&token),
            json!({"ids": [ana, bia, ana, 999, bia]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(
        body["text"],
        "Nome: Ana\nEmpresa: Ana Materiais\nWhatsApp: (85) 911111111\n\n\
         Nome: Bia\nEmpresa: Bia Materiais\nWhatsApp: (85) 922222222"
    );
}
