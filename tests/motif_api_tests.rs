mod test_utils;

use reqwest::{multipart, Method, StatusCode};
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn motif_lifecycle_round_trips_through_the_store() {
    let app = TestApp::spawn().await;

    let response = app.authed(Method::POST, "/motifs").json(&iznik_lalesi()).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": true, "id": "1" }));

    let body: Value = app.authed(Method::GET, "/motifs/1").send().await.unwrap().json().await.unwrap();
    assert_eq!(body["motif"], iznik_lalesi());

    let mut renamed = iznik_lalesi();
    renamed["title"] = json!("İznik Lalesi v2");
    let response = app.authed(Method::PUT, "/motifs/1").json(&renamed).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = app.authed(Method::GET, "/motifs/1").send().await.unwrap().json().await.unwrap();
    assert_eq!(body["motif"]["title"], "İznik Lalesi v2");

    let response = app.authed(Method::DELETE, "/motifs/1").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": true }));

    let response = app.authed(Method::GET, "/motifs/1").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(app.kv_store.is_empty());
}

#[actix_rt::test]
async fn list_returns_only_motif_records() {
    let app = TestApp::spawn().await;

    let body: Value = app.authed(Method::GET, "/motifs").send().await.unwrap().json().await.unwrap();
    assert_eq!(body, json!({ "motifs": [] }));

    let mut second = iznik_lalesi();
    second["id"] = json!(2);
    app.authed(Method::POST, "/motifs").json(&iznik_lalesi()).send().await.unwrap();
    app.authed(Method::POST, "/motifs").json(&second).send().await.unwrap();
    app.authed(Method::PUT, "/footer").json(&json!({ "text": "x" })).send().await.unwrap();

    let body: Value = app.authed(Method::GET, "/motifs").send().await.unwrap().json().await.unwrap();
    assert_eq!(body["motifs"].as_array().map(Vec::len), Some(2));
}

#[actix_rt::test]
async fn create_without_id_is_a_bad_request() {
    let app = TestApp::spawn().await;

    let mut body = iznik_lalesi();
    body.as_object_mut().unwrap().remove("id");

    let response = app.authed(Method::POST, "/motifs").json(&body).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = response.json().await.unwrap();
    assert_eq!(error["error"], "Motif ID is required");
    assert!(app.kv_store.is_empty());
}

#[actix_rt::test]
async fn malformed_json_gets_the_error_body_shape() {
    let app = TestApp::spawn().await;

    let response = app
        .authed(Method::POST, "/motifs")
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = response.json().await.unwrap();
    assert!(error["error"].is_string());
}

#[actix_rt::test]
async fn update_and_delete_of_missing_ids_are_not_found() {
    let app = TestApp::spawn().await;

    let response = app.authed(Method::PUT, "/motifs/404").json(&iznik_lalesi()).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.authed(Method::DELETE, "/motifs/404").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: Value = response.json().await.unwrap();
    assert_eq!(error["error"], "Motif not found");
}

#[actix_rt::test]
async fn update_keeps_the_stored_id_equal_to_the_key() {
    let app = TestApp::spawn().await;
    app.authed(Method::POST, "/motifs").json(&iznik_lalesi()).send().await.unwrap();

    let mut body = iznik_lalesi();
    body["id"] = json!("999");
    let response = app.authed(Method::PUT, "/motifs/1").json(&body).send().await.unwrap();
    let saved: Value = response.json().await.unwrap();
    assert_eq!(saved["id"], "1");

    let stored: Value = app.authed(Method::GET, "/motifs/1").send().await.unwrap().json().await.unwrap();
    assert_eq!(stored["motif"]["id"], "1");
    let missing = app.authed(Method::GET, "/motifs/999").send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn footer_is_empty_until_saved_then_overwritten() {
    let app = TestApp::spawn().await;

    let body: Value = app.authed(Method::GET, "/footer").send().await.unwrap().json().await.unwrap();
    assert_eq!(body, json!({ "footer": {} }));

    let response = app.authed(Method::PUT, "/footer").json(&json!({ "text": "Merhaba" })).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": true }));

    let body: Value = app.authed(Method::GET, "/footer").send().await.unwrap().json().await.unwrap();
    assert_eq!(body, json!({ "footer": { "text": "Merhaba" } }));
}

#[actix_rt::test]
async fn footer_bodies_are_stored_as_sent() {
    let app = TestApp::spawn().await;

    let odd = json!({ "text": 42, "note": "taslak" });
    let response = app.authed(Method::PUT, "/footer").json(&odd).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = app.authed(Method::GET, "/footer").send().await.unwrap().json().await.unwrap();
    assert_eq!(body, json!({ "footer": odd }));
}

#[actix_rt::test]
async fn requests_without_the_credential_are_rejected() {
    let app = TestApp::spawn().await;

    let response = app.client.get(app.url("/motifs")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .client
        .get(app.url("/motifs"))
        .bearer_auth("wrong-key")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let error: Value = response.json().await.unwrap();
    assert_eq!(error["error"], "Missing or invalid credentials");

    let response = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "status": "ok" }));

    let response = app.client.get(&app.address).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn health_details_report_the_store() {
    let app = TestApp::spawn().await;

    let response = app.authed(Method::GET, "/health/details").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(body["uptime"].is_string());
    assert!(body["version"].is_string());
}

#[actix_rt::test]
async fn upload_without_a_file_is_a_bad_request() {
    let app = TestApp::spawn().await;

    let form = multipart::Form::new().text("note", "no file here");
    let response = app.authed(Method::POST, "/upload-image").multipart(form).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Value = response.json().await.unwrap();
    assert_eq!(error["error"], "No file provided");
    assert!(app.blob_store.is_empty());
}

#[actix_rt::test]
async fn uploaded_image_is_served_by_its_signed_url_and_removed_with_its_motif() {
    let app = TestApp::spawn().await;

    let part = multipart::Part::bytes(png_bytes())
        .file_name("lale.png")
        .mime_str("image/png")
        .unwrap();
    let form = multipart::Form::new().part("file", part);
    let response = app.authed(Method::POST, "/upload-image").multipart(form).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let uploaded: Value = response.json().await.unwrap();
    let file_name = uploaded["fileName"].as_str().unwrap().to_string();
    let url = uploaded["url"].as_str().unwrap().to_string();
    assert!(file_name.ends_with("-lale.png"));
    assert!(app.blob_store.contains(&file_name));

    // Signed URLs work without the bearer credential
    let image = app.client.get(&url).send().await.unwrap();
    assert_eq!(image.status(), StatusCode::OK);
    assert_eq!(image.headers()["content-type"], "image/png");
    assert_eq!(image.bytes().await.unwrap().to_vec(), png_bytes());

    let tampered = url.replace("token=", "token=x");
    let response = app.client.get(&tampered).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let mut motif = iznik_lalesi();
    motif["imageUrl"] = json!(url);
    motif["fileName"] = json!(file_name);
    app.authed(Method::POST, "/motifs").json(&motif).send().await.unwrap();

    let response = app.authed(Method::DELETE, "/motifs/1").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!app.blob_store.contains(&file_name));
    assert!(app.kv_store.is_empty());

    let response = app.client.get(&url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn deleting_a_motif_with_an_external_image_leaves_blobs_alone() {
    let app = TestApp::spawn().await;

    let part = multipart::Part::bytes(png_bytes())
        .file_name("kilim.png")
        .mime_str("image/png")
        .unwrap();
    let form = multipart::Form::new().part("file", part);
    app.authed(Method::POST, "/upload-image").multipart(form).send().await.unwrap();
    assert_eq!(app.blob_store.len(), 1);

    app.authed(Method::POST, "/motifs").json(&iznik_lalesi()).send().await.unwrap();
    let response = app.authed(Method::DELETE, "/motifs/1").send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.blob_store.len(), 1);
}

#[actix_rt::test]
async fn delete_succeeds_when_the_blob_is_already_gone() {
    let app = TestApp::spawn().await;

    let mut motif = iznik_lalesi();
    motif["fileName"] = json!("1700000000000-gone.png");
    app.authed(Method::POST, "/motifs").json(&motif).send().await.unwrap();

    let response = app.authed(Method::DELETE, "/motifs/1").send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(app.kv_store.is_empty());
}
