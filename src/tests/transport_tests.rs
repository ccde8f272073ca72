use super::*;
use axum::{
    extract::{Path as RoutePath, State},
    http::{HeaderMap, StatusCode},
    response::{Html, Redirect},
    routing::{delete, get, post},
    Json, Router,
};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ServerState {
    deletes: Arc<Mutex<Vec<(String, Option<String>)>>>,
}

async fn handle_delete(
    State(state): State<ServerState>,
    RoutePath(file_name): RoutePath<String>,
    headers: HeaderMap,
) -> (StatusCode, Json<serde_json::Value>) {
    let token = headers
        .get("x-csrftoken")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    state.deletes.lock().await.push((file_name.clone(), token));
    if file_name == "locked.txt" {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"success": false, "error": "locked"})),
        )
    } else {
        (StatusCode::OK, Json(serde_json::json!({"success": true})))
    }
}

async fn uploads_page() -> Html<&'static str> {
    Html(r#"<form><input id="csrf_token" name="csrf_token" type="hidden" value="page-token"></form>"#)
}

async fn handle_upload() -> Redirect {
    Redirect::to("/uploads")
}

async fn spawn_file_manager() -> anyhow::Result<(String, ServerState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = ServerState::default();
    let app = Router::new()
        .route("/uploads", get(uploads_page))
        .route("/upload", post(handle_upload))
        .route("/delete/{file_name}", delete(handle_delete))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

#[test]
fn builds_percent_encoded_paths() {
    let client = WebClient::new("http://files.local:5000").expect("client");
    let url = client.url_for(&["delete", "my report.pdf"]).expect("url");
    assert_eq!(url.as_str(), "http://files.local:5000/delete/my%20report.pdf");

    let url = client.url_for(&["delete", "../etc"]).expect("url");
    assert_eq!(url.path(), "/delete/..%2Fetc");
}

#[test]
fn keeps_base_path_prefix() {
    let client = WebClient::new("http://files.local/app/").expect("client");
    let url = client.url_for(&["uploads"]).expect("url");
    assert_eq!(url.as_str(), "http://files.local/app/uploads");
}

#[test]
fn rejects_non_base_urls() {
    assert!(matches!(
        WebClient::new("mailto:files@example.com"),
        Err(TransportError::InvalidUrl(_))
    ));
    assert!(matches!(
        WebClient::new("not a url"),
        Err(TransportError::InvalidUrl(_))
    ));
}

#[tokio::test]
async fn delete_sends_method_path_and_token_header() {
    let (base, state) = spawn_file_manager().await.expect("spawn server");
    let client = WebClient::new(&base).expect("client");

    let response = client
        .delete(&["delete", "a.txt"], &[("X-CSRFToken", "tok-123")])
        .await
        .expect("delete");

    assert_eq!(response.status, 200);
    let body: serde_json::Value = serde_json::from_slice(&response.body).expect("json");
    assert_eq!(body["success"], true);
    assert_eq!(
        *state.deletes.lock().await,
        vec![("a.txt".to_string(), Some("tok-123".to_string()))]
    );
}

#[tokio::test]
async fn delete_returns_body_regardless_of_status() {
    let (base, _state) = spawn_file_manager().await.expect("spawn server");
    let client = WebClient::new(&base).expect("client");

    let response = client
        .delete(&["delete", "locked.txt"], &[("X-CSRFToken", "tok")])
        .await
        .expect("delete");

    assert_eq!(response.status, 500);
    let body: serde_json::Value = serde_json::from_slice(&response.body).expect("json");
    assert_eq!(body["error"], "locked");
}

#[tokio::test]
async fn unreachable_server_is_a_request_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = WebClient::new(&format!("http://{addr}")).expect("client");
    let result = client.delete(&["delete", "a.txt"], &[]).await;
    assert!(matches!(result, Err(TransportError::RequestFailed(_))));
}

#[tokio::test]
async fn load_form_reads_hidden_token() {
    let (base, _state) = spawn_file_manager().await.expect("spawn server");
    let client = WebClient::new(&base).expect("client");

    let form = client.load_form(&["uploads"]).await.expect("form");
    assert_eq!(form.field(CSRF_FIELD), Some("page-token"));
}

#[tokio::test]
async fn upload_follows_redirect_to_listing() {
    let (base, _state) = spawn_file_manager().await.expect("spawn server");
    let client = WebClient::new(&base).expect("client");

    let path = std::env::temp_dir().join(format!("file_console_upload_{}.txt", std::process::id()));
    tokio::fs::write(&path, b"hello").await.expect("write temp file");

    let form = Form::new().with_field(CSRF_FIELD, "page-token");
    let receipt = client.upload(&form, &path).await.expect("upload");
    tokio::fs::remove_file(&path).await.expect("cleanup");

    assert!(receipt.accepted());
    assert_eq!(receipt.final_url.path(), "/uploads");
}
