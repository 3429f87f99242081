// tests/api_tests.rs

use std::{path::PathBuf, sync::Arc};

use backend::{catalog::FileCatalog, config::Config, routes, state::AppState};

/// Writes a throwaway data directory with a few exports.
fn seed_data_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("exam-viewer-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("Failed to create test data dir");

    let question = serde_json::json!({
        "metadata": { "fileSize": "20KB", "totalPages": 2 },
        "annotations": [{
            "category": "vocabulary",
            "data": { "text_segments": [{
                "tag": "stem",
                "quill_delta": { "ops": [
                    { "insert": "Pick the ", "attributes": {} },
                    { "insert": "synonym", "attributes": { "italic": true } },
                    { "insert": "\n" }
                ] }
            }] }
        }]
    });

    std::fs::write(dir.join("ENG_200.json"), question.to_string()).unwrap();
    std::fs::write(dir.join("ENG_100.json"), r#"{"annotations": []}"#).unwrap();
    std::fs::write(dir.join("ENG_300.json"), "{ not json").unwrap();
    std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

    dir
}

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    let data_dir = seed_data_dir();

    let config = Config {
        data_dir: data_dir.display().to_string(),
        static_dir: "static".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        log_dir: "logs".to_string(),
        rust_log: "error".to_string(),
        file_list: None,
    };

    let catalog = FileCatalog::from_config(&config).expect("Failed to scan test data dir");
    let state = AppState {
        catalog: Arc::new(catalog),
        config,
    };

    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

#[tokio::test]
async fn health_check_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn list_files_scans_data_dir() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let files: Vec<serde_json::Value> = client
        .get(&format!("{}/api/files", address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    let names: Vec<&str> = files.iter().map(|f| f["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["ENG_100", "ENG_200", "ENG_300"]);
    assert_eq!(files[0]["display_name"], "100...");
}

#[tokio::test]
async fn list_files_filters_by_keyword() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let files: Vec<serde_json::Value> = client
        .get(&format!("{}/api/files?q=eng_2", address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"], "ENG_200");

    let too_long = "x".repeat(101);
    let response = client
        .get(&format!("{}/api/files?q={}", address, too_long))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn get_file_returns_document_view() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/files/ENG_200", address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);

    let view: serde_json::Value = response.json().await.unwrap();
    assert_eq!(view["file"]["name"], "ENG_200");
    assert_eq!(view["file"]["meta"], "파일 크기: 20KB | 페이지: 2");
    assert!(view["modified_at"].is_string());

    let question = &view["questions"][0];
    assert_eq!(question["number"], 1);
    assert_eq!(question["category"], "vocabulary");
    assert_eq!(question["sections"][0]["container_id"], "quill-0-stem");
    assert_eq!(
        question["sections"][0]["html"],
        "Pick the <em>synonym</em><br>"
    );
}

#[tokio::test]
async fn get_file_error_statuses() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let status = |path: &'static str| {
        let client = client.clone();
        let url = format!("{}{}", address, path);
        async move { client.get(&url).send().await.unwrap().status().as_u16() }
    };

    assert_eq!(status("/api/files/ENG_999").await, 404);
    assert_eq!(status("/api/files/bad.name").await, 400);
    assert_eq!(status("/api/files/ENG_300").await, 422);
}

#[tokio::test]
async fn raw_endpoint_serves_pretty_json() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/files/ENG_100/raw", address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    assert_eq!(response.text().await.unwrap(), "{\n  \"annotations\": []\n}");
}

#[tokio::test]
async fn preview_views_dropped_document() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(&format!("{}/api/preview", address))
        .json(&serde_json::json!({
            "file_name": "ENG_dropped.json",
            "document": {
                "annotations": [{
                    "data": { "text_segments": [{
                        "quill_delta": { "ops": [{ "insert": "Dropped", "attributes": { "bold": true } }] }
                    }] }
                }]
            }
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let view: serde_json::Value = response.json().await.unwrap();
    assert_eq!(view["file"]["name"], "ENG_dropped");
    assert!(view.get("modified_at").is_none());
    assert_eq!(view["questions"][0]["category"], "Unknown");
    assert_eq!(
        view["questions"][0]["sections"][0]["html"],
        "<strong>Dropped</strong>"
    );
}

#[tokio::test]
async fn preview_rejects_bad_input() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let empty_name = client
        .post(&format!("{}/api/preview", address))
        .json(&serde_json::json!({ "file_name": "", "document": {} }))
        .send()
        .await
        .unwrap();
    assert_eq!(empty_name.status().as_u16(), 400);

    let bad_shape = client
        .post(&format!("{}/api/preview", address))
        .json(&serde_json::json!({ "file_name": "x.json", "document": { "annotations": "none" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_shape.status().as_u16(), 422);
}

#[tokio::test]
async fn render_and_sanitize_endpoints() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let rendered: serde_json::Value = client
        .post(&format!("{}/api/render", address))
        .json(&serde_json::json!({
            "ops": [{ "insert": "Hello\nWorld", "attributes": { "bold": true } }]
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(rendered["html"], "<strong>Hello<br>World</strong>");

    let sanitized: serde_json::Value = client
        .post(&format!("{}/api/sanitize", address))
        .json(&serde_json::json!({ "html": "<script>alert(1)</script><p>safe</p>" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(sanitized["html"], "alert(1)<p>safe</p>");
}
