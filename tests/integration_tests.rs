//! Integration tests for the MamaeZen API and CLI
//!
//! No API key is configured here, so every AI-backed answer must come from
//! the bundled fallbacks.

use chrono::{Days, Local};
use serde_json::{Value, json};
use std::process::Command;
use std::sync::Arc;

use mamaezen::api::AppState;
use mamaezen::config::{GeminiConfig, MamaeZenConfig, ServerConfig};
use mamaezen::{GeminiClient, MemoryPreferenceStore, web};

struct TestServer {
    base: String,
    client: reqwest::Client,
}

impl TestServer {
    async fn start() -> Self {
        let config = MamaeZenConfig::default();
        let model = Arc::new(GeminiClient::new(GeminiConfig::default()).unwrap());
        let store = Arc::new(MemoryPreferenceStore::default());
        let state = AppState::new(&config, model, store).await.unwrap();
        let app = web::app(&ServerConfig::default(), Arc::new(state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{addr}/api"),
            client: reqwest::Client::new(),
        }
    }

    async fn get(&self, path: &str) -> (u16, Value) {
        let response = self
            .client
            .get(format!("{}{}", self.base, path))
            .send()
            .await
            .unwrap();
        (response.status().as_u16(), response.json().await.unwrap())
    }

    async fn post(&self, path: &str, body: Value) -> (u16, Value) {
        let response = self
            .client
            .post(format!("{}{}", self.base, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        (response.status().as_u16(), response.json().await.unwrap())
    }
}

#[tokio::test]
async fn test_health_reports_missing_key() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["aiConfigured"], false);
}

#[tokio::test]
async fn test_dashboard_entries() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/dashboard").await;
    assert_eq!(status, 200);
    assert_eq!(body["entries"].as_array().unwrap().len(), 8);
    assert_eq!(body["entries"][0]["target"]["view"], "pregnancy");
}

#[tokio::test]
async fn test_place_search_falls_back_without_key() {
    let server = TestServer::start().await;
    let (status, body) = server
        .get("/places?q=Farm%C3%A1cia%2024h&lat=-23.55&lng=-46.63")
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["source"], "fallback");
    let places = body["value"].as_array().unwrap();
    assert_eq!(places.len(), 3);
    assert_eq!(places[0]["id"], "hosp_1");
    assert_eq!(places[0]["isOpen"], true);
}

#[tokio::test]
async fn test_blank_place_query_is_empty() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/places?q=%20%20").await;
    assert_eq!(status, 200);
    assert_eq!(body["source"], "fresh");
    assert_eq!(body["value"], json!([]));
}

#[tokio::test]
async fn test_half_coordinate_rejected() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/places?q=Parques&lat=-23.5").await;
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("lat e lng"));
}

#[tokio::test]
async fn test_sos_returns_fallback_places() {
    let server = TestServer::start().await;
    let (status, body) = server.post("/places/sos", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["value"].as_array().unwrap().len(), 3);

    let (_, categories) = server.get("/places/categories").await;
    assert_eq!(categories.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_chat_fallback_and_validation() {
    let server = TestServer::start().await;
    let (status, body) = server
        .post(
            "/chat",
            json!({
                "specialist": "pediatrician",
                "history": [{ "role": "user", "text": "Oi" }, { "role": "model", "text": "Olá!" }],
                "message": "Meu bebê está com febre"
            }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["source"], "fallback");
    assert!(body["value"].as_str().unwrap().contains("procure um médico"));

    let (status, _) = server
        .post("/chat", json!({ "specialist": "psychologist", "message": "  " }))
        .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_cry_analysis_fallback() {
    let server = TestServer::start().await;
    let (status, body) = server
        .post("/cry", json!({ "audio": "UklGRiQAAABXQVZFZm10IBAAAAABAAEAQB8AAIA+AAACABAAZGF0YQAAAAA=", "mimeType": "audio/wav" }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["value"]["category"], "DOR / CÓLICA");
    assert_eq!(body["value"]["probability"], 85.0);

    let (status, _) = server.post("/cry", json!({ "audio": "@@not base64@@" })).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_recipe_routing() {
    let server = TestServer::start().await;
    let (_, body) = server.get("/recipes?q=aumentar%20leite").await;
    assert_eq!(body["source"], "fresh");
    assert_eq!(body["value"]["title"], "Suco Turbinador de Leite");

    let (_, body) = server.get("/recipes?q=bolo%20de%20cenoura").await;
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["value"]["title"], "Chazinho Anti-Cólica Natural");

    let (_, tags) = server.get("/recipes/tags").await;
    assert_eq!(tags, json!(["Dormir melhor", "Cólica do bebê", "Aumentar leite"]));
}

#[tokio::test]
async fn test_pregnancy_onboarding_flow() {
    let server = TestServer::start().await;
    let (_, body) = server.get("/pregnancy").await;
    assert_eq!(body["onboarded"], false);

    let today = Local::now().date_naive();
    let future = today.checked_add_days(Days::new(30)).unwrap();
    let (status, _) = server
        .post("/pregnancy", json!({ "lmp": future.format("%Y-%m-%d").to_string() }))
        .await;
    assert_eq!(status, 400);

    let lmp = today.checked_sub_days(Days::new(140)).unwrap();
    let (status, body) = server
        .post("/pregnancy", json!({ "lmp": lmp.format("%Y-%m-%d").to_string() }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["progress"]["currentWeek"], 20);
    assert_eq!(body["week"]["week"], 20);

    let (_, body) = server.get("/pregnancy").await;
    assert_eq!(body["onboarded"], true);
}

#[tokio::test]
async fn test_pregnancy_week_lookup() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/pregnancy/weeks/37").await;
    assert_eq!(status, 200);
    assert_eq!(body["week"], 36);

    let (status, _) = server.get("/pregnancy/weeks/2").await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_sound_filter() {
    let server = TestServer::start().await;
    let (_, body) = server.get("/sounds?category=nature").await;
    let tracks = body.as_array().unwrap();
    assert_eq!(tracks.len(), 2);
    assert!(tracks[0]["embedUrl"].as_str().unwrap().contains("/embed/"));

    let (_, body) = server.get("/sounds").await;
    assert_eq!(body.as_array().unwrap().len(), 6);

    let (status, _) = server.get("/sounds?category=jazz").await;
    assert_eq!(status, 400);
}

fn cli() -> Command {
    let data_dir = tempfile::tempdir().unwrap().keep();
    let mut command = Command::new(env!("CARGO_BIN_EXE_mamaezen"));
    command
        .args(["--config", "/nonexistent/mamaezen.toml"])
        .env_remove("MAMAEZEN__GEMINI__API_KEY")
        .env("MAMAEZEN__STORAGE__LOCATION", data_dir)
        .env("RUST_LOG", "error");
    command
}

/// Test that the CLI shows help with explicit help flag
#[test]
fn test_cli_help() {
    let output = cli().arg("--help").output().expect("Failed to execute command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("mamaezen"));
    assert!(stdout.contains("navigate"));
}

/// Test recipe subcommand with a bundled keyword (no API key required)
#[test]
fn test_cli_recipe_json() {
    let output = cli()
        .args(["--json", "recipe", "cólica"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["value"]["title"], "Chazinho Anti-Cólica Natural");
}

/// Test pregnancy subcommand rejects a malformed date
#[test]
fn test_cli_pregnancy_bad_date() {
    let output = cli()
        .args(["pregnancy", "--lmp", "31/12/2025"])
        .output()
        .expect("Failed to execute command");
    assert!(!output.status.success());
}

/// Test sounds subcommand lists the womb track
#[test]
fn test_cli_sounds() {
    let output = cli()
        .args(["sounds", "--category", "womb"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Som do Útero"));
}
