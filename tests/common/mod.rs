use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};
use shizi::config::Config;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub struct TestServer {
    base_url: String,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn spawn_app(config: Config) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = shizi::app(&config).unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
    }
}

/// How the stub vendor answers synthesis requests.
#[derive(Clone)]
pub enum VendorMode {
    /// A finished WAV stream.
    Wav(Vec<u8>),
    /// JSON carrying base64 raw PCM.
    JsonPcm(Vec<u8>),
    /// An upstream failure.
    Error(u16, String),
}

#[derive(Clone)]
struct StubVendor {
    mode: VendorMode,
    requests: Arc<Mutex<Vec<Value>>>,
}

async fn vendor_handler(State(stub): State<StubVendor>, Json(body): Json<Value>) -> Response {
    stub.requests.lock().unwrap().push(body);
    match &stub.mode {
        VendorMode::Wav(bytes) => {
            ([(header::CONTENT_TYPE, "audio/wav")], bytes.clone()).into_response()
        }
        VendorMode::JsonPcm(pcm) => Json(json!({ "audio": BASE64.encode(pcm) })).into_response(),
        VendorMode::Error(status, body) => {
            (StatusCode::from_u16(*status).unwrap(), body.clone()).into_response()
        }
    }
}

/// Spawn a stand-in for the remote TTS vendor. Returns its endpoint and the
/// log of request bodies it received.
pub async fn spawn_vendor(mode: VendorMode) -> (String, Arc<Mutex<Vec<Value>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let stub = StubVendor {
        mode,
        requests: requests.clone(),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = axum::Router::new()
        .route("/", post(vendor_handler))
        .with_state(stub);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/", addr), requests)
}

pub fn config_with_vendor(endpoint: &str) -> Config {
    Config {
        tts_api_key: Some("test-key".to_string()),
        tts_endpoint: endpoint.to_string(),
        ..Config::default()
    }
}
