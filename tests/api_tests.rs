mod common;

use common::{VendorMode, config_with_vendor, spawn_app, spawn_vendor};
use shizi::config::Config;
use shizi::tts::wav;

fn sample_wav() -> Vec<u8> {
    wav::wrap_pcm16(&[1u8, 2, 3, 4, 5, 6, 7, 8], 24_000, 1)
}

#[tokio::test]
async fn words_endpoint_serves_the_bank() {
    let server = spawn_app(Config::default()).await;

    let response = reqwest::get(server.url("/api/words")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["cache-control"],
        "public, max-age=31536000, immutable"
    );

    let json: serde_json::Value = response.json().await.unwrap();
    let words = json["words"].as_array().unwrap();
    assert!(words.len() >= 50);
    assert_eq!(json["count"].as_u64().unwrap() as usize, words.len());
    for word in words {
        assert!(!word["hanzi"].as_str().unwrap().is_empty());
        assert!(!word["pinyin"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn tts_get_passes_vendor_wav_through() {
    let (endpoint, requests) = spawn_vendor(VendorMode::Wav(sample_wav())).await;
    let server = spawn_app(config_with_vendor(&endpoint)).await;

    let response = reqwest::get(server.url("/api/tts?text=%E5%A4%A9%E7%A9%BA"))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["content-type"], "audio/wav");
    assert_eq!(
        response.headers()["cache-control"],
        "public, max-age=31536000, immutable"
    );
    assert_eq!(response.bytes().await.unwrap(), sample_wav());

    // The vendor got the configured defaults.
    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["model"], "glm-tts");
    assert_eq!(requests[0]["input"], "天空");
    assert_eq!(requests[0]["voice"], "tongtong");
    assert_eq!(requests[0]["speed"], 1.0);
    assert_eq!(requests[0]["response_format"], "wav");
}

#[tokio::test]
async fn tts_post_honors_voice_and_speed() {
    let (endpoint, requests) = spawn_vendor(VendorMode::Wav(sample_wav())).await;
    let server = spawn_app(config_with_vendor(&endpoint)).await;

    let response = reqwest::Client::new()
        .post(server.url("/api/tts"))
        .json(&serde_json::json!({ "text": "大海", "voice": "xiaoxiao", "speed": 1.5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let requests = requests.lock().unwrap();
    assert_eq!(requests[0]["input"], "大海");
    assert_eq!(requests[0]["voice"], "xiaoxiao");
    assert_eq!(requests[0]["speed"], 1.5);
}

#[tokio::test]
async fn tts_wraps_vendor_pcm_in_a_wav_container() {
    let pcm = vec![0u8; 480];
    let (endpoint, _) = spawn_vendor(VendorMode::JsonPcm(pcm.clone())).await;
    let server = spawn_app(config_with_vendor(&endpoint)).await;

    let response = reqwest::get(server.url("/api/tts?text=%E5%A4%A9%E7%A9%BA"))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body = response.bytes().await.unwrap();
    assert!(wav::is_wav(&body));
    assert_eq!(body.len(), 44 + pcm.len());
}

#[tokio::test]
async fn tts_vendor_failure_maps_to_gateway_error_with_truncated_detail() {
    let long_detail = "x".repeat(5000);
    let (endpoint, _) = spawn_vendor(VendorMode::Error(500, long_detail)).await;
    let server = spawn_app(config_with_vendor(&endpoint)).await;

    let response = reqwest::get(server.url("/api/tts?text=%E5%A4%A9%E7%A9%BA"))
        .await
        .unwrap();
    assert_eq!(response.status(), 502);

    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["error"], "Upstream TTS failed");
    assert_eq!(json["status"], 500);
    assert_eq!(json["detail"].as_str().unwrap().len(), 2000);
}

#[tokio::test]
async fn tts_unparseable_speed_falls_back_to_default() {
    let (endpoint, requests) = spawn_vendor(VendorMode::Wav(sample_wav())).await;
    let server = spawn_app(config_with_vendor(&endpoint)).await;

    let response = reqwest::get(server.url("/api/tts?text=%E5%A4%A9%E7%A9%BA&speed=fast"))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let requests = requests.lock().unwrap();
    assert_eq!(requests[0]["speed"], 1.0);
}

#[tokio::test]
async fn tts_blank_text_is_rejected() {
    let (endpoint, requests) = spawn_vendor(VendorMode::Wav(sample_wav())).await;
    let server = spawn_app(config_with_vendor(&endpoint)).await;

    let response = reqwest::Client::new()
        .post(server.url("/api/tts"))
        .json(&serde_json::json!({ "text": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["error"], "Missing text");
    assert!(requests.lock().unwrap().is_empty());
}
