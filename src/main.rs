use shizi::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    let addr = config.addr();

    let app = shizi::app(&config).expect("embedded word bank is valid");

    tracing::info!("Starting server on {}", addr);
    if config.tts_api_key.is_none() {
        tracing::warn!("ZHIPU_API_KEY is not set; /api/tts will return errors");
    }

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
