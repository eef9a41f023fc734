use std::sync::Arc;

use echo_api::config::{EchoConfig, StoreKind};
use echo_api::state::AppState;
use echo_chat::model::bedrock_models;
use echo_storage::memory::MemoryStore;
use echo_storage::s3::S3Store;
use echo_storage::store::DocumentStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = EchoConfig::from_env();

    let aws = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .load()
        .await;

    let store: Arc<dyn DocumentStore> = match config.store {
        StoreKind::S3 => Arc::new(S3Store::new(
            aws_sdk_s3::Client::new(&aws),
            config.bucket.clone(),
        )),
        StoreKind::Memory => {
            tracing::warn!("using in-memory document store");
            Arc::new(MemoryStore::new())
        }
    };

    let models = bedrock_models(&aws, &config.chat_models);
    tracing::info!(
        bucket = %config.bucket,
        store = ?config.store,
        models = ?config.chat_models,
        "starting dr echo api"
    );

    let app = echo_api::router(AppState::new(store, models));

    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
