use std::sync::Arc;

use zeroize::Zeroizing;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, client};

use auth::signed_url::UrlSigner;
use errors::StoreError;
use repositories::{
    blob_store::{BlobStore, FsBlobStore, MemoryBlobStore},
    kv_store::{KvStore, MemoryKvStore, RedisKvStore},
};
use use_cases::{footer::FooterHandler, image::ImageHandler, motif::MotifHandler};

pub type SharedKvStore = Arc<dyn KvStore>;
pub type SharedBlobStore = Arc<dyn BlobStore>;

pub type AppMotifHandler = MotifHandler<SharedKvStore, SharedBlobStore>;
pub type AppFooterHandler = FooterHandler<SharedKvStore>;
pub type AppImageHandler = ImageHandler<SharedBlobStore>;

pub struct AppState {
    pub motif_handler: AppMotifHandler,
    pub footer_handler: AppFooterHandler,
    pub image_handler: AppImageHandler,
    pub kv_store: SharedKvStore,
    pub api_key: Zeroizing<String>,
}

impl AppState {
    pub fn new(
        config: &settings::AppConfig,
        kv_store: SharedKvStore,
        blob_store: SharedBlobStore,
    ) -> Self {
        let signer = UrlSigner::from_config(config);

        AppState {
            motif_handler: MotifHandler::new(kv_store.clone(), blob_store.clone()),
            footer_handler: FooterHandler::new(kv_store.clone()),
            image_handler: ImageHandler::new(blob_store, signer, config.max_upload_bytes),
            kv_store,
            api_key: Zeroizing::new(config.api_key.clone()),
        }
    }
}

/// Picks the storage backends from config, falling back to process memory
/// when a backend is not configured, and prepares blob storage for writes.
pub async fn build_storage(
    config: &settings::AppConfig,
) -> Result<(SharedKvStore, SharedBlobStore), StoreError> {
    let kv_store: SharedKvStore = match config.redis_url.as_deref() {
        Some(url) => {
            let store = RedisKvStore::new(url)?;
            if let Err(e) = store.check_connection().await {
                tracing::warn!("Redis is not reachable yet: {}", e);
            }
            Arc::new(store)
        }
        None => {
            tracing::warn!("APP_REDIS_URL not set, records are kept in memory only");
            Arc::new(MemoryKvStore::new())
        }
    };

    let blob_store: SharedBlobStore = match config.blob_dir.as_deref() {
        Some(dir) => Arc::new(FsBlobStore::new(dir)),
        None => {
            tracing::warn!("APP_BLOB_DIR not set, images are kept in memory only");
            Arc::new(MemoryBlobStore::new())
        }
    };
    blob_store.init().await?;

    Ok((kv_store, blob_store))
}
