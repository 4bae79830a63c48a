#![allow(dead_code)]

use actix_web::{
    middleware::NormalizePath,
    web,
    App, HttpServer
};
use motiflab::{
    client::api_client::ApiClient,
    constants::{DEFAULT_SIGNED_URL_TTL_SECS, MAX_IMAGE_BYTES},
    middlewares::auth::AuthMiddleware,
    repositories::{blob_store::MemoryBlobStore, kv_store::MemoryKvStore},
    routes::configure_routes,
    settings::{AppConfig, AppEnvironment, ClientConfig},
    AppState,
};
use reqwest::{Client, Method, RequestBuilder};
use std::{net::TcpListener, sync::Arc, time::Duration};

pub const TEST_API_KEY: &str = "test-anon-key";
pub const TEST_ADMIN_PASSWORD: &str = "tetra86!";

#[derive(Clone)]
pub struct TestApp {
    pub state: Arc<AppState>,
    pub address: String,
    pub client: Client,
    pub config: AppConfig,
    pub kv_store: MemoryKvStore,
    pub blob_store: MemoryBlobStore,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(MemoryKvStore::new(), MemoryBlobStore::new()).await
    }

    /// Starts a server over the given stores, so a second instance can share
    /// state with the first one.
    pub async fn spawn_with(kv_store: MemoryKvStore, blob_store: MemoryBlobStore) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let mut config = test_config();
        config.public_url = address.clone();

        let state = Arc::new(AppState::new(
            &config,
            Arc::new(kv_store.clone()),
            Arc::new(blob_store.clone()),
        ));

        let state_clone = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::from(state_clone.clone()))
                .wrap(AuthMiddleware)
                .wrap(NormalizePath::trim())
                .configure(configure_routes)
        })
        .listen(listener)
        .expect("Failed to bind server")
        .workers(config.worker_count)
        .run();

        tokio::spawn(server);

        let client = Client::new();
        while client.get(&format!("{}/api/v1/health", address)).send().await.is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        Self {
            state,
            address,
            client,
            config,
            kv_store,
            blob_store,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.address, path)
    }

    /// A request carrying the service credential.
    pub fn authed(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .bearer_auth(TEST_API_KEY)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.address, TEST_API_KEY, TEST_ADMIN_PASSWORD)
    }

    pub fn api_client(&self) -> ApiClient {
        ApiClient::new(&self.client_config())
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "MotifLAB-Test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        worker_count: 1,
        redis_url: None,
        blob_dir: None,
        public_url: "http://127.0.0.1".to_string(),
        cors_allowed_origins: vec!["*".to_string()],
        api_key: TEST_API_KEY.to_string(),
        signing_secret: "test_signing_secret_that_is_long_enough_1234567890".to_string(),
        signed_url_ttl_secs: DEFAULT_SIGNED_URL_TTL_SECS,
        max_upload_bytes: MAX_IMAGE_BYTES,
    }
}

/// The body from the example scenario.
pub fn iznik_lalesi() -> serde_json::Value {
    serde_json::json!({
        "id": "1",
        "title": "İznik Lalesi",
        "category": "çini",
        "description": "d",
        "history": "h",
        "imageUrl": "https://x/y.png"
    })
}

/// A minimal valid PNG header, enough for content sniffing.
pub fn png_bytes() -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&[0u8; 64]);
    bytes
}
