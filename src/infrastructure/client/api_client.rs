use std::fmt;

use async_trait::async_trait;
use reqwest::{multipart, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use tracing::instrument;
use zeroize::Zeroizing;

use crate::{
    constants::{API_PREFIX, MAX_IMAGE_BYTES},
    entities::{
        footer::{Footer, FooterResponse},
        image::UploadedImage,
        motif::Motif,
    },
    errors::ClientError,
    repositories::catalog_api::MotifApi,
    settings::ClientConfig,
};

/// Records are decoded one by one so a single malformed entry cannot hide the rest.
#[derive(Deserialize)]
struct MotifsResponse {
    motifs: Vec<Value>,
}

#[derive(Deserialize)]
struct MotifResponse {
    motif: Motif,
}

#[derive(Deserialize)]
struct SavedResponse {
    id: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// HTTP client for the catalog service. One attempt per call, every request
/// carries the bearer credential.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    api_base: String,
    api_key: Zeroizing<String>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: &ClientConfig) -> Self {
        ApiClient {
            http,
            api_base: format!("{}{}", config.base_url.trim_end_matches('/'), API_PREFIX),
            api_key: Zeroizing::new(config.api_key.clone()),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.api_base, path))
            .bearer_auth(self.api_key.as_str())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));

        tracing::warn!(status = status.as_u16(), "Catalog service rejected request: {}", message);

        if status == StatusCode::NOT_FOUND {
            Err(ClientError::NotFound(message))
        } else {
            Err(ClientError::Api { status: status.as_u16(), message })
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

fn readable_motifs(records: Vec<Value>) -> Vec<Motif> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<Motif>(record) {
            Ok(motif) => Some(motif),
            Err(e) => {
                tracing::warn!("Skipping unreadable motif record: {}", e);
                None
            }
        })
        .collect()
}

fn motif_path(id: &str) -> String {
    format!("/motifs/{}", urlencoding::encode(id))
}

/// Local pre-flight for image uploads: only `image/*` up to the storage limit.
pub fn check_image(content_type: &str, size: usize) -> Result<(), ClientError> {
    if !content_type.starts_with("image/") {
        return Err(ClientError::InvalidInput(
            "Lütfen geçerli bir resim dosyası seçin".to_string(),
        ));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(ClientError::InvalidInput(
            "Dosya boyutu 5MB'dan küçük olmalıdır".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl MotifApi for ApiClient {
    #[instrument(skip(self))]
    async fn get_motifs(&self) -> Result<Vec<Motif>, ClientError> {
        let body: MotifsResponse = self.send_json(self.request(Method::GET, "/motifs")).await?;
        Ok(readable_motifs(body.motifs))
    }

    #[instrument(skip(self))]
    async fn get_motif(&self, id: &str) -> Result<Motif, ClientError> {
        let body: MotifResponse = self.send_json(self.request(Method::GET, &motif_path(id))).await?;
        Ok(body.motif)
    }

    #[instrument(skip(self, motif), fields(motif_id = %motif.id))]
    async fn create_motif(&self, motif: &Motif) -> Result<String, ClientError> {
        let request = self.request(Method::POST, "/motifs").json(motif);
        let body: SavedResponse = self.send_json(request).await?;
        Ok(body.id)
    }

    #[instrument(skip(self, motif))]
    async fn update_motif(&self, id: &str, motif: &Motif) -> Result<String, ClientError> {
        let request = self.request(Method::PUT, &motif_path(id)).json(motif);
        let body: SavedResponse = self.send_json(request).await?;
        Ok(body.id)
    }

    #[instrument(skip(self))]
    async fn delete_motif(&self, id: &str) -> Result<(), ClientError> {
        self.send(self.request(Method::DELETE, &motif_path(id))).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_footer(&self) -> Result<Footer, ClientError> {
        let body: FooterResponse = self.send_json(self.request(Method::GET, "/footer")).await?;
        Ok(body.footer)
    }

    #[instrument(skip(self, footer))]
    async fn update_footer(&self, footer: &Footer) -> Result<(), ClientError> {
        self.send(self.request(Method::PUT, "/footer").json(footer)).await?;
        Ok(())
    }

    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn upload_image(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedImage, ClientError> {
        check_image(content_type, bytes.len())?;

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| ClientError::InvalidInput(e.to_string()))?;
        let form = multipart::Form::new().part("file", part);

        self.send_json(self.request(Method::POST, "/upload-image").multipart(form))
            .await
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_base", &self.api_base)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
