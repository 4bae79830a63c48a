use async_trait::async_trait;

use crate::{
    entities::{
        footer::Footer,
        image::UploadedImage,
        motif::Motif,
    },
    errors::ClientError,
};

/// The catalog service as seen from the client side. `ApiClient` speaks it
/// over HTTP; the state controller only depends on this trait.
#[async_trait]
pub trait MotifApi: Send + Sync {
    async fn get_motifs(&self) -> Result<Vec<Motif>, ClientError>;

    async fn get_motif(&self, id: &str) -> Result<Motif, ClientError>;

    async fn create_motif(&self, motif: &Motif) -> Result<String, ClientError>;

    async fn update_motif(&self, id: &str, motif: &Motif) -> Result<String, ClientError>;

    async fn delete_motif(&self, id: &str) -> Result<(), ClientError>;

    async fn get_footer(&self) -> Result<Footer, ClientError>;

    async fn update_footer(&self, footer: &Footer) -> Result<(), ClientError>;

    async fn upload_image(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedImage, ClientError>;
}
