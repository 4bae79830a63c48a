use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::{constants::API_PREFIX, errors::SignatureError, settings::AppConfig};

const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;
/// Ten years; longer lifetimes are clamped.
const MAX_TTL_SECS: u64 = 10 * 31_536_000;

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageClaims {
    /// Blob name the token grants read access to
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

/// Issues and checks time-limited retrieval URLs for stored images.
#[derive(Clone)]
pub struct UrlSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    public_url: String,
    ttl: Duration,
}

impl UrlSigner {
    pub fn new(secret: &str, public_url: &str, ttl_secs: u64) -> Self {
        let secret = Zeroizing::new(secret.to_string());

        UrlSigner {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            public_url: public_url.trim_end_matches('/').to_string(),
            ttl: Duration::seconds(ttl_secs.min(MAX_TTL_SECS) as i64),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.signing_secret, &config.public_url, config.signed_url_ttl_secs)
    }

    pub fn sign(&self, file_name: &str) -> Result<String, SignatureError> {
        let now = Utc::now();
        let claims = ImageClaims {
            sub: file_name.to_string(),
            exp: (now + self.ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding)
            .map_err(|e| SignatureError::Creation(e.to_string()))
    }

    /// Full retrieval URL for `file_name`, valid for the configured lifetime.
    pub fn signed_url(&self, file_name: &str) -> Result<String, SignatureError> {
        let token = self.sign(file_name)?;

        Ok(format!(
            "{}{}/images/{}?token={}",
            self.public_url,
            API_PREFIX,
            urlencoding::encode(file_name),
            token
        ))
    }

    pub fn verify(&self, file_name: &str, token: &str) -> Result<(), SignatureError> {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.validate_exp = true;

        let claims = decode::<ImageClaims>(token, &self.decoding, &validation)?.claims;

        if claims.sub != file_name {
            tracing::warn!("Signed URL presented for a different image: {}", file_name);
            return Err(SignatureError::Invalid);
        }
        Ok(())
    }
}

impl fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlSigner")
            .field("keys", &"[REDACTED]")
            .field("public_url", &self.public_url)
            .field("ttl", &self.ttl)
            .finish()
    }
}
