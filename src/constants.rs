use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Every route of the service is mounted under this prefix.
pub const API_PREFIX: &str = "/api/v1";

pub const MOTIF_KEY_PREFIX: &str = "motif:";
pub const FOOTER_KEY: &str = "footer";

/// One year, the lifetime of a signed image URL unless configured otherwise.
pub const DEFAULT_SIGNED_URL_TTL_SECS: u64 = 31_536_000;

/// 5 MiB, matches the size limit of the image bucket.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub fn motif_key(id: &str) -> String {
    format!("{MOTIF_KEY_PREFIX}{id}")
}
