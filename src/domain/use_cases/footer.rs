use serde_json::{json, Value};
use tracing::instrument;

use crate::{
    constants::FOOTER_KEY,
    errors::AppError,
    repositories::kv_store::KvStore,
};

pub struct FooterHandler<K>
where
    K: KvStore,
{
    pub kv_store: K,
}

impl<K> FooterHandler<K>
where
    K: KvStore,
{
    pub fn new(kv_store: K) -> Self {
        FooterHandler { kv_store }
    }

    /// The saved footer as stored, or `{}` if nothing was ever saved
    #[instrument(skip(self))]
    pub async fn get_footer(&self) -> Result<Value, AppError> {
        let stored = self
            .kv_store
            .get(FOOTER_KEY)
            .await
            .map_err(|e| AppError::storage("Failed to fetch footer", e))?;

        Ok(match stored {
            None | Some(Value::Null) => json!({}),
            Some(value) => value,
        })
    }

    /// Overwrites the singleton with the body as sent; nothing is merged
    #[instrument(skip(self, body))]
    pub async fn update_footer(&self, body: Value) -> Result<(), AppError> {
        self.kv_store
            .set(FOOTER_KEY, &body)
            .await
            .map_err(|e| AppError::storage("Failed to update footer", e))?;

        tracing::info!("Footer updated");
        Ok(())
    }
}
