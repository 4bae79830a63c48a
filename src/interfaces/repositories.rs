pub mod blob_store;
pub mod catalog_api;
pub mod kv_store;
