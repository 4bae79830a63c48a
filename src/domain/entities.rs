pub mod defaults;
pub mod footer;
pub mod image;
pub mod motif;
