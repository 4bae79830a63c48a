pub mod catalog;
pub mod footer;
pub mod image;
pub mod motif;
pub mod session;
