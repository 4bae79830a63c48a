pub mod footer;
pub mod home;
pub mod images;
pub mod motifs;
pub mod system;
