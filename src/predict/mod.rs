pub mod client;
pub mod error;
pub mod format;
pub mod multipart;
pub mod predict;
pub mod response;
