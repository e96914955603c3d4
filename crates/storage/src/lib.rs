pub mod backend;
pub mod error;
mod models;
mod path;

pub use crate::backend::StorageBackend;
pub use crate::models::FolderEntry;
pub use crate::path::validate as validate_path;
