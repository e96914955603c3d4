pub mod error;
pub mod organize;
mod registry;

pub use crate::registry::Registry;
