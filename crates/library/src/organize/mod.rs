//! Folder renaming and same-day merging.
//!
//! Renames exported folders such as `IMG, 12 stycznia 2020` to their
//! canonical `2020-01-12` name. When a second folder maps to a date that this
//! run has already produced, its files are moved into the canonical folder
//! instead and the emptied folder is removed.
//!
//! The primary entry point is [`organize`], which lists the root through a
//! [`StorageBackend`](datedirs_storage::StorageBackend) and yields an
//! [`OrganizeEvent`] for every folder passed to [`organize_folder`].

pub mod error;
mod folder;
mod merge;
mod run;

pub use self::folder::{Action, organize_folder};
pub use self::run::{Organize, OrganizeEvent, Summary, organize};
