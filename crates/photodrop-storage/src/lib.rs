//! Photodrop storage library
//!
//! Clients for the Auth Provider and the Object Store. The upload pipeline
//! depends only on the [`TokenSource`] and [`ObjectStore`] traits; the
//! Dropbox-backed implementations live in the `dropbox` module.

pub mod dropbox;
pub mod traits;

pub use dropbox::{DropboxAuth, DropboxStore};
pub use traits::{ObjectStore, StorageError, StorageResult, TokenSource};
