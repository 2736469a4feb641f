//! Photodrop core library
//!
//! Shared pieces used by both the API server and the CLI client: the error
//! taxonomy, environment-driven configuration, deterministic artifact naming,
//! and the metadata record written next to every stored photo.

pub mod config;
pub mod error;
pub mod models;
pub mod naming;

pub use config::{Config, DropboxCredentials, SubmitterDirectory};
pub use error::{AppError, LogLevel};
pub use models::MetadataRecord;
