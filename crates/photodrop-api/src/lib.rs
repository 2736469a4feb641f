//! Photodrop API server library
//!
//! The Upload Handler: a single stateless endpoint that validates a photo
//! submission against a shared PIN and a fixed submitter directory, derives
//! a deterministic artifact name, and relays the file plus a JSON metadata
//! sidecar to the Object Store.

pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod utils;
