//! Configuration module
//!
//! All runtime configuration is read from the environment once at startup
//! into an immutable structure that is carried in shared state. The
//! submitter directory and the CORS allow-list are part of it, never
//! module-level globals, so tests can run the full pipeline with alternate
//! directories.

use std::collections::HashMap;
use std::env;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_FILE_SIZE_MB: usize = 40;

/// Extra allowance on top of the file size limit for multipart framing.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Application configuration, constructed once at process start.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    /// CORS origin allow-list; empty means wildcard.
    pub cors_origins: Vec<String>,
    /// Shared upload PIN. Absence is a request-time server misconfiguration,
    /// reported as 500 rather than a client error.
    pub pin_code: Option<String>,
    pub dropbox: DropboxCredentials,
    pub max_file_size_bytes: usize,
    pub directory: SubmitterDirectory,
}

/// Long-lived Auth Provider credential triple. Each field may be absent;
/// the token fetch fails the request with a configuration error then.
#[derive(Clone, Debug, Default)]
pub struct DropboxCredentials {
    pub app_key: Option<String>,
    pub app_secret: Option<String>,
    pub refresh_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let server_port = env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let cors_origins: Vec<String> = env::var("ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_FILE_SIZE_MB);

        let raw_folders = env::var("VET_FOLDERS").map_err(|_| {
            anyhow::anyhow!("VET_FOLDERS must be set (comma-separated key=folder pairs)")
        })?;
        let directory = SubmitterDirectory::parse(&raw_folders)?;

        Ok(Config {
            server_port,
            cors_origins,
            pin_code: env::var("PIN_CODE").ok().filter(|s| !s.is_empty()),
            dropbox: DropboxCredentials {
                app_key: env::var("DROPBOX_APP_KEY").ok().filter(|s| !s.is_empty()),
                app_secret: env::var("DROPBOX_APP_SECRET").ok().filter(|s| !s.is_empty()),
                refresh_token: env::var("DROPBOX_REFRESH_TOKEN").ok().filter(|s| !s.is_empty()),
            },
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            directory,
        })
    }

    /// Maximum accepted request body: file size limit plus multipart overhead.
    pub fn max_body_bytes(&self) -> usize {
        self.max_file_size_bytes + MULTIPART_OVERHEAD_BYTES
    }

    pub fn max_file_size_mb(&self) -> usize {
        self.max_file_size_bytes / 1024 / 1024
    }
}

/// Immutable mapping from submitter keys to pre-provisioned remote folders.
/// Unknown keys are rejected before any remote call is made.
#[derive(Clone, Debug, Default)]
pub struct SubmitterDirectory {
    folders: HashMap<String, String>,
}

impl SubmitterDirectory {
    /// Parse the `VET_FOLDERS` format: comma-separated `key=folder` pairs.
    /// The folder may contain `=`; only the first one splits the pair.
    pub fn parse(raw: &str) -> Result<Self, anyhow::Error> {
        let mut folders = HashMap::new();
        for entry in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, folder) = entry.split_once('=').ok_or_else(|| {
                anyhow::anyhow!("Invalid VET_FOLDERS entry '{}': expected key=folder", entry)
            })?;
            let key = key.trim();
            let folder = folder.trim();
            if key.is_empty() || folder.is_empty() {
                return Err(anyhow::anyhow!(
                    "Invalid VET_FOLDERS entry '{}': key and folder must be non-empty",
                    entry
                ));
            }
            folders.insert(key.to_string(), folder.trim_end_matches('/').to_string());
        }
        if folders.is_empty() {
            return Err(anyhow::anyhow!(
                "VET_FOLDERS must contain at least one key=folder pair"
            ));
        }
        Ok(Self { folders })
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            folders: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn folder_for(&self, key: &str) -> Option<&str> {
        self.folders.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.folders.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}
