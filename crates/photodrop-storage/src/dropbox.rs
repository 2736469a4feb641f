//! Dropbox-backed implementations of the storage seams.
//!
//! Two fixed endpoints: the OAuth2 token endpoint (refresh-token grant with
//! HTTP Basic app credentials) and the content upload endpoint (Bearer auth
//! plus a `Dropbox-API-Arg` header describing the target path and write
//! mode). Both are overridable in the constructors for tests.

use async_trait::async_trait;
use base64::Engine;
use photodrop_core::DropboxCredentials;

use crate::traits::{ObjectStore, StorageError, StorageResult, TokenSource};

const TOKEN_URL: &str = "https://api.dropboxapi.com/oauth2/token";
const CONTENT_URL: &str = "https://content.dropboxapi.com/2/files/upload";

/// Token source backed by the Dropbox OAuth2 refresh-token grant.
pub struct DropboxAuth {
    http: reqwest::Client,
    credentials: DropboxCredentials,
    token_url: String,
}

impl DropboxAuth {
    pub fn new(credentials: DropboxCredentials) -> Self {
        Self::with_token_url(credentials, TOKEN_URL)
    }

    pub fn with_token_url(credentials: DropboxCredentials, token_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            token_url: token_url.into(),
        }
    }
}

#[async_trait]
impl TokenSource for DropboxAuth {
    async fn access_token(&self) -> StorageResult<String> {
        let (key, secret, refresh) = match (
            &self.credentials.app_key,
            &self.credentials.app_secret,
            &self.credentials.refresh_token,
        ) {
            (Some(key), Some(secret), Some(refresh)) => (key, secret, refresh),
            _ => {
                return Err(StorageError::MissingCredentials(
                    "DROPBOX_APP_KEY, DROPBOX_APP_SECRET and DROPBOX_REFRESH_TOKEN must be set"
                        .to_string(),
                ))
            }
        };

        let basic = base64::engine::general_purpose::STANDARD.encode(format!("{key}:{secret}"));
        let response = self
            .http
            .post(&self.token_url)
            .header(reqwest::header::AUTHORIZATION, format!("Basic {basic}"))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh.as_str()),
            ])
            .send()
            .await
            .map_err(|e| StorageError::TokenFetch(e.to_string()))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| StorageError::TokenFetch(e.to_string()))?;

        match body.get("access_token").and_then(|v| v.as_str()) {
            Some(token) => Ok(token.to_string()),
            // Surface the provider's diagnostic payload verbatim.
            None => Err(StorageError::TokenFetch(body.to_string())),
        }
    }
}

/// Object store writing through the Dropbox content endpoint.
pub struct DropboxStore {
    http: reqwest::Client,
    content_url: String,
}

impl DropboxStore {
    pub fn new() -> Self {
        Self::with_content_url(CONTENT_URL)
    }

    pub fn with_content_url(content_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            content_url: content_url.into(),
        }
    }
}

impl Default for DropboxStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for DropboxStore {
    async fn put(&self, access_token: &str, path: &str, data: Vec<u8>) -> StorageResult<()> {
        let api_arg = serde_json::json!({
            "path": path,
            "mode": "add",
            "autorename": true,
            "mute": true,
        });

        let size = data.len();
        let response = self
            .http
            .post(&self.content_url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {access_token}"),
            )
            .header("Dropbox-API-Arg", header_safe_json(&api_arg))
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(data)
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::UploadFailed(body));
        }

        tracing::debug!(path = %path, size_bytes = size, "Object stored");
        Ok(())
    }
}

/// Serialize a JSON value with all non-ASCII characters `\u`-escaped.
/// HTTP header values must stay ASCII, and folder paths routinely carry
/// non-ASCII submitter names.
fn header_safe_json(value: &serde_json::Value) -> String {
    let raw = value.to_string();
    let mut out = String::with_capacity(raw.len());
    let mut buf = [0u16; 2];
    for c in raw.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            for unit in c.encode_utf16(&mut buf) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    out
}
