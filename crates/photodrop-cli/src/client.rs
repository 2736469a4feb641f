//! HTTP client for the upload endpoint.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};

/// Text fields accompanying every file in a submission batch.
pub struct SubmissionFields {
    pub pin: String,
    pub vet: String,
    pub patient: String,
    pub owner: String,
    pub title: String,
}

pub struct UploadClient {
    client: Client,
    upload_url: String,
}

impl UploadClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            upload_url: format!("{}/api/upload", base_url.trim_end_matches('/')),
        })
    }

    /// Send one file. Returns the remote path reported by the server.
    pub async fn upload(
        &self,
        fields: &SubmissionFields,
        filename: &str,
        data: Vec<u8>,
    ) -> Result<String> {
        let form = Form::new()
            .text("pin", fields.pin.clone())
            .text("vet", fields.vet.clone())
            .text("patient", fields.patient.clone())
            .text("owner", fields.owner.clone())
            .text("title", fields.title.clone())
            .part("file", Part::bytes(data).file_name(filename.to_string()));

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .context("Upload request failed")?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        parse_upload_response(status, &body)
    }
}

/// Interpret the server's response: `{ok:true,path}` on success, the
/// `error` field otherwise. Non-JSON bodies fall back to the status line.
fn parse_upload_response(status: StatusCode, body: &str) -> Result<String> {
    let json: serde_json::Value = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(_) => {
            anyhow::bail!(
                "Server returned {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown")
            );
        }
    };

    if json.get("ok").and_then(|v| v.as_bool()) == Some(true) {
        if let Some(path) = json.get("path").and_then(|v| v.as_str()) {
            return Ok(path.to_string());
        }
    }

    match json.get("error").and_then(|v| v.as_str()) {
        Some(error) => anyhow::bail!("{error} ({})", status.as_u16()),
        None => anyhow::bail!("Unexpected response ({}): {body}", status.as_u16()),
    }
}
