//! Photodrop CLI, the batch photo uploader.
//!
//! Reads each file, downscales oversized PNG/JPEG images locally so the
//! longer side fits the server-friendly bound, and posts one multipart
//! submission per file. A failed downscale is never fatal; the original
//! bytes are sent instead. Per-file failures are reported and counted but
//! do not abort the rest of the batch.

mod client;

use anyhow::Context;
use clap::Parser;
use photodrop_processing::{downscale_if_needed, BitmapCodec, Downscaled, ImageCodec};

use crate::client::{SubmissionFields, UploadClient};

#[derive(Parser)]
#[command(name = "photodrop", about = "Clinic photo uploader")]
struct Cli {
    /// Base URL of the upload server
    #[arg(long, env = "PHOTODROP_URL", default_value = "http://localhost:3000")]
    url: String,

    /// Shared upload PIN
    #[arg(long, env = "PHOTODROP_PIN")]
    pin: String,

    /// Submitter key, must match a provisioned folder on the server
    #[arg(long)]
    vet: String,

    /// Patient name
    #[arg(long)]
    patient: String,

    /// Owner name (optional)
    #[arg(long, default_value = "")]
    owner: String,

    /// Photo title, e.g. the procedure or finding
    #[arg(long)]
    title: String,

    /// Image files to upload
    #[arg(required = true)]
    files: Vec<std::path::PathBuf>,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    for (flag, value) in [
        ("--pin", &cli.pin),
        ("--vet", &cli.vet),
        ("--patient", &cli.patient),
        ("--title", &cli.title),
    ] {
        if value.trim().is_empty() {
            anyhow::bail!("{flag} must not be empty");
        }
    }

    let client = UploadClient::new(&cli.url)?;
    let fields = SubmissionFields {
        pin: cli.pin,
        vet: cli.vet,
        patient: cli.patient,
        owner: cli.owner,
        title: cli.title,
    };

    let codec = BitmapCodec::new();
    let mut failures = 0usize;

    for path in &cli.files {
        match send_file(&client, &fields, &codec, path).await {
            Ok(remote_path) => {
                println!("{} -> {}", path.display(), remote_path);
            }
            Err(err) => {
                failures += 1;
                eprintln!("{}: {:#}", path.display(), err);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} uploads failed", cli.files.len());
    }
    Ok(())
}

async fn send_file(
    client: &UploadClient,
    fields: &SubmissionFields,
    codec: &BitmapCodec,
    path: &std::path::Path,
) -> anyhow::Result<String> {
    let original = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let original_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo.jpg".to_string());

    let (filename, data) = prepare_upload(codec, original_name, original);
    client.upload(fields, &filename, data).await
}

/// Downscale decision for one file: the resized bytes and their adjusted
/// filename when the image was shrunk, the untouched originals otherwise.
/// A codec failure is reported but never blocks the upload; the server
/// applies its own limits.
fn prepare_upload<C: ImageCodec>(
    codec: &C,
    filename: String,
    data: Vec<u8>,
) -> (String, Vec<u8>) {
    match downscale_if_needed(codec, &filename, &data) {
        Ok(Downscaled::Resized {
            data,
            filename,
            width,
            height,
        }) => {
            tracing::info!(file = %filename, width, height, "Downscaled before upload");
            (filename, data)
        }
        Ok(Downscaled::Unchanged) => (filename, data),
        Err(err) => {
            tracing::warn!(file = %filename, error = %err, "Downscale failed, sending original");
            (filename, data)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photodrop_processing::{CodecError, DynamicImage, OutputFormat};

    struct FailingCodec;

    impl ImageCodec for FailingCodec {
        fn decode(&self, _: &[u8]) -> Result<DynamicImage, CodecError> {
            Err(CodecError::Decode("corrupt header".to_string()))
        }
        fn resize(&self, _: &DynamicImage, _: u32, _: u32) -> DynamicImage {
            unreachable!()
        }
        fn encode(&self, _: &DynamicImage, _: OutputFormat) -> Result<Vec<u8>, CodecError> {
            unreachable!()
        }
    }

    #[test]
    fn codec_failure_falls_back_to_the_original_bytes() {
        let (filename, data) =
            prepare_upload(&FailingCodec, "broken.jpg".to_string(), vec![1, 2, 3]);
        assert_eq!(filename, "broken.jpg");
        assert_eq!(data, vec![1, 2, 3]);
    }

    #[test]
    fn resized_output_replaces_both_name_and_bytes() {
        struct ShrinkCodec;
        impl ImageCodec for ShrinkCodec {
            fn decode(&self, _: &[u8]) -> Result<DynamicImage, CodecError> {
                Ok(DynamicImage::new_rgb8(6000, 2000))
            }
            fn resize(&self, _: &DynamicImage, width: u32, height: u32) -> DynamicImage {
                DynamicImage::new_rgb8(width, height)
            }
            fn encode(&self, _: &DynamicImage, _: OutputFormat) -> Result<Vec<u8>, CodecError> {
                Ok(vec![9, 9, 9])
            }
        }

        let (filename, data) =
            prepare_upload(&ShrinkCodec, "scan.JPEG".to_string(), vec![0; 16]);
        assert_eq!(filename, "scan.jpg");
        assert_eq!(data, vec![9, 9, 9]);
    }

    #[test]
    fn small_non_image_payload_passes_through() {
        let (filename, data) =
            prepare_upload(&FailingCodec, "notes.gif".to_string(), vec![7, 7]);
        assert_eq!(filename, "notes.gif");
        assert_eq!(data, vec![7, 7]);
    }
}
