//! Local disk storage for uploaded listing images.

use roost_common::models::ListingImage;
use roost_common::{BoxFuture, ImageStorage, IncomingFile, UploadError};
use roost_config::UploadConfig;
use std::path::PathBuf;
use tracing::{debug, info};
use uuid::Uuid;

/// Stores listing images on the local filesystem.
///
/// Files land in `uploads.dir` under a UUID-prefixed name and are served back
/// from `uploads.public_path`.
#[derive(Debug, Clone)]
pub struct LocalImageStorage {
    dir: PathBuf,
    public_path: String,
}

impl LocalImageStorage {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            dir: PathBuf::from(&config.dir),
            public_path: config.public_path.trim_end_matches('/').to_string(),
        }
    }

    async fn write(&self, file: IncomingFile) -> Result<ListingImage, UploadError> {
        let content_type = file.content_type.unwrap_or_default();
        if !content_type.starts_with("image/") {
            return Err(UploadError::UnsupportedType(content_type));
        }

        let safe_name = sanitize_file_name(&file.file_name)
            .ok_or_else(|| UploadError::InvalidName(file.file_name.clone()))?;
        let filename = format!("{}-{}", Uuid::new_v4(), safe_name);

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(&filename);
        debug!("Writing {} bytes to {}", file.bytes.len(), path.display());
        tokio::fs::write(&path, &file.bytes).await?;

        info!("Stored upload {} as {}", file.file_name, filename);
        Ok(ListingImage {
            url: format!("{}/{}", self.public_path, filename),
            filename,
        })
    }
}

impl ImageStorage for LocalImageStorage {
    fn store(&self, file: IncomingFile) -> BoxFuture<'_, ListingImage, UploadError> {
        Box::pin(self.write(file))
    }
}

/// Keeps the last path component and drops anything outside `[A-Za-z0-9._-]`.
pub fn sanitize_file_name(raw: &str) -> Option<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
