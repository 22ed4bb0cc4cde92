use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;

use crate::domain::repository::ImageStore;
use crate::error::GameServiceError;

/// Filesystem-backed image store. Stands in for an object-storage provider;
/// files land under `root` and are served from `base_url`.
#[derive(Clone)]
pub struct LocalImageStore {
    pub root: PathBuf,
    pub base_url: String,
}

/// Keep alphanumerics, dots and dashes; everything else becomes `_`.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl ImageStore for LocalImageStore {
    async fn store(&self, filename: &str, bytes: &[u8]) -> Result<String, GameServiceError> {
        let name = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            sanitize_filename(filename)
        );
        tokio::fs::create_dir_all(&self.root)
            .await
            .context("create upload directory")?;
        tokio::fs::write(self.root.join(&name), bytes)
            .await
            .context("write uploaded image")?;
        Ok(format!("{}/{}", self.base_url.trim_end_matches('/'), name))
    }
}
