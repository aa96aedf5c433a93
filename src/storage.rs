use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use tokio::fs;

use crate::error::{AppError, AppResult};

/// Product image storage on the local filesystem, served under `public_base`.
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
    public_base: String,
}

impl BlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Stores `bytes` under `products/` and returns the public download URL.
    pub async fn upload(&self, file_name: &str, bytes: &[u8]) -> AppResult<String> {
        if bytes.is_empty() {
            return Err(AppError::BadRequest("image file is empty".into()));
        }
        let key = format!(
            "products/{}_{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(file_name)
        );
        let path = self.root.join(&key);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        fs::write(&path, bytes)
            .await
            .with_context(|| format!("writing {}", path.display()))?;

        Ok(self.download_url(&key))
    }

    pub fn download_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, key)
    }
}

fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_flattened() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("my photo.png"), "my_photo.png");
        assert_eq!(sanitize_file_name(".."), "image");
    }

    #[tokio::test]
    async fn upload_writes_file_and_returns_url() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = BlobStore::new(dir.path(), "/uploads/");

        let url = store.upload("burger.jpg", b"jpeg").await.expect("upload");

        assert!(url.starts_with("/uploads/products/"));
        assert!(url.ends_with("_burger.jpg"));
        let key = url.trim_start_matches("/uploads/");
        let stored = std::fs::read(dir.path().join(key)).expect("stored file");
        assert_eq!(stored, b"jpeg");
    }

    #[tokio::test]
    async fn empty_upload_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = BlobStore::new(dir.path(), "/uploads");
        assert!(store.upload("a.png", b"").await.is_err());
    }
}
