// print_shop/src/services/file_store.rs

//! Blob storage for uploaded model files. The rest of the service only ever
//! sees the opaque handle returned by [`FileStore::save`].

use async_trait::async_trait;
use chrono::Utc;
use std::path::{Component, Path, PathBuf};
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::errors::{AppError, Result};

#[async_trait]
pub trait FileStore: Send + Sync {
  /// Persists `contents` and returns the handle to store on the order.
  async fn save(&self, original_name: &str, contents: Vec<u8>) -> Result<String>;

  /// Deletes a file previously returned by `save`. A missing file is not an error.
  async fn remove(&self, handle: &str) -> Result<()>;
}

/// Writes uploads into one directory as `<unix millis>-<random>-<sanitized name>`.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
  root: PathBuf,
}

impl LocalFileStore {
  /// Creates the directory if needed.
  pub async fn open(root: impl AsRef<Path>) -> Result<Self> {
    let root = root.as_ref().to_path_buf();
    tokio::fs::create_dir_all(&root).await.map_err(|e| {
      AppError::Config(format!("Cannot create upload directory '{}': {}", root.display(), e))
    })?;
    Ok(Self { root })
  }

  pub fn root(&self) -> &Path {
    &self.root
  }
}

/// Keeps ASCII alphanumerics, `.`, `-` and `_`; everything else becomes `_`.
/// Leading dots are dropped so the result can never be `..` or a hidden file.
pub fn sanitize_file_name(original: &str) -> String {
  let base = original.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default();
  let cleaned: String = base
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
    .take(100)
    .collect();
  let trimmed = cleaned.trim_start_matches('.');
  if trimmed.is_empty() {
    "upload".to_string()
  } else {
    trimmed.to_string()
  }
}

#[async_trait]
impl FileStore for LocalFileStore {
  #[instrument(name = "file_store::save", skip(self, contents), fields(bytes = contents.len()))]
  async fn save(&self, original_name: &str, contents: Vec<u8>) -> Result<String> {
    let unique = Uuid::new_v4().simple().to_string();
    let file_name = format!(
      "{}-{}-{}",
      Utc::now().timestamp_millis(),
      unique.get(..8).unwrap_or(&unique),
      sanitize_file_name(original_name)
    );
    let path = self.root.join(file_name);

    tokio::fs::write(&path, &contents).await.map_err(|e| {
      error!(error = %e, path = %path.display(), "Failed to write uploaded file.");
      AppError::Internal(format!("Failed to store uploaded file: {}", e))
    })?;

    let handle = path.to_string_lossy().into_owned();
    info!(%handle, "Uploaded file stored.");
    Ok(handle)
  }

  async fn remove(&self, handle: &str) -> Result<()> {
    let path = Path::new(handle);
    let escapes = path.components().any(|c| matches!(c, Component::ParentDir));
    if escapes || !path.starts_with(&self.root) {
      return Err(AppError::Internal(format!("Refusing to delete '{}' outside the upload root", handle)));
    }
    match tokio::fs::remove_file(path).await {
      Ok(()) => {
        info!(%handle, "Uploaded file removed.");
        Ok(())
      }
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(AppError::Internal(format!("Failed to remove uploaded file: {}", e))),
    }
  }
}
