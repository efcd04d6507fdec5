//! In-memory asset bundle file source.

use crate::source::{FileSource, FileStat, FileStream, SourceError};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::io::{self, Cursor};
use std::path::Path;

/// File source backed by an in-memory bundle of named assets, typically
/// produced at build time.
///
/// Assets are keyed by the absolute path the middleware resolves, so the
/// bundle is built against the same root the middleware is configured with.
/// `stat` is unsupported and always absent; a bundle-backed deployment pairs
/// with strong-ETag mode, which needs neither size nor mtime metadata.
///
/// # Examples
///
/// ```
/// use static_serve::InMemoryFiles;
///
/// let assets = InMemoryFiles::new()
/// 	.with_asset("/var/www/index.html", "<html></html>")
/// 	.with_asset("/var/www/app.css", "body {}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryFiles {
	assets: HashMap<String, Bytes>,
}

impl InMemoryFiles {
	/// Create an empty bundle.
	pub fn new() -> Self {
		Self::default()
	}

	/// Add an asset, builder style.
	pub fn with_asset(mut self, path: impl Into<String>, content: impl Into<Bytes>) -> Self {
		self.insert(path, content);
		self
	}

	/// Add an asset.
	pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Bytes>) {
		self.assets.insert(path.into(), content.into());
	}

	fn get(&self, path: &Path) -> Option<&Bytes> {
		self.assets.get(path.to_string_lossy().as_ref())
	}
}

#[async_trait]
impl FileSource for InMemoryFiles {
	async fn exists(&self, path: &Path) -> bool {
		self.get(path).is_some()
	}

	async fn read(&self, path: &Path) -> Result<Bytes, SourceError> {
		self.get(path).cloned().ok_or_else(|| {
			SourceError::Io(io::Error::new(
				io::ErrorKind::NotFound,
				format!("asset not found: {}", path.display()),
			))
		})
	}

	async fn stat(&self, _path: &Path) -> Option<FileStat> {
		None
	}

	async fn open_stream(&self, path: &Path) -> Result<FileStream, SourceError> {
		let content = self.read(path).await?;
		Ok(Box::new(Cursor::new(content)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tokio::io::AsyncReadExt;

	#[tokio::test]
	async fn test_exists_and_read() {
		let assets = InMemoryFiles::new().with_asset("/www/a.css", "body {}");
		assert!(assets.exists(Path::new("/www/a.css")).await);
		assert!(!assets.exists(Path::new("/www/b.css")).await);
		assert_eq!(assets.read(Path::new("/www/a.css")).await.unwrap(), "body {}");
	}

	#[tokio::test]
	async fn test_stat_always_absent() {
		let assets = InMemoryFiles::new().with_asset("/www/a.css", "body {}");
		assert!(assets.stat(Path::new("/www/a.css")).await.is_none());
	}

	#[tokio::test]
	async fn test_open_stream_wraps_bytes() {
		let assets = InMemoryFiles::new().with_asset("/www/a.css", "body {}");
		let mut stream = assets.open_stream(Path::new("/www/a.css")).await.unwrap();
		let mut buf = Vec::new();
		stream.read_to_end(&mut buf).await.unwrap();
		assert_eq!(buf, b"body {}");
	}

	#[tokio::test]
	async fn test_read_missing_asset() {
		let assets = InMemoryFiles::new();
		let error = assets.read(Path::new("/www/a.css")).await.unwrap_err();
		assert!(error.status_code().is_none());
	}
}
