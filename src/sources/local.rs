//! Local filesystem file source.

use crate::source::{FileSource, FileStat, FileStream, SourceError};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::io;
use std::path::Path;
use tokio::fs;

/// File source backed by the local filesystem.
///
/// Paths handed to it are already joined against the configured root by the
/// middleware; the source itself is a stateless pass-through.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFiles;

impl LocalFiles {
	/// Create a new local filesystem source.
	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl FileSource for LocalFiles {
	async fn exists(&self, path: &Path) -> bool {
		// Only a definite "does not exist" maps to false. An entry that
		// cannot be inspected (e.g. permission denied) counts as existing
		// and the failure surfaces later, from read or open_stream.
		match fs::metadata(path).await {
			Err(error) if error.kind() == io::ErrorKind::NotFound => false,
			_ => true,
		}
	}

	async fn read(&self, path: &Path) -> Result<Bytes, SourceError> {
		let buf = fs::read(path).await?;
		Ok(Bytes::from(buf))
	}

	async fn stat(&self, path: &Path) -> Option<FileStat> {
		let metadata = fs::metadata(path).await.ok()?;
		let modified: DateTime<Utc> = metadata.modified().ok()?.into();
		Some(FileStat {
			size: metadata.len(),
			modified,
		})
	}

	async fn open_stream(&self, path: &Path) -> Result<FileStream, SourceError> {
		let file = fs::File::open(path).await?;
		Ok(Box::new(file))
	}
}
