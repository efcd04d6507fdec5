//! File source capability consumed by the static serve middleware.
//!
//! A [`FileSource`] answers four questions about an already-resolved path:
//! does it exist, what are its bytes, what are its size and mtime, and can
//! it be opened for sequential reading. Implementations are stateless per
//! call and safe for concurrent use; the middleware decides which paths to
//! ask about.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use hyper::StatusCode;
use std::path::Path;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Boxed byte reader used for streamed response bodies.
pub type FileStream = Box<dyn AsyncRead + Send + Unpin>;

/// Size and modification time reported by a file source.
#[derive(Debug, Clone, Copy)]
pub struct FileStat {
	/// File size in bytes.
	pub size: u64,
	/// Last modification time.
	pub modified: DateTime<Utc>,
}

/// Failure reported by a file source operation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
	/// Plain I/O failure with no HTTP classification.
	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// A failure the source already classified with an HTTP status.
	/// The middleware passes the status through verbatim.
	#[error("{message}")]
	Status {
		/// Status the source attached to the failure.
		status: StatusCode,
		/// Failure message.
		message: String,
	},
}

impl SourceError {
	/// The HTTP status the source attached to this failure, if any.
	pub fn status_code(&self) -> Option<StatusCode> {
		match self {
			SourceError::Status { status, .. } => Some(*status),
			SourceError::Io(_) => None,
		}
	}
}

/// Pluggable backend abstraction over a named file.
#[async_trait]
pub trait FileSource: Send + Sync {
	/// Whether the file exists.
	async fn exists(&self, path: &Path) -> bool;

	/// Read the whole file into memory.
	async fn read(&self, path: &Path) -> Result<Bytes, SourceError>;

	/// Size and modification time, when the source can provide them.
	/// `None` is not an error; callers fall back to not emitting the
	/// headers derived from it.
	async fn stat(&self, path: &Path) -> Option<FileStat>;

	/// Open the file for sequential reading.
	async fn open_stream(&self, path: &Path) -> Result<FileStream, SourceError>;
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io;

	#[test]
	fn test_io_error_has_no_status() {
		let error = SourceError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
		assert!(error.status_code().is_none());
	}

	#[test]
	fn test_structured_error_keeps_status() {
		let error = SourceError::Status {
			status: StatusCode::FORBIDDEN,
			message: "denied".into(),
		};
		assert_eq!(error.status_code(), Some(StatusCode::FORBIDDEN));
		assert_eq!(error.to_string(), "denied");
	}
}
