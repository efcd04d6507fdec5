//! Error types for the static serve middleware.
//!
//! Every failure is reported upward through the single error channel of the
//! middleware chain; nothing is logged here and nothing is retried.

use crate::response::{Body, Response};
use bytes::Bytes;
use hyper::StatusCode;
use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, StaticServeError>;

/// Errors raised by [`StaticServeMiddleware`](crate::StaticServeMiddleware).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StaticServeError {
	/// The request carried a query string and configuration forbids it.
	#[error("static serve not allow query string")]
	NotAllowQueryString,

	/// The resolved file does not exist.
	#[error("static file not found")]
	NotFound,

	/// The joined candidate path escapes the configured root.
	#[error("out of path")]
	OutOfPath,

	/// A path segment starts with a dot.
	#[error("static serve not allow access dot file")]
	NotAllowAccessDot,

	/// Reading the file from the backing source failed.
	///
	/// The status is the one the source attached to the failure, or
	/// 500 when the source reported a plain I/O error.
	#[error("read file fail: {message}")]
	ReadFail {
		/// Status propagated to the client.
		status: StatusCode,
		/// Underlying failure message.
		message: String,
	},

	/// Opening a read stream from the backing source failed.
	#[error("open stream fail: {0}")]
	OpenStreamFail(String),
}

impl StaticServeError {
	/// The HTTP status this error maps to.
	///
	/// # Examples
	///
	/// ```
	/// use hyper::StatusCode;
	/// use static_serve::StaticServeError;
	///
	/// assert_eq!(StaticServeError::NotFound.status_code(), StatusCode::NOT_FOUND);
	/// assert_eq!(StaticServeError::OutOfPath.status_code(), StatusCode::BAD_REQUEST);
	/// ```
	pub fn status_code(&self) -> StatusCode {
		match self {
			StaticServeError::NotFound => StatusCode::NOT_FOUND,
			StaticServeError::ReadFail { status, .. } => *status,
			StaticServeError::NotAllowQueryString
			| StaticServeError::OutOfPath
			| StaticServeError::NotAllowAccessDot
			| StaticServeError::OpenStreamFail(_) => StatusCode::BAD_REQUEST,
		}
	}
}

impl From<StaticServeError> for Response {
	fn from(error: StaticServeError) -> Self {
		let body = serde_json::json!({
			"error": error.to_string(),
		});
		let mut response = Response::new(error.status_code())
			.with_header("content-type", "application/json");
		response.body = Body::Full(Bytes::from(serde_json::to_vec(&body).unwrap_or_default()));
		response
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_mapping() {
		assert_eq!(
			StaticServeError::NotAllowQueryString.status_code(),
			StatusCode::BAD_REQUEST
		);
		assert_eq!(
			StaticServeError::NotAllowAccessDot.status_code(),
			StatusCode::BAD_REQUEST
		);
		assert_eq!(StaticServeError::NotFound.status_code(), StatusCode::NOT_FOUND);
		assert_eq!(
			StaticServeError::OpenStreamFail("boom".into()).status_code(),
			StatusCode::BAD_REQUEST
		);
	}

	#[test]
	fn test_read_fail_keeps_source_status() {
		let error = StaticServeError::ReadFail {
			status: StatusCode::FORBIDDEN,
			message: "denied".into(),
		};
		assert_eq!(error.status_code(), StatusCode::FORBIDDEN);
	}

	#[test]
	fn test_error_response_conversion() {
		let response: Response = StaticServeError::NotFound.into();
		assert_eq!(response.status, StatusCode::NOT_FOUND);
		assert_eq!(
			response.headers.get("content-type").unwrap().to_str().unwrap(),
			"application/json"
		);
	}
}
