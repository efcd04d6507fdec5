//! HTTP response representation produced by the middleware.

use crate::source::FileStream;
use bytes::Bytes;
use hyper::{HeaderMap, StatusCode};

/// Response body in one of two mutually exclusive modes: pre-buffered
/// bytes or a readable stream handed over to the server's write stage.
pub enum Body {
	/// No body assigned yet.
	Empty,
	/// Pre-buffered body.
	Full(Bytes),
	/// Streamed body, read sequentially while writing the response.
	Stream(FileStream),
}

impl Body {
	/// Whether a body has been assigned.
	pub fn is_assigned(&self) -> bool {
		!matches!(self, Body::Empty)
	}

	/// The buffered bytes, when the body is pre-buffered.
	pub fn as_bytes(&self) -> Option<&Bytes> {
		match self {
			Body::Full(bytes) => Some(bytes),
			_ => None,
		}
	}
}

impl std::fmt::Debug for Body {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Body::Empty => f.write_str("Body::Empty"),
			Body::Full(bytes) => write!(f, "Body::Full({} bytes)", bytes.len()),
			Body::Stream(_) => f.write_str("Body::Stream"),
		}
	}
}

/// HTTP response passed back through the middleware chain.
#[derive(Debug)]
pub struct Response {
	/// Response status.
	pub status: StatusCode,
	/// Response headers.
	pub headers: HeaderMap,
	/// Response body.
	pub body: Body,
}

impl Response {
	/// Create a response with the given status and no headers or body.
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Body::Empty,
		}
	}

	/// Create a response with HTTP 200 OK status.
	///
	/// # Examples
	///
	/// ```
	/// use hyper::StatusCode;
	/// use static_serve::Response;
	///
	/// let response = Response::ok();
	/// assert_eq!(response.status, StatusCode::OK);
	/// assert!(!response.body.is_assigned());
	/// ```
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	/// Assign a pre-buffered body.
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = Body::Full(body.into());
		self
	}

	/// Assign a streamed body.
	pub fn with_stream(mut self, stream: FileStream) -> Self {
		self.body = Body::Stream(stream);
		self
	}

	/// Set a header, overwriting any previous value of the same name.
	///
	/// Invalid header names or values are silently ignored.
	///
	/// # Examples
	///
	/// ```
	/// use static_serve::Response;
	///
	/// let response = Response::ok().with_header("x-served-by", "static-serve");
	/// assert_eq!(
	/// 	response.headers.get("x-served-by").unwrap().to_str().unwrap(),
	/// 	"static-serve"
	/// );
	/// ```
	pub fn with_header(mut self, name: &str, value: &str) -> Self {
		if let Ok(header_name) = hyper::header::HeaderName::from_bytes(name.as_bytes())
			&& let Ok(header_value) = hyper::header::HeaderValue::from_str(value)
		{
			self.headers.insert(header_name, header_value);
		}
		self
	}
}
