//! HTTP request representation consumed by the middleware.

use bytes::Bytes;
use hyper::{HeaderMap, Method, Uri, Version};

/// A single route capture extracted by the host router.
///
/// The static serve middleware reads the first capture as the requested
/// file path (the "one wildcard capture" contract).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParam {
	/// Capture name as declared in the route pattern.
	pub name: String,
	/// Captured value.
	pub value: String,
}

/// HTTP request passed through the middleware chain.
#[derive(Debug, Clone)]
pub struct Request {
	/// Request method.
	pub method: Method,
	/// Request URI.
	pub uri: Uri,
	/// HTTP version.
	pub version: Version,
	/// Request headers.
	pub headers: HeaderMap,
	/// Request body.
	pub body: Bytes,
	/// Route captures in the order the router matched them.
	pub path_params: Vec<PathParam>,
}

impl Request {
	/// Create a new request.
	///
	/// # Examples
	///
	/// ```
	/// use bytes::Bytes;
	/// use hyper::{HeaderMap, Method, Uri, Version};
	/// use static_serve::Request;
	///
	/// let request = Request::new(
	/// 	Method::GET,
	/// 	Uri::from_static("/static/app.css"),
	/// 	Version::HTTP_11,
	/// 	HeaderMap::new(),
	/// 	Bytes::new(),
	/// );
	/// assert_eq!(request.path(), "/static/app.css");
	/// ```
	pub fn new(
		method: Method,
		uri: Uri,
		version: Version,
		headers: HeaderMap,
		body: Bytes,
	) -> Self {
		Self {
			method,
			uri,
			version,
			headers,
			body,
			path_params: Vec::new(),
		}
	}

	/// The path component of the request URI.
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// The raw query string, if any.
	///
	/// # Examples
	///
	/// ```
	/// use bytes::Bytes;
	/// use hyper::{HeaderMap, Method, Uri, Version};
	/// use static_serve::Request;
	///
	/// let request = Request::new(
	/// 	Method::GET,
	/// 	Uri::from_static("/app.css?v=3"),
	/// 	Version::HTTP_11,
	/// 	HeaderMap::new(),
	/// 	Bytes::new(),
	/// );
	/// assert_eq!(request.query(), Some("v=3"));
	/// ```
	pub fn query(&self) -> Option<&str> {
		self.uri.query()
	}

	/// Append a route capture (called by routers during matching).
	pub fn set_path_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.path_params.push(PathParam {
			name: name.into(),
			value: value.into(),
		});
	}

	/// Builder-style variant of [`set_path_param`](Self::set_path_param).
	pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.set_path_param(name, value);
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn request(uri: &'static str) -> Request {
		Request::new(
			Method::GET,
			Uri::from_static(uri),
			Version::HTTP_11,
			HeaderMap::new(),
			Bytes::new(),
		)
	}

	#[test]
	fn test_path_and_query() {
		let req = request("/static/a.css?v=1&x=2");
		assert_eq!(req.path(), "/static/a.css");
		assert_eq!(req.query(), Some("v=1&x=2"));

		let req = request("/static/a.css");
		assert_eq!(req.query(), None);
	}

	#[test]
	fn test_path_params_keep_order() {
		let req = request("/static/a/b")
			.with_path_param("file", "a/b")
			.with_path_param("extra", "b");
		assert_eq!(req.path_params[0].value, "a/b");
		assert_eq!(req.path_params[1].name, "extra");
	}
}
