//! Static file serving middleware.
//!
//! [`StaticServeMiddleware`] resolves a request path against a configured
//! root, validates it (dot segments, traversal, query strings), and answers
//! with the file's bytes plus cache-control and validation headers. The
//! backing storage is a pluggable [`FileSource`]; the same pipeline serves
//! from disk or from an in-memory asset bundle.

use crate::error::{Result, StaticServeError};
use crate::handler::{Handler, Middleware};
use crate::request::Request;
use crate::response::Response;
use crate::source::FileSource;
use crate::sources::LocalFiles;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Per-request predicate deciding whether the middleware is bypassed
/// entirely for this request.
pub type Skipper = Arc<dyn Fn(&Request) -> bool + Send + Sync>;

/// Configuration for [`StaticServeMiddleware`].
///
/// Read-only for the middleware's lifetime and shared across all requests.
///
/// # Examples
///
/// ```
/// use static_serve::StaticServeConfig;
///
/// let config = StaticServeConfig::new("/var/www")
/// 	.with_max_age(365 * 24 * 3600)
/// 	.with_s_max_age(60 * 60)
/// 	.with_deny_query_string(true)
/// 	.with_strong_etag(true);
/// assert_eq!(config.max_age, 365 * 24 * 3600);
/// ```
#[non_exhaustive]
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct StaticServeConfig {
	/// Directory the served files live under.
	pub root: PathBuf,
	/// Client cache lifetime in seconds (cache-control `max-age`).
	pub max_age: u32,
	/// Shared/proxy cache lifetime in seconds (cache-control `s-maxage`).
	pub s_max_age: u32,
	/// Extra headers applied to every successful response, overwriting
	/// previously set headers of the same name.
	pub headers: HashMap<String, String>,
	/// Reject requests carrying a query string. Useful behind a shared
	/// cache keyed loosely on path, where query variants fragment it.
	pub deny_query_string: bool,
	/// Reject paths with a dot-leading segment (`.git`, `.env`, ...).
	pub deny_dot: bool,
	/// Compute content-hash ETags instead of metadata ETags. Requires
	/// reading the whole file per request; the read is reused as the body.
	pub enable_strong_etag: bool,
	/// Never emit an ETag header.
	pub disable_etag: bool,
	/// Never emit a Last-Modified header.
	pub disable_last_modified: bool,
	/// Delegate to the next handler instead of failing with 404.
	pub not_found_next: bool,
	/// Per-request bypass predicate.
	#[serde(skip)]
	pub skipper: Option<Skipper>,
}

impl StaticServeConfig {
	/// Create a configuration rooted at `root`, with everything else off.
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
			..Default::default()
		}
	}

	/// Set the client cache lifetime in seconds.
	pub fn with_max_age(mut self, seconds: u32) -> Self {
		self.max_age = seconds;
		self
	}

	/// Set the shared/proxy cache lifetime in seconds.
	pub fn with_s_max_age(mut self, seconds: u32) -> Self {
		self.s_max_age = seconds;
		self
	}

	/// Add a header applied to every successful response.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());
		self
	}

	/// Reject requests carrying a query string.
	pub fn with_deny_query_string(mut self, deny: bool) -> Self {
		self.deny_query_string = deny;
		self
	}

	/// Reject paths with a dot-leading segment.
	pub fn with_deny_dot(mut self, deny: bool) -> Self {
		self.deny_dot = deny;
		self
	}

	/// Use content-hash ETags instead of metadata ETags.
	pub fn with_strong_etag(mut self, enable: bool) -> Self {
		self.enable_strong_etag = enable;
		self
	}

	/// Never emit an ETag header.
	pub fn with_disable_etag(mut self, disable: bool) -> Self {
		self.disable_etag = disable;
		self
	}

	/// Never emit a Last-Modified header.
	pub fn with_disable_last_modified(mut self, disable: bool) -> Self {
		self.disable_last_modified = disable;
		self
	}

	/// Delegate to the next handler on missing files instead of a 404.
	pub fn with_not_found_next(mut self, next: bool) -> Self {
		self.not_found_next = next;
		self
	}

	/// Set the per-request bypass predicate.
	pub fn with_skipper(
		mut self,
		skipper: impl Fn(&Request) -> bool + Send + Sync + 'static,
	) -> Self {
		self.skipper = Some(Arc::new(skipper));
		self
	}
}

/// Middleware serving files from a [`FileSource`] under a configured root.
///
/// Holds no mutable state; a single instance is safe for concurrent use by
/// any number of in-flight requests.
pub struct StaticServeMiddleware {
	source: Arc<dyn FileSource>,
	config: StaticServeConfig,
	cache_control: Option<String>,
}

impl StaticServeMiddleware {
	/// Create a middleware over an arbitrary file source.
	pub fn new(source: Arc<dyn FileSource>, config: StaticServeConfig) -> Self {
		let cache_control = build_cache_control(&config);
		Self {
			source,
			config,
			cache_control,
		}
	}

	/// Create a middleware serving from the local filesystem.
	pub fn local(config: StaticServeConfig) -> Self {
		Self::new(Arc::new(LocalFiles::new()), config)
	}

	/// The precomputed cache-control header value, if any.
	///
	/// The value is `public` joined with the configured `max-age` and
	/// `s-maxage` directives; with neither configured, no header is ever
	/// sent (a bare `public` is never emitted).
	pub fn cache_control(&self) -> Option<&str> {
		self.cache_control.as_deref()
	}
}

#[async_trait]
impl Middleware for StaticServeMiddleware {
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response> {
		if let Some(skipper) = &self.config.skipper
			&& skipper(&request)
		{
			return next.handle(request).await;
		}

		// The file path comes from the route's wildcard capture, falling
		// back to the raw URL path when the router provided none.
		let mut file = request
			.path_params
			.first()
			.map(|param| param.value.clone())
			.unwrap_or_default();
		if file.is_empty() {
			file = request.path().to_string();
		}

		if self.config.deny_dot
			&& file
				.split('/')
				.any(|segment| !segment.is_empty() && segment.starts_with('.'))
		{
			return Err(StaticServeError::NotAllowAccessDot);
		}

		let resolved = clean_join(&self.config.root, &file);
		// Component-wise prefix check on the cleaned path: rejects `..`
		// escapes as well as sibling roots (/var/www2 under /var/www).
		if !resolved.starts_with(&self.config.root) {
			return Err(StaticServeError::OutOfPath);
		}

		if self.config.deny_query_string && request.query().is_some_and(|q| !q.is_empty()) {
			return Err(StaticServeError::NotAllowQueryString);
		}

		if !self.source.exists(&resolved).await {
			if self.config.not_found_next {
				log::debug!("{} not found, delegating to next handler", resolved.display());
				return next.handle(request).await;
			}
			return Err(StaticServeError::NotFound);
		}

		log::debug!("serving {}", resolved.display());
		let mime = mime_guess::from_path(&resolved).first_or_octet_stream();
		let mut response = Response::ok().with_header("content-type", mime.as_ref());

		// Strong ETags hash the content, so the file is read up front and
		// the bytes reused for the body below.
		let mut file_buf = None;
		if !self.config.disable_etag && self.config.enable_strong_etag {
			let buf = self.source.read(&resolved).await.map_err(|error| {
				let status = error
					.status_code()
					.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
				StaticServeError::ReadFail {
					status,
					message: error.to_string(),
				}
			})?;
			file_buf = Some(buf);
		}

		if !self.config.disable_etag {
			if self.config.enable_strong_etag {
				let etag = generate_etag(file_buf.as_deref().unwrap_or_default());
				response = response.with_header("etag", &etag);
			} else if let Some(stat) = self.source.stat(&resolved).await {
				let etag = format!("W/\"{:x}-{:x}\"", stat.size, stat.modified.timestamp());
				response = response.with_header("etag", &etag);
			}
		}

		if !self.config.disable_last_modified
			&& let Some(stat) = self.source.stat(&resolved).await
		{
			let last_modified = httpdate::fmt_http_date(stat.modified.into());
			response = response.with_header("last-modified", &last_modified);
		}

		for (name, value) in &self.config.headers {
			response = response.with_header(name, value);
		}

		if let Some(cache_control) = &self.cache_control {
			response = response.with_header("cache-control", cache_control);
		}

		if let Some(buf) = file_buf {
			Ok(response.with_body(buf))
		} else {
			let stream = self
				.source
				.open_stream(&resolved)
				.await
				.map_err(|error| StaticServeError::OpenStreamFail(error.to_string()))?;
			Ok(response.with_stream(stream))
		}
	}
}

/// Precompute the cache-control value for a configuration.
fn build_cache_control(config: &StaticServeConfig) -> Option<String> {
	let mut directives = vec!["public".to_string()];
	if config.max_age > 0 {
		directives.push(format!("max-age={}", config.max_age));
	}
	if config.s_max_age > 0 {
		directives.push(format!("s-maxage={}", config.s_max_age));
	}
	// A bare `public` with no numeric directive is never emitted.
	if directives.len() > 1 {
		Some(directives.join(", "))
	} else {
		None
	}
}

/// Join `file` onto `root`, resolving `.` and `..` segments lexically the
/// way Go's `filepath.Join` does: parent segments pop, the root separator
/// in `file` is ignored, and the result never dips below the filesystem
/// root.
fn clean_join(root: &Path, file: &str) -> PathBuf {
	let mut joined = root.to_path_buf();
	for component in Path::new(file).components() {
		match component {
			Component::Normal(part) => joined.push(part),
			Component::ParentDir => {
				joined.pop();
			}
			Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
		}
	}
	joined
}

/// Content-hash ETag: `"<hex size>-<url-safe base64 sha1>"`.
fn generate_etag(buf: &[u8]) -> String {
	if buf.is_empty() {
		return r#""0-2jmj7l5rSw0yVb_vlWAYkK_YBwk=""#.to_string();
	}
	let hash = URL_SAFE.encode(Sha1::digest(buf));
	format!("\"{:x}-{}\"", buf.len(), hash)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generate_etag_empty_content() {
		assert_eq!(generate_etag(b""), r#""0-2jmj7l5rSw0yVb_vlWAYkK_YBwk=""#);
	}

	#[test]
	fn test_generate_etag_idempotent() {
		let first = generate_etag(b"hello world");
		let second = generate_etag(b"hello world");
		assert_eq!(first, second);
		// 11 bytes -> hex size `b`
		assert!(first.starts_with("\"b-"));
		assert!(first.ends_with('"'));
	}

	#[test]
	fn test_generate_etag_differs_by_content() {
		assert_ne!(generate_etag(b"a"), generate_etag(b"b"));
	}

	#[test]
	fn test_cache_control_with_both_ages() {
		let config = StaticServeConfig::new("/var/www")
			.with_max_age(31536000)
			.with_s_max_age(3600);
		assert_eq!(
			build_cache_control(&config).as_deref(),
			Some("public, max-age=31536000, s-maxage=3600")
		);
	}

	#[test]
	fn test_cache_control_max_age_only() {
		let config = StaticServeConfig::new("/var/www").with_max_age(60);
		assert_eq!(build_cache_control(&config).as_deref(), Some("public, max-age=60"));
	}

	#[test]
	fn test_cache_control_absent_without_ages() {
		let config = StaticServeConfig::new("/var/www");
		assert!(build_cache_control(&config).is_none());
	}

	#[test]
	fn test_clean_join_plain() {
		assert_eq!(
			clean_join(Path::new("/var/www"), "/index.html"),
			PathBuf::from("/var/www/index.html")
		);
		assert_eq!(
			clean_join(Path::new("/var/www"), "css/./app.css"),
			PathBuf::from("/var/www/css/app.css")
		);
	}

	#[test]
	fn test_clean_join_resolves_parent_segments() {
		assert_eq!(
			clean_join(Path::new("/var/www"), "a/../b.txt"),
			PathBuf::from("/var/www/b.txt")
		);
		assert_eq!(
			clean_join(Path::new("/var/www"), "../secret"),
			PathBuf::from("/var/secret")
		);
		// Never escapes below the filesystem root.
		assert_eq!(
			clean_join(Path::new("/"), "../../etc/passwd"),
			PathBuf::from("/etc/passwd")
		);
	}

	#[test]
	fn test_traversal_guard_is_component_wise() {
		let root = Path::new("/var/www");
		assert!(clean_join(root, "/index.html").starts_with(root));
		assert!(!clean_join(root, "../../etc/passwd").starts_with(root));
		// A sibling directory sharing the root's string prefix is out.
		assert!(!clean_join(root, "../www2/x").starts_with(root));
	}
}
