//! # static-serve
//!
//! Static file serving middleware with pluggable file sources.
//!
//! The middleware resolves a request path against a configured root,
//! validates it (dot-file policy, traversal guard, query-string policy),
//! applies cache-control and validation headers (strong or weak ETags,
//! Last-Modified), and answers with the file's bytes, buffered or streamed.
//! The backing storage is abstracted behind [`FileSource`], so the same
//! pipeline serves from disk ([`LocalFiles`]) or from an in-memory asset
//! bundle ([`InMemoryFiles`]).
//!
//! ## Quick start
//!
//! ```no_run
//! use static_serve::{
//! 	Handler, MiddlewareChain, Request, Response, StaticServeConfig, StaticServeMiddleware,
//! };
//! use std::sync::Arc;
//!
//! # struct NotFoundHandler;
//! # #[async_trait::async_trait]
//! # impl Handler for NotFoundHandler {
//! # 	async fn handle(&self, _request: Request) -> static_serve::Result<Response> {
//! # 		Err(static_serve::StaticServeError::NotFound)
//! # 	}
//! # }
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//! 	let config = StaticServeConfig::new("/var/www")
//! 		.with_max_age(365 * 24 * 3600)
//! 		.with_s_max_age(60 * 60)
//! 		.with_deny_query_string(true)
//! 		.with_strong_etag(true);
//!
//! 	let serve = Arc::new(StaticServeMiddleware::local(config));
//! 	let chain = MiddlewareChain::new(Arc::new(NotFoundHandler)).with_middleware(serve);
//! 	// mount `chain` under a route with one wildcard path capture
//! 	# let _ = chain;
//! }
//! ```
//!
//! ## Module structure
//!
//! - [`serve`] - the middleware and its configuration
//! - [`source`] - the `FileSource` capability
//! - [`sources`] - bundled local-filesystem and in-memory sources
//! - [`handler`] - handler/middleware chain abstractions
//! - [`request`] / [`response`] - the HTTP types flowing through the chain
//! - [`error`] - error taxonomy with HTTP status mapping

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod handler;
pub mod request;
pub mod response;
pub mod serve;
pub mod source;
pub mod sources;

pub use error::{Result, StaticServeError};
pub use handler::{Handler, Middleware, MiddlewareChain};
pub use request::{PathParam, Request};
pub use response::{Body, Response};
pub use serve::{Skipper, StaticServeConfig, StaticServeMiddleware};
pub use source::{FileSource, FileStat, FileStream, SourceError};
pub use sources::{InMemoryFiles, LocalFiles};
