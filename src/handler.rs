//! Handler and middleware abstractions.
//!
//! The middleware chain is response-returning: each middleware receives the
//! request and an `Arc<dyn Handler>` continuation, and either delegates to
//! the continuation or produces a response itself.

use crate::error::Result;
use crate::request::Request;
use crate::response::Response;
use async_trait::async_trait;
use std::sync::Arc;

/// Terminal request handler at the end of a middleware chain.
#[async_trait]
pub trait Handler: Send + Sync {
	/// Handle the request and produce a response.
	async fn handle(&self, request: Request) -> Result<Response>;
}

/// Blanket implementation so `Arc<dyn Handler>` is itself a Handler.
#[async_trait]
impl<T: Handler + ?Sized> Handler for Arc<T> {
	async fn handle(&self, request: Request) -> Result<Response> {
		(**self).handle(request).await
	}
}

/// Request/response processing step composed around a handler.
#[async_trait]
pub trait Middleware: Send + Sync {
	/// Process the request, calling `next` to continue down the chain.
	async fn process(&self, request: Request, next: Arc<dyn Handler>) -> Result<Response>;
}

/// Composes middleware around a terminal handler.
///
/// # Examples
///
/// ```no_run
/// use static_serve::{Handler, MiddlewareChain, Request, Response};
/// use std::sync::Arc;
///
/// # struct MyHandler;
/// # #[async_trait::async_trait]
/// # impl Handler for MyHandler {
/// # 	async fn handle(&self, _request: Request) -> static_serve::Result<Response> {
/// # 		Ok(Response::ok())
/// # 	}
/// # }
/// let chain = MiddlewareChain::new(Arc::new(MyHandler));
/// ```
pub struct MiddlewareChain {
	middlewares: Vec<Arc<dyn Middleware>>,
	handler: Arc<dyn Handler>,
}

impl MiddlewareChain {
	/// Create a chain around the given terminal handler.
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self {
			middlewares: Vec::new(),
			handler,
		}
	}

	/// Append a middleware, builder style. Middleware run in the order
	/// they were added, outermost first.
	pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
		self.middlewares.push(middleware);
		self
	}

	/// Append a middleware.
	pub fn add_middleware(&mut self, middleware: Arc<dyn Middleware>) {
		self.middlewares.push(middleware);
	}
}

#[async_trait]
impl Handler for MiddlewareChain {
	async fn handle(&self, request: Request) -> Result<Response> {
		let mut current: Arc<dyn Handler> = self.handler.clone();
		for middleware in self.middlewares.iter().rev() {
			current = Arc::new(ComposedHandler {
				middleware: middleware.clone(),
				next: current,
			});
		}
		current.handle(request).await
	}
}

/// One middleware bound to the handler that follows it.
struct ComposedHandler {
	middleware: Arc<dyn Middleware>,
	next: Arc<dyn Handler>,
}

#[async_trait]
impl Handler for ComposedHandler {
	async fn handle(&self, request: Request) -> Result<Response> {
		self.middleware.process(request, self.next.clone()).await
	}
}
