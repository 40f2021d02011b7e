use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::response::IntoResponse;
use axum::routing::MethodRouter;
use http::Request;
use tower::Layer;

use crate::annotation::{CsrfAnnotationLayer, CsrfProtection};
use crate::headers::add_vary;
use crate::origin;
use crate::verify::SessionTokenVerifier;

/// Registration-time wrapper that puts the CSRF decision in front of every
/// handler an application registers.
///
/// Each method wraps an already-built handler (with whatever other layers
/// the application composed onto it) and returns a handler of the same
/// shape, so routes keep reading like plain axum:
///
/// ```
/// use axum::{routing::{get, post}, Router};
/// use csrf_guard::CsrfGuard;
///
/// let guard = CsrfGuard::new(|headers: &http::HeaderMap| {
///     headers.contains_key("x-csrf-token")
/// });
///
/// let router: Router = Router::new()
///     .route("/", guard.wrap(get(|| async { "form" })))
///     .route("/logout", guard.protect_in_scope("account", post(|| async { "bye" })))
///     .route("/webhook", guard.exempt(post(|| async { "ok" })));
/// ```
///
/// The interceptor order is fixed: the annotation stamp runs first, then the
/// enforcement service reads it, then the handler. Enforcement sits directly
/// on the handler so the annotation layers end up outside of it; a
/// router-wide layer would run before any per-route stamp and could never
/// see an exemption.
pub struct CsrfGuard<V> {
    layer: CsrfLayer<V>,
}

impl<V> CsrfGuard<V>
where
    V: SessionTokenVerifier,
{
    pub fn new(verifier: V) -> Self {
        Self {
            layer: CsrfLayer::new(verifier),
        }
    }

    /// Wraps a handler with enforcement alone. With no annotation stamped,
    /// the dispatch layer applies the secure default: protection on,
    /// unscoped.
    pub fn wrap<S>(&self, method_router: MethodRouter<S>) -> MethodRouter<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        method_router.layer(self.layer.clone())
    }

    /// Wraps a handler that opted out of CSRF enforcement.
    pub fn exempt<S>(&self, method_router: MethodRouter<S>) -> MethodRouter<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        self.wrap(method_router).layer(CsrfAnnotationLayer::exempt())
    }

    /// Wraps a handler that explicitly opted into CSRF enforcement.
    pub fn protect<S>(&self, method_router: MethodRouter<S>) -> MethodRouter<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        self.wrap(method_router).layer(CsrfAnnotationLayer::protect())
    }

    /// Wraps a handler protected under a named scope.
    pub fn protect_in_scope<S>(
        &self,
        scope: impl Into<String>,
        method_router: MethodRouter<S>,
    ) -> MethodRouter<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        self.wrap(method_router)
            .layer(CsrfAnnotationLayer::protect_in_scope(scope))
    }
}

impl<V> Clone for CsrfGuard<V> {
    fn clone(&self) -> Self {
        Self {
            layer: self.layer.clone(),
        }
    }
}

/// The enforcement middleware itself: runs the CSRF decision before the
/// wrapped service, unless the request was stamped exempt.
///
/// Prefer [`CsrfGuard`] for wiring. When composing this layer by hand, any
/// [`CsrfAnnotationLayer`] must wrap *outside* it, otherwise the stamp
/// arrives too late to be read.
pub struct CsrfLayer<V> {
    verifier: Arc<V>,
}

impl<V> CsrfLayer<V>
where
    V: SessionTokenVerifier,
{
    pub fn new(verifier: V) -> Self {
        Self {
            verifier: Arc::new(verifier),
        }
    }
}

impl<V> Clone for CsrfLayer<V> {
    fn clone(&self) -> Self {
        Self {
            verifier: self.verifier.clone(),
        }
    }
}

impl<S, V> Layer<S> for CsrfLayer<V>
where
    S: Send + Clone,
{
    type Service = CsrfService<S, V>;

    fn layer(&self, inner: S) -> Self::Service {
        CsrfService {
            inner,
            verifier: self.verifier.clone(),
        }
    }
}

/// See [`CsrfLayer`].
pub struct CsrfService<S, V> {
    inner: S,
    verifier: Arc<V>,
}

impl<S, V> Clone for CsrfService<S, V>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            verifier: self.verifier.clone(),
        }
    }
}

impl<S, V, B> tower::Service<Request<B>> for CsrfService<S, V>
where
    S: tower::Service<Request<B>, Response = axum::response::Response> + Send + Clone + 'static,
    S::Future: Send,
    V: SessionTokenVerifier,
    B: Send + 'static,
{
    type Response = axum::response::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        let mut inner = self.inner.clone();
        let verifier = self.verifier.clone();

        Box::pin(async move {
            let annotation = req
                .extensions()
                .get::<CsrfProtection>()
                .cloned()
                .unwrap_or_default();

            if !annotation.active {
                // Exempted: no check, no header mutation.
                return inner.call(req).await;
            }

            // The verdict depends on cookie-bound session state, so caches
            // must key on the cookie whether or not the check passes.
            match origin::check(&req, verifier.as_ref()) {
                Ok(()) => {
                    let mut response = inner.call(req).await?;
                    add_vary(response.headers_mut(), "Cookie");
                    Ok(response)
                }
                Err(rejection) => {
                    tracing::warn!(
                        method = %req.method(),
                        path = req.uri().path(),
                        scope = annotation.scope.as_deref(),
                        "rejecting request: {rejection}",
                    );

                    let mut response = rejection.into_response();
                    add_vary(response.headers_mut(), "Cookie");
                    Ok(response)
                }
            }
        })
    }
}
