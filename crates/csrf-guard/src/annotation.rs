use std::task::{Context, Poll};

use http::Request;
use tower::Layer;

/// Per-request record of whether CSRF enforcement applies to the matched
/// handler.
///
/// Stamped into the request extensions once, at registration time, by a
/// [`CsrfAnnotationLayer`]. A request that never passes through an
/// annotation layer has no extension, which [`CsrfLayer`](crate::CsrfLayer)
/// treats as the default: protection on, unscoped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfProtection {
    pub active: bool,
    /// Named policy group. Informational for now; reserved for per-scope
    /// rules.
    pub scope: Option<String>,
}

impl Default for CsrfProtection {
    fn default() -> Self {
        Self {
            active: true,
            scope: None,
        }
    }
}

/// Stamps a [`CsrfProtection`] annotation on every request routed to the
/// wrapped handler, before the handler body runs.
///
/// These layers only record intent; enforcement happens exclusively in
/// [`CsrfLayer`](crate::CsrfLayer).
#[derive(Debug, Clone)]
pub struct CsrfAnnotationLayer {
    annotation: CsrfProtection,
}

impl CsrfAnnotationLayer {
    /// Opts the wrapped handler out of CSRF enforcement.
    pub fn exempt() -> Self {
        Self {
            annotation: CsrfProtection {
                active: false,
                scope: None,
            },
        }
    }

    /// Explicitly opts the wrapped handler into CSRF enforcement.
    ///
    /// Protection is already the default for unannotated handlers; this
    /// exists to make the intent visible at the registration site.
    pub fn protect() -> Self {
        Self {
            annotation: CsrfProtection::default(),
        }
    }

    /// Opts the wrapped handler into CSRF enforcement under a named scope.
    pub fn protect_in_scope(scope: impl Into<String>) -> Self {
        Self {
            annotation: CsrfProtection {
                active: true,
                scope: Some(scope.into()),
            },
        }
    }
}

impl<S> Layer<S> for CsrfAnnotationLayer {
    type Service = CsrfAnnotationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CsrfAnnotationService {
            inner,
            annotation: self.annotation.clone(),
        }
    }
}

/// See [`CsrfAnnotationLayer`].
#[derive(Debug, Clone)]
pub struct CsrfAnnotationService<S> {
    inner: S,
    annotation: CsrfProtection,
}

impl<S, B> tower::Service<Request<B>> for CsrfAnnotationService<S>
where
    S: tower::Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        // The whole pair goes in at once; the annotation is never partially
        // set.
        req.extensions_mut().insert(self.annotation.clone());
        self.inner.call(req)
    }
}
