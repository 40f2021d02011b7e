//! Same-origin CSRF protection for state-changing HTTP requests.
//!
//! Every request using an unsafe method (anything outside GET, HEAD, OPTIONS
//! and TRACE) must prove it originated from the same site, meaning its
//! `Origin` (or `Referer`) header matches the request's own host URL, and
//! must carry a valid session-bound token, unless the matched handler was
//! explicitly exempted. Token issuance and storage are the host
//! application's business; this crate only asks a [`SessionTokenVerifier`]
//! for the verdict.
//!
//! Origin comparison only happens over https. Plain-http deployments get
//! token verification alone, which is a narrower protection surface. Run
//! behind TLS if you can.
//!
//! Handlers are registered through a [`CsrfGuard`], which wraps each one at
//! registration time: enforcement directly on the handler, the annotation
//! stamp outside it.
//!
//! ```
//! use axum::{routing::{get, post}, Router};
//! use csrf_guard::CsrfGuard;
//!
//! let guard = CsrfGuard::new(|headers: &http::HeaderMap| {
//!     headers.contains_key("x-csrf-token")
//! });
//!
//! let router: Router = Router::new()
//!     .route("/", guard.wrap(get(|| async { "form" })))
//!     .route("/logout", guard.protect_in_scope("account", post(|| async { "bye" })))
//!     .route("/webhook", guard.exempt(post(|| async { "ok" })));
//! ```

mod annotation;
mod config;
mod error;
mod headers;
mod layer;
pub mod origin;
mod verify;

pub use annotation::{CsrfAnnotationLayer, CsrfAnnotationService, CsrfProtection};
pub use config::CsrfConfig;
pub use error::CsrfRejection;
pub use headers::add_vary;
pub use layer::{CsrfGuard, CsrfLayer, CsrfService};
pub use verify::SessionTokenVerifier;
