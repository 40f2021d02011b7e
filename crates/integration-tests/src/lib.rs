#![allow(unused_crate_dependencies, clippy::panic)]

//! End-to-end harness for the CSRF guard: a small server-rendered app wired
//! the way a host application would wire it, driven through the router
//! without binding a listener.

mod app;

use std::sync::OnceLock;

use tokio::runtime::Runtime;

pub use app::{AppBuilder, TestApp, TestResponse};

pub fn runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| Runtime::new().unwrap())
}
