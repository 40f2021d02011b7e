use http::{Method, StatusCode};
use integration_tests::runtime;

use crate::enabled;

#[test]
fn safe_methods_pass_without_origin_or_token() {
    runtime().block_on(async {
        // Tokens always fail, and no Origin/Referer anywhere; safe methods
        // must still go through untouched.
        let app = enabled().reject_tokens().build();

        for method in [Method::GET, Method::HEAD, Method::OPTIONS, Method::TRACE] {
            let response = app.request(method.clone(), "https://app.example/ping", &[]).await;

            assert_eq!(response.status, StatusCode::OK, "{method} should bypass the guard");
        }
    })
}

#[test]
fn every_unsafe_method_is_checked() {
    runtime().block_on(async {
        let app = enabled().build();

        for method in [Method::POST, Method::PUT, Method::PATCH, Method::DELETE] {
            let response = app.request(method.clone(), "https://app.example/ping", &[]).await;

            assert_eq!(
                response.status,
                StatusCode::FORBIDDEN,
                "{method} without origin proof should be rejected"
            );
        }
    })
}
