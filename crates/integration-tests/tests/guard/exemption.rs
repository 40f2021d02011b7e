use http::{Method, StatusCode};
use integration_tests::{runtime, TestApp};

use crate::enabled;

#[test]
fn exemption_overrides_protection() {
    runtime().block_on(async {
        // Hostile conditions everywhere: unsafe method, https, no origin
        // headers, failing tokens. The exempt handler still runs.
        let app = enabled().reject_tokens().exempt_submit().build();

        let response = app.post("https://app.example/submit").await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, "submitted");
    })
}

#[test]
fn exempt_responses_are_not_marked_cookie_variant() {
    runtime().block_on(async {
        let app = enabled().exempt_submit().build();

        let response = app.post("https://app.example/submit").await;

        assert!(response.vary_members().is_empty());
    })
}

#[test]
fn scoped_protection_is_still_enforced() {
    runtime().block_on(async {
        let app = enabled().scoped_submit("account").build();

        let response = app.post("https://app.example/submit").await;

        assert_eq!(response.status, StatusCode::FORBIDDEN);
    })
}

#[test]
fn scoped_protection_passes_with_proof() {
    runtime().block_on(async {
        let app = enabled().scoped_submit("account").build();

        let response = app
            .request(
                Method::POST,
                "https://app.example/submit",
                &[("origin", "https://app.example")],
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
    })
}

#[test]
fn disabled_configuration_leaves_handlers_unguarded() {
    runtime().block_on(async {
        let app = TestApp::builder().reject_tokens().build();

        let response = app.post("https://app.example/submit").await;

        assert_eq!(response.status, StatusCode::OK);
        assert!(response.vary_members().is_empty());
    })
}
