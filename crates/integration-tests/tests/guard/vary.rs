use http::{Method, StatusCode};
use integration_tests::runtime;

use crate::protected_app;

#[test]
fn successful_responses_vary_by_cookie() {
    runtime().block_on(async {
        let app = protected_app();

        let response = app
            .request(
                Method::POST,
                "https://app.example/submit",
                &[("origin", "https://app.example")],
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.vary_members(), ["Cookie"]);
    })
}

#[test]
fn rejections_vary_by_cookie_too() {
    runtime().block_on(async {
        let app = protected_app();

        let response = app.post("https://app.example/submit").await;

        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.vary_members(), ["Cookie"]);
    })
}

#[test]
fn safe_method_responses_from_protected_handlers_vary_as_well() {
    runtime().block_on(async {
        // The form page embeds a token, so it must not be cached across
        // credential states either.
        let app = protected_app();

        let response = app.get("https://app.example/").await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.vary_members(), ["Cookie"]);
    })
}

#[test]
fn handler_declared_variance_is_not_duplicated() {
    runtime().block_on(async {
        let app = protected_app();

        let response = app
            .request(
                Method::POST,
                "https://app.example/prefs",
                &[("origin", "https://app.example")],
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.vary_members(), ["Cookie"]);
    })
}
