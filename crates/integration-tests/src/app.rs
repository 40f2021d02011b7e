use axum::{
    body::Body,
    routing::{any, get, post, MethodRouter},
    Router,
};
use csrf_guard::{CsrfConfig, CsrfGuard};
use http::{header, HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TestConfig {
    csrf: CsrfConfig,
}

/// How the `/submit` route gets annotated at registration time.
#[derive(Debug, Clone, Copy, Default)]
enum SubmitAnnotation {
    #[default]
    None,
    Exempt,
    Scoped(&'static str),
}

pub struct AppBuilder {
    config: TestConfig,
    token_valid: bool,
    submit: SubmitAnnotation,
}

impl AppBuilder {
    pub fn with_toml_config(mut self, config: &str) -> Self {
        self.config = toml::from_str(config).expect("valid test configuration");
        self
    }

    /// Makes the stub session verifier fail every token comparison.
    pub fn reject_tokens(mut self) -> Self {
        self.token_valid = false;
        self
    }

    pub fn exempt_submit(mut self) -> Self {
        self.submit = SubmitAnnotation::Exempt;
        self
    }

    pub fn scoped_submit(mut self, scope: &'static str) -> Self {
        self.submit = SubmitAnnotation::Scoped(scope);
        self
    }

    pub fn build(self) -> TestApp {
        let home: MethodRouter = get(|| async { "welcome" });
        let ping: MethodRouter = any(|| async { "pong" });
        let submit: MethodRouter = post(|| async { "submitted" });
        // A handler that already declares its own cache variance.
        let prefs: MethodRouter = post(|| async { ([(header::VARY, "Cookie")], "saved") });

        let verdict = self.token_valid;

        let router = if self.config.csrf.enabled {
            let guard = CsrfGuard::new(move |_: &HeaderMap| verdict);

            let submit = match self.submit {
                SubmitAnnotation::None => guard.wrap(submit),
                SubmitAnnotation::Exempt => guard.exempt(submit),
                SubmitAnnotation::Scoped(scope) => guard.protect_in_scope(scope, submit),
            };

            Router::new()
                .route("/", guard.wrap(home))
                .route("/ping", guard.wrap(ping))
                .route("/submit", submit)
                .route("/prefs", guard.wrap(prefs))
        } else {
            Router::new()
                .route("/", home)
                .route("/ping", ping)
                .route("/submit", submit)
                .route("/prefs", prefs)
        };

        TestApp { router }
    }
}

pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn builder() -> AppBuilder {
        AppBuilder {
            config: TestConfig::default(),
            token_valid: true,
            submit: SubmitAnnotation::None,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, &[]).await
    }

    pub async fn post(&self, uri: &str) -> TestResponse {
        self.request(Method::POST, uri, &[]).await
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(Body::empty()).expect("valid test request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let (parts, body) = response.into_parts();
        let body = body.collect().await.expect("collectable body").to_bytes();

        TestResponse {
            status: parts.status,
            headers: parts.headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Every member of every `Vary` value, trimmed, in response order.
    pub fn vary_members(&self) -> Vec<&str> {
        self.headers
            .get_all(header::VARY)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .collect()
    }
}
