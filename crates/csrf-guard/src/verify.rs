use http::HeaderMap;

/// Compares the token submitted with a request against the session-bound
/// secret.
///
/// Issuing, rotating and storing tokens is the host application's concern;
/// the guard only asks whether this request carries a valid one. The
/// verifier gets the request headers, which is where the credential cookie
/// and header-carried tokens live. Hosts that accept tokens from form bodies
/// should resolve them into a header or extension before this layer runs.
pub trait SessionTokenVerifier: Send + Sync + 'static {
    fn verify(&self, headers: &HeaderMap) -> bool;
}

impl<F> SessionTokenVerifier for F
where
    F: Fn(&HeaderMap) -> bool + Send + Sync + 'static,
{
    fn verify(&self, headers: &HeaderMap) -> bool {
        self(headers)
    }
}
