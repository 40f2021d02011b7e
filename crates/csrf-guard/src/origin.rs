//! The decision predicate: does this request prove same-origin intent?
//!
//! Anything not defined as safe by RFC 9110 is assumed to change state and
//! gets checked. Over https the `Origin` header (with `Referer` as the
//! fallback) must name the same (scheme, host, port) triple as the request's
//! own host URL; over plain http the comparison is skipped and only the
//! token verification runs.

use http::{header, Method, Request};
use url::Url;

use crate::error::CsrfRejection;
use crate::verify::SessionTokenVerifier;

const SAFE_METHODS: [Method; 4] = [Method::GET, Method::HEAD, Method::OPTIONS, Method::TRACE];

/// Runs the full CSRF decision for one request.
///
/// Safe methods pass unconditionally. For unsafe methods the origin check
/// runs first (https only), then the token verification, which runs whether
/// the origin comparison passed or was skipped. The first failure wins and
/// the caller turns it into a 403; the handler body never runs after one.
pub fn check<B, V>(request: &Request<B>, verifier: &V) -> Result<(), CsrfRejection>
where
    V: SessionTokenVerifier + ?Sized,
{
    if SAFE_METHODS.contains(request.method()) {
        return Ok(());
    }

    if request.uri().scheme_str() == Some("https") {
        check_origin(request)?;
    }

    if !verifier.verify(request.headers()) {
        return Err(CsrfRejection::BadToken);
    }

    Ok(())
}

fn check_origin<B>(request: &Request<B>) -> Result<(), CsrfRejection> {
    let headers = request.headers();

    let origin = headers
        .get(header::ORIGIN)
        .or_else(|| headers.get(header::REFERER))
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty());

    let Some(origin) = origin else {
        return Err(CsrfRejection::NoOrigin);
    };

    let host = host_url(request);
    let parsed_origin = Url::parse(origin).ok();

    // Unparseable values on either side compare as not-equal, never as a
    // crash.
    let same_origin = match (&parsed_origin, &host) {
        (Some(origin), Some(host)) => origin_triple(origin) == origin_triple(host),
        _ => false,
    };

    if same_origin {
        return Ok(());
    }

    Err(CsrfRejection::BadOrigin {
        origin: reported_origin(origin, parsed_origin.as_ref()),
        host_url: host
            .as_ref()
            .map(Url::to_string)
            .unwrap_or_else(|| request.uri().to_string()),
    })
}

/// The request's own absolute base URL, from the URI's scheme and authority.
///
/// Those are populated from the `:scheme`/`:authority` pseudo-headers over
/// HTTP/2 and from absolute-form request targets over HTTP/1. An origin-form
/// target has neither, which also means no `https` scheme to trigger origin
/// checking in the first place.
fn host_url<B>(request: &Request<B>) -> Option<Url> {
    let uri = request.uri();
    let scheme = uri.scheme_str()?;
    let authority = uri.authority()?;

    Url::parse(&format!("{scheme}://{authority}/")).ok()
}

/// Implied ports (443 for https) normalize to the same value as explicit
/// ones, so `https://app.example` and `https://app.example:443` compare
/// equal.
fn origin_triple(url: &Url) -> (&str, Option<&str>, Option<u16>) {
    (url.scheme(), url.host_str(), url.port_or_known_default())
}

/// Scheme and host only, so a path, query string or token in a `Referer`
/// never ends up in a response body or a log line. A literal `null` origin
/// is reported verbatim, as is anything that did not parse.
fn reported_origin(raw: &str, parsed: Option<&Url>) -> String {
    match parsed {
        Some(url) => url.origin().ascii_serialization(),
        None => raw.to_string(),
    }
}
