use http::{header, HeaderMap, HeaderValue};

/// Merges a member into the response `Vary` header set.
///
/// Membership is checked case-insensitively across every existing `Vary`
/// value, so applying this twice leaves a single entry behind and whatever
/// the handler already put there is preserved.
pub fn add_vary(headers: &mut HeaderMap, member: &str) {
    let already_present = headers
        .get_all(header::VARY)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .any(|existing| existing.trim().eq_ignore_ascii_case(member));

    if already_present {
        return;
    }

    if let Ok(value) = HeaderValue::from_str(member) {
        headers.append(header::VARY, value);
    }
}
