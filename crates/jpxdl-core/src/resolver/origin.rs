//! Origin derivation and href absolutization.

/// `scheme://host[:port]` of `page_url`, or `None` for opaque/invalid URLs.
pub fn origin_of(page_url: &str) -> Option<String> {
    let parsed = url::Url::parse(page_url).ok()?;
    let origin = parsed.origin();
    if !origin.is_tuple() {
        return None;
    }
    Some(origin.ascii_serialization())
}

/// Makes `href` absolute against `origin`.
///
/// - `http…` → unchanged
/// - `/path` → `origin + href`
/// - anything else → `origin + "/" + href`
pub fn absolutize(origin: &str, href: &str) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }
    let origin = origin.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{}{}", origin, href)
    } else {
        format!("{}/{}", origin, href)
    }
}
