//! Best-effort client IP extraction from proxy headers.

use std::net::IpAddr;

use axum::http::HeaderMap;

/// Client IP as reported by the reverse proxy. `X-Forwarded-For` wins
/// (first entry that parses as an address), then `X-Real-IP`. Absent or
/// unparsable headers yield `None`; the value is recorded in the metadata
/// sidecar only and never used for access decisions.
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        for entry in forwarded.split(',') {
            let candidate = entry.trim();
            if candidate.parse::<IpAddr>().is_ok() {
                return Some(candidate.to_string());
            }
        }
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| v.parse::<IpAddr>().is_ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn forwarded_for_takes_first_valid_entry() {
        let map = headers(&[("x-forwarded-for", "203.0.113.7, 10.0.0.1")]);
        assert_eq!(client_ip(&map).as_deref(), Some("203.0.113.7"));

        let map = headers(&[("x-forwarded-for", "unknown, 203.0.113.7")]);
        assert_eq!(client_ip(&map).as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn real_ip_is_the_fallback() {
        let map = headers(&[("x-real-ip", "2001:db8::1")]);
        assert_eq!(client_ip(&map).as_deref(), Some("2001:db8::1"));
    }

    #[test]
    fn garbage_and_absence_yield_none() {
        assert_eq!(client_ip(&headers(&[])), None);
        let map = headers(&[("x-forwarded-for", "not-an-ip"), ("x-real-ip", "also bad")]);
        assert_eq!(client_ip(&map), None);
    }
}
