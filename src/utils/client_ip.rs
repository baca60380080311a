//! Client address and header extraction for click records.

use std::net::SocketAddr;

use axum::http::{HeaderMap, HeaderName, header};

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Determines the client IP for a request.
///
/// When `behind_proxy` is set, the first `X-Forwarded-For` entry wins, then
/// `X-Real-IP`. Otherwise proxy headers are ignored, since any client can
/// forge them, and the socket peer address is used.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// assert_eq!(client_ip(&headers, None, true).as_deref(), Some("203.0.113.7"));
/// assert_eq!(client_ip(&headers, None, false), None);
/// ```
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>, behind_proxy: bool) -> Option<String> {
    if behind_proxy {
        let forwarded = header_str(headers, &HeaderName::from_static(X_FORWARDED_FOR))
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = forwarded {
            return Some(ip.to_string());
        }

        if let Some(ip) = header_str(headers, &HeaderName::from_static(X_REAL_IP)) {
            return Some(ip.to_string());
        }
    }

    peer.map(|addr| addr.ip().to_string())
}

/// `User-Agent` header, if present and non-empty.
///
/// Non-UTF-8 bytes are replaced rather than dropping the whole value.
pub fn user_agent(headers: &HeaderMap) -> Option<String> {
    header_lossy(headers, &header::USER_AGENT)
}

/// `Referer` header, if present and non-empty.
pub fn referer(headers: &HeaderMap) -> Option<String> {
    header_lossy(headers, &header::REFERER)
}

fn header_lossy(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
