//! Request extractors for the tracking routes.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use cookie::Cookie;

use crate::application::services::Visit;
use crate::domain::entities::{ClientHints, UtmParams};
use crate::domain::session::SESSION_COOKIE_NAME;
use crate::state::AppState;
use crate::utils::client_ip::{client_ip, referer, user_agent};

/// Everything a redirect needs to know about the visitor.
///
/// Never rejects: missing headers, cookies or query parameters simply become
/// absent fields.
#[derive(Debug, Clone)]
pub struct Visitor(pub Visit);

impl FromRequestParts<AppState> for Visitor {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        let hints = ClientHints {
            ip: client_ip(&parts.headers, peer, state.behind_proxy),
            user_agent: user_agent(&parts.headers),
            referer: referer(&parts.headers),
        };

        Ok(Visitor(Visit {
            session_cookie: session_cookie(parts),
            hints,
            utm: UtmParams::from_query(parts.uri.query()),
        }))
    }
}

/// Value of the first `af_sess` cookie across all `Cookie` headers.
fn session_cookie(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value.to_owned()))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(cookie_headers: &[&str]) -> Parts {
        let mut builder = Request::builder().uri("/r/abc123");
        for value in cookie_headers {
            builder = builder.header(COOKIE, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_session_cookie_among_others() {
        let parts = parts(&["theme=dark; af_sess=abc-123; lang=en"]);
        assert_eq!(session_cookie(&parts).as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_session_cookie_in_second_header() {
        let parts = parts(&["theme=dark", "af_sess=xyz"]);
        assert_eq!(session_cookie(&parts).as_deref(), Some("xyz"));
    }

    #[test]
    fn test_session_cookie_missing() {
        assert_eq!(session_cookie(&parts(&[])), None);
        assert_eq!(session_cookie(&parts(&["af_session=nope"])), None);
    }
}
