//! Visitor session identity carried in the `af_sess` cookie.
//!
//! The session id is not an authenticated identity. It only correlates a
//! click with a later conversion reported for the same browser.

use cookie::{Cookie, SameSite, time::Duration};
use uuid::Uuid;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "af_sess";

/// Lifetime of a freshly minted session cookie.
pub const SESSION_MAX_AGE_DAYS: i64 = 90;

/// A resolved visitor session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    id: String,
    minted: bool,
}

impl SessionIdentity {
    /// Reuses a non-empty cookie value as-is, otherwise mints a new UUID v4.
    ///
    /// The existing value is not validated beyond being non-empty, so hand
    /// crafted ids (e.g. from curl) are accepted.
    pub fn resolve(cookie_value: Option<&str>) -> Self {
        match cookie_value {
            Some(value) if !value.is_empty() => Self {
                id: value.to_string(),
                minted: false,
            },
            _ => Self {
                id: Uuid::new_v4().to_string(),
                minted: true,
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// True when the id was generated for this request and must be sent back
    /// in a `Set-Cookie` header.
    pub fn is_new(&self) -> bool {
        self.minted
    }

    /// Builds the session cookie: `HttpOnly`, `SameSite=Lax`, `Path=/`, 90-day max age.
    pub fn cookie(&self, secure: bool) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE_NAME, self.id.clone()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::days(SESSION_MAX_AGE_DAYS))
            .secure(secure)
            .build()
    }
}
