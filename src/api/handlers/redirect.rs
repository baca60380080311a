//! Handlers for the tracking redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::extractors::Visitor;
use crate::application::services::{LinkTarget, Redirection, Visit};
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its offer's destination.
///
/// # Endpoint
///
/// `GET /r/{code}`
///
/// # Request Flow
///
/// 1. Resolve the code to a link whose offer is active
/// 2. Reuse the `af_sess` cookie or mint a new session id
/// 3. Record one click (UTM fields from the query string)
/// 4. Return `302 Found`, with `Set-Cookie` only for a new session
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown, its offer is inactive or
/// the lookup fails. Returns 500 Internal Server Error if the destination is
/// not a valid header value or the click cannot be stored; no redirect is
/// issued in either case.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Visitor(visit): Visitor,
) -> Result<Response, AppError> {
    follow(&state, LinkTarget::ShortCode(&code), visit).await
}

/// Redirects an affiliate/offer vanity pair.
///
/// # Endpoint
///
/// `GET /go/{affiliate}/{slug}`
///
/// Same pipeline and responses as [`redirect_handler`].
pub async fn vanity_redirect_handler(
    Path((affiliate, slug)): Path<(String, String)>,
    State(state): State<AppState>,
    Visitor(visit): Visitor,
) -> Result<Response, AppError> {
    let target = LinkTarget::Vanity {
        affiliate_code: &affiliate,
        offer_slug: &slug,
    };

    follow(&state, target, visit).await
}

async fn follow(
    state: &AppState,
    target: LinkTarget<'_>,
    visit: Visit,
) -> Result<Response, AppError> {
    let redirection = state.redirect_service.redirect(target, visit).await?;
    redirect_response(redirection, state.session_cookie_secure)
}

/// Builds the `302 Found` response.
///
/// `axum::response::Redirect` only offers 303/307/308, so the status and
/// `Location` header are set directly.
fn redirect_response(redirection: Redirection, secure_cookie: bool) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(&redirection.destination_url)
        .map_err(|_| AppError::internal("Invalid destination URL", serde_json::json!({})))?;

    let mut response = (StatusCode::FOUND, [(header::LOCATION, location)]).into_response();

    if redirection.session.is_new() {
        let cookie = redirection.session.cookie(secure_cookie).to_string();
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }

    Ok(response)
}
