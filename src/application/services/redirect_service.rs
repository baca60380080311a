//! The redirect pipeline shared by the short-code and vanity entry points.
//!
//! ```text
//! RESOLVE_LINK ─┬─ found ──> RESOLVE_SESSION ──> RECORD_CLICK ──> redirect
//!               └─ missing ─> 404
//! ```
//!
//! There are no retries: a failed lookup or a failed click insert ends the
//! request with an error and no redirect is issued.

use crate::application::services::click_service::ClickService;
use crate::application::services::link_service::{LinkService, LinkTarget};
use crate::domain::entities::{ClientHints, UtmParams};
use crate::domain::session::SessionIdentity;
use crate::error::AppError;
use serde_json::json;
use tracing::{error, info};

/// Everything the pipeline needs to know about the visitor.
#[derive(Debug, Clone, Default)]
pub struct Visit {
    /// Raw value of the session cookie, if the browser sent one.
    pub session_cookie: Option<String>,
    pub hints: ClientHints,
    pub utm: UtmParams,
}

/// A completed pipeline run, ready to be turned into a `302` response.
#[derive(Debug, Clone)]
pub struct Redirection {
    pub destination_url: String,
    pub session: SessionIdentity,
}

/// Orchestrates link resolution, session resolution and click recording.
pub struct RedirectService {
    link_service: LinkService,
    click_service: ClickService,
}

impl RedirectService {
    pub fn new(link_service: LinkService, click_service: ClickService) -> Self {
        Self {
            link_service,
            click_service,
        }
    }

    /// Runs the pipeline for one redirect request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown links or inactive offers;
    /// nothing is recorded in that case. Returns [`AppError::Internal`] when
    /// the destination cannot be sent as a `Location` header (checked before
    /// any click is written) or when the click cannot be stored.
    pub async fn redirect(
        &self,
        target: LinkTarget<'_>,
        visit: Visit,
    ) -> Result<Redirection, AppError> {
        let link = self.link_service.resolve(target).await?;
        if !link.has_sendable_destination() {
            error!(link_id = %link.link_id, "Destination URL is not a valid header value");
            return Err(AppError::internal("Invalid destination URL", json!({})));
        }

        let session = SessionIdentity::resolve(visit.session_cookie.as_deref());
        if session.is_new() {
            info!(link_id = %link.link_id, "New visitor session");
        }

        self.click_service
            .record(&link, &session, visit.hints, visit.utm)
            .await?;

        Ok(Redirection {
            destination_url: link.destination_url,
            session,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Click, Device, ResolvedLink};
    use crate::domain::repositories::{MockClickRepository, MockLinkRepository};
    use chrono::Utc;
    use std::sync::Arc;
    use uuid::Uuid;

    fn service(links: MockLinkRepository, clicks: MockClickRepository) -> RedirectService {
        RedirectService::new(
            LinkService::new(Arc::new(links)),
            ClickService::new(Arc::new(clicks)),
        )
    }

    fn active_link() -> ResolvedLink {
        ResolvedLink {
            link_id: Uuid::new_v4(),
            destination_url: "https://shop.example/product".to_string(),
        }
    }

    fn echo_click(c: crate::domain::entities::NewClick) -> Result<Click, AppError> {
        Ok(Click {
            id: Uuid::new_v4(),
            link_id: c.link_id,
            session_id: c.session_id,
            ip: c.ip,
            user_agent: c.user_agent,
            referer: c.referer,
            device: c.device,
            utm: c.utm,
            created_at: Utc::now(),
        })
    }

    #[tokio::test]
    async fn test_new_visitor_gets_minted_session() {
        let link = active_link();
        let mut links = MockLinkRepository::new();
        links
            .expect_resolve_short_code()
            .returning(move |_| Ok(Some(link.clone())));

        let mut clicks = MockClickRepository::new();
        clicks
            .expect_record()
            .withf(|c| c.device == Device::Mobile)
            .times(1)
            .returning(echo_click);

        let redirection = service(links, clicks)
            .redirect(
                LinkTarget::ShortCode("abc123"),
                Visit {
                    session_cookie: None,
                    hints: ClientHints {
                        user_agent: Some("Mozilla/5.0 (iPhone) Mobile/15E148".to_string()),
                        ..Default::default()
                    },
                    utm: UtmParams::default(),
                },
            )
            .await
            .unwrap();

        assert_eq!(redirection.destination_url, "https://shop.example/product");
        assert!(redirection.session.is_new());
    }

    #[tokio::test]
    async fn test_returning_visitor_keeps_session() {
        let link = active_link();
        let mut links = MockLinkRepository::new();
        links
            .expect_resolve_short_code()
            .returning(move |_| Ok(Some(link.clone())));

        let mut clicks = MockClickRepository::new();
        clicks
            .expect_record()
            .withf(|c| c.session_id == "returning-visitor")
            .times(1)
            .returning(echo_click);

        let redirection = service(links, clicks)
            .redirect(
                LinkTarget::ShortCode("abc123"),
                Visit {
                    session_cookie: Some("returning-visitor".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(redirection.session.id(), "returning-visitor");
        assert!(!redirection.session.is_new());
    }

    #[tokio::test]
    async fn test_not_found_records_nothing() {
        let mut links = MockLinkRepository::new();
        links.expect_resolve_vanity().returning(|_, _| Ok(None));

        let mut clicks = MockClickRepository::new();
        clicks.expect_record().times(0);

        let result = service(links, clicks)
            .redirect(
                LinkTarget::Vanity {
                    affiliate_code: "jane",
                    offer_slug: "paused-offer",
                },
                Visit::default(),
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_click_failure_blocks_redirect() {
        let link = active_link();
        let mut links = MockLinkRepository::new();
        links
            .expect_resolve_short_code()
            .returning(move |_| Ok(Some(link.clone())));

        let mut clicks = MockClickRepository::new();
        clicks
            .expect_record()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let result = service(links, clicks)
            .redirect(LinkTarget::ShortCode("abc123"), Visit::default())
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_unsendable_destination_records_nothing() {
        let mut links = MockLinkRepository::new();
        links.expect_resolve_short_code().returning(|_| {
            Ok(Some(ResolvedLink {
                link_id: Uuid::new_v4(),
                destination_url: "https://shop.example/a\r\nSet-Cookie: x=1".to_string(),
            }))
        });

        let mut clicks = MockClickRepository::new();
        clicks.expect_record().times(0);

        let result = service(links, clicks)
            .redirect(LinkTarget::ShortCode("abc123"), Visit::default())
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
