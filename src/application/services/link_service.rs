//! Link resolution for the redirect pipeline.

use std::sync::Arc;

use crate::domain::entities::ResolvedLink;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use serde_json::json;
use tracing::{debug, error};

/// Public message for every resolution miss.
///
/// Unknown codes, unknown vanity pairs and disabled offers all produce this
/// same message so probing cannot reveal campaign status.
pub const LINK_NOT_FOUND: &str = "Link not found";

/// How a redirect request addresses its link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget<'a> {
    /// `/r/{code}`
    ShortCode(&'a str),
    /// `/go/{affiliate}/{slug}`
    Vanity {
        affiliate_code: &'a str,
        offer_slug: &'a str,
    },
}

/// Resolves short codes and vanity pairs to destinations.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<dyn LinkRepository>) -> Self {
        Self { link_repository }
    }

    /// Resolves a link target with a single lookup and no retries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist, its offer
    /// is inactive, or the lookup itself fails. A failed lookup is logged at
    /// error level but answered like any other miss.
    pub async fn resolve(&self, target: LinkTarget<'_>) -> Result<ResolvedLink, AppError> {
        let resolved = match target {
            LinkTarget::ShortCode(code) => self.link_repository.resolve_short_code(code).await,
            LinkTarget::Vanity {
                affiliate_code,
                offer_slug,
            } => {
                self.link_repository
                    .resolve_vanity(affiliate_code, offer_slug)
                    .await
            }
        };

        match resolved {
            Ok(Some(link)) => {
                debug!(link_id = %link.link_id, ?target, "Link resolved");
                Ok(link)
            }
            Ok(None) => {
                debug!(?target, "Link not resolved");
                Err(AppError::not_found(LINK_NOT_FOUND, json!({})))
            }
            Err(e) => {
                error!(?target, error = %e, "Link lookup failed");
                Err(AppError::not_found(LINK_NOT_FOUND, json!({})))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use uuid::Uuid;

    fn resolved(url: &str) -> ResolvedLink {
        ResolvedLink {
            link_id: Uuid::new_v4(),
            destination_url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_resolve_short_code() {
        let mut repo = MockLinkRepository::new();
        let link = resolved("https://shop.example/product");
        let expected = link.clone();
        repo.expect_resolve_short_code()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));

        let service = LinkService::new(Arc::new(repo));
        let result = service.resolve(LinkTarget::ShortCode("abc123")).await;

        assert_eq!(result.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_resolve_vanity() {
        let mut repo = MockLinkRepository::new();
        let link = resolved("https://shop.example/summer");
        repo.expect_resolve_vanity()
            .withf(|aff, slug| aff == "jane" && slug == "summer-sale")
            .times(1)
            .returning(move |_, _| Ok(Some(link.clone())));
        repo.expect_resolve_short_code().times(0);

        let service = LinkService::new(Arc::new(repo));
        let result = service
            .resolve(LinkTarget::Vanity {
                affiliate_code: "jane",
                offer_slug: "summer-sale",
            })
            .await;

        assert_eq!(result.unwrap().destination_url, "https://shop.example/summer");
    }

    #[tokio::test]
    async fn test_miss_is_generic_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_resolve_short_code()
            .times(1)
            .returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(repo));
        let err = service
            .resolve(LinkTarget::ShortCode("disabled"))
            .await
            .unwrap_err();

        match err {
            AppError::NotFound { message, details } => {
                assert_eq!(message, LINK_NOT_FOUND);
                assert_eq!(details, json!({}));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_storage_error_is_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_resolve_short_code()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));
        repo.expect_resolve_vanity()
            .times(1)
            .returning(|_, _| Err(AppError::internal("Database error", json!({}))));

        let service = LinkService::new(Arc::new(repo));
        let by_code = service.resolve(LinkTarget::ShortCode("abc")).await.unwrap_err();
        let by_vanity = service
            .resolve(LinkTarget::Vanity {
                affiliate_code: "jane",
                offer_slug: "summer-sale",
            })
            .await
            .unwrap_err();

        for err in [by_code, by_vanity] {
            match err {
                AppError::NotFound { message, .. } => assert_eq!(message, LINK_NOT_FOUND),
                other => panic!("unexpected error: {:?}", other),
            }
        }
    }
}
