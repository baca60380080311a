//! Click recording.

use std::sync::Arc;

use crate::domain::entities::{Click, ClientHints, NewClick, ResolvedLink, UtmParams};
use crate::domain::repositories::ClickRepository;
use crate::domain::session::SessionIdentity;
use crate::error::AppError;
use tracing::error;

/// Persists one click per redirect.
///
/// Every call inserts a new record; repeated clicks within one session are
/// all kept since click volume is itself a tracked metric.
pub struct ClickService {
    click_repository: Arc<dyn ClickRepository>,
}

impl ClickService {
    /// Creates a new click service.
    pub fn new(click_repository: Arc<dyn ClickRepository>) -> Self {
        Self { click_repository }
    }

    /// Records a click for a resolved link.
    ///
    /// # Errors
    ///
    /// Storage failures are returned to the caller; a lost click cannot be
    /// recovered later, so the redirect must not proceed silently.
    pub async fn record(
        &self,
        link: &ResolvedLink,
        session: &SessionIdentity,
        hints: ClientHints,
        utm: UtmParams,
    ) -> Result<Click, AppError> {
        let new_click = NewClick::new(link.link_id, session.id(), hints, utm);
        let device = new_click.device.as_str();

        let click = self
            .click_repository
            .record(new_click)
            .await
            .inspect_err(|e| error!(link_id = %link.link_id, "Failed to record click: {}", e))?;

        metrics::counter!("clicks_recorded_total", "device" => device).increment(1);

        Ok(click)
    }
}
