//! Conversion recording for the pixel and server-to-server entry points.
//!
//! Both entry points store the same record but differ in strictness:
//!
//! - **Pixel** never fails. Missing identifiers skip recording and storage
//!   errors are logged and swallowed, because the embedding page cannot react
//!   to a broken image.
//! - **Report** is for trusted servers and rejects malformed input with a
//!   validation error naming the missing fields.

use std::sync::Arc;

use crate::domain::entities::{Conversion, DEFAULT_CURRENCY, NewConversion};
use crate::domain::repositories::ConversionRepository;
use crate::error::AppError;
use serde_json::{Value, json};
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Conversion data carried by the tracking pixel query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PixelConversion {
    pub link_id: Option<String>,
    pub session_id: Option<String>,
    pub revenue_cents: i64,
    pub external_order_id: Option<String>,
    pub currency: Option<String>,
}

/// Conversion data posted by an advertiser's server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionReport {
    pub link_id: Option<String>,
    pub session_id: Option<String>,
    pub revenue_cents: Option<i64>,
    pub external_order_id: Option<String>,
    pub currency: Option<String>,
    pub meta: Option<Value>,
}

/// What happened to a pixel hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelOutcome {
    Recorded,
    Skipped,
    Failed,
}

/// Records conversions. Never reads back or deduplicates.
pub struct ConversionService {
    conversion_repository: Arc<dyn ConversionRepository>,
}

impl ConversionService {
    /// Creates a new conversion service.
    pub fn new(conversion_repository: Arc<dyn ConversionRepository>) -> Self {
        Self {
            conversion_repository,
        }
    }

    /// Records a pixel conversion if both identifiers are usable.
    ///
    /// Never returns an error: a missing `link_id` or `sid`, a `link_id` that
    /// is not a UUID, or a storage failure all leave the pixel response intact.
    pub async fn record_pixel(&self, pixel: PixelConversion) -> PixelOutcome {
        let link_id = non_empty(pixel.link_id).and_then(|id| Uuid::parse_str(&id).ok());
        let session_id = non_empty(pixel.session_id);

        let (Some(link_id), Some(session_id)) = (link_id, session_id) else {
            debug!("Pixel hit without usable link_id/sid, not recorded");
            metrics::counter!("pixel_conversions_skipped_total").increment(1);
            return PixelOutcome::Skipped;
        };

        let new_conversion = NewConversion {
            link_id,
            session_id,
            revenue_cents: pixel.revenue_cents,
            currency: currency_or_default(pixel.currency),
            external_order_id: non_empty(pixel.external_order_id),
            meta: None,
        };

        match self.conversion_repository.record(new_conversion).await {
            Ok(_) => {
                metrics::counter!("conversions_recorded_total", "source" => "pixel").increment(1);
                PixelOutcome::Recorded
            }
            Err(e) => {
                warn!(%link_id, "Pixel conversion not stored: {}", e);
                metrics::counter!("pixel_conversions_failed_total").increment(1);
                PixelOutcome::Failed
            }
        }
    }

    /// Records a server-to-server conversion report.
    ///
    /// `revenue_cents` defaults to 0 and `currency` to `USD`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `link_id` or `session_id` is
    /// missing or empty, or if `link_id` is not a UUID.
    /// Returns [`AppError::Internal`] on storage failure.
    pub async fn record_report(&self, report: ConversionReport) -> Result<Conversion, AppError> {
        let link_id = non_empty(report.link_id);
        let session_id = non_empty(report.session_id);

        let (link_id, session_id) = match (link_id, session_id) {
            (Some(link_id), Some(session_id)) => (link_id, session_id),
            (link_id, session_id) => {
                let missing: Vec<&str> = [
                    link_id.is_none().then_some("link_id"),
                    session_id.is_none().then_some("session_id"),
                ]
                .into_iter()
                .flatten()
                .collect();

                return Err(AppError::bad_request(
                    format!("{} required", missing.join(" and ")),
                    json!({ "missing": missing }),
                ));
            }
        };

        let link_id = Uuid::parse_str(&link_id).map_err(|_| {
            AppError::bad_request("link_id must be a UUID", json!({ "field": "link_id" }))
        })?;

        let new_conversion = NewConversion {
            link_id,
            session_id,
            revenue_cents: report.revenue_cents.unwrap_or(0),
            currency: currency_or_default(report.currency),
            external_order_id: non_empty(report.external_order_id),
            meta: report.meta,
        };

        let conversion = self
            .conversion_repository
            .record(new_conversion)
            .await
            .inspect_err(|e| error!(%link_id, "Failed to record conversion: {}", e))?;

        metrics::counter!("conversions_recorded_total", "source" => "report").increment(1);

        Ok(conversion)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn currency_or_default(currency: Option<String>) -> String {
    non_empty(currency).unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
}
