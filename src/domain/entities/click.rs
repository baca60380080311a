//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

/// Matches any user-agent advertising itself as mobile.
static MOBILE_UA_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)mobile").expect("valid mobile user-agent regex"));

/// Coarse device class derived from the user-agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Mobile,
    Desktop,
}

impl Device {
    /// Classifies a user-agent: `mobile` if it contains "mobile" in any case,
    /// `desktop` otherwise (including when the header is absent).
    pub fn classify(user_agent: Option<&str>) -> Self {
        match user_agent {
            Some(ua) if MOBILE_UA_REGEX.is_match(ua) => Device::Mobile,
            _ => Device::Desktop,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Mobile => "mobile",
            Device::Desktop => "desktop",
        }
    }

    /// Parses the stored representation; unknown values fall back to desktop.
    pub fn from_db(value: &str) -> Self {
        if value == "mobile" {
            Device::Mobile
        } else {
            Device::Desktop
        }
    }
}

/// Campaign attribution fields taken from the redirect query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtmParams {
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
    pub term: Option<String>,
    pub content: Option<String>,
    pub subid: Option<String>,
}

impl UtmParams {
    /// Extracts UTM fields from a raw query string.
    ///
    /// The first occurrence of each key wins and empty values count as absent.
    /// Unknown keys are ignored, so this never fails.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut utm = UtmParams::default();
        let Some(query) = query else {
            return utm;
        };

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }

            let slot = match key.as_ref() {
                "utm_source" => &mut utm.source,
                "utm_medium" => &mut utm.medium,
                "utm_campaign" => &mut utm.campaign,
                "utm_term" => &mut utm.term,
                "utm_content" => &mut utm.content,
                "subid" => &mut utm.subid,
                _ => continue,
            };

            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        utm
    }
}

/// Request metadata captured with every click.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientHints {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

/// An immutable click record.
#[derive(Debug, Clone)]
pub struct Click {
    pub id: Uuid,
    pub link_id: Uuid,
    pub session_id: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub device: Device,
    pub utm: UtmParams,
    pub created_at: DateTime<Utc>,
}

/// Input data for recording a new click.
///
/// The timestamp and id are assigned by the database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClick {
    pub link_id: Uuid,
    pub session_id: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub device: Device,
    pub utm: UtmParams,
}

impl NewClick {
    /// Builds a click record, classifying the device from the user-agent.
    pub fn new(link_id: Uuid, session_id: &str, hints: ClientHints, utm: UtmParams) -> Self {
        let device = Device::classify(hints.user_agent.as_deref());

        Self {
            link_id,
            session_id: session_id.to_string(),
            ip: hints.ip,
            user_agent: hints.user_agent,
            referer: hints.referer,
            device,
            utm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";

    #[test]
    fn test_classify_mobile_any_case() {
        assert_eq!(Device::classify(Some(IPHONE_UA)), Device::Mobile);
        assert_eq!(Device::classify(Some("some MOBILE client")), Device::Mobile);
        assert_eq!(Device::classify(Some("automobile-bot/1.0")), Device::Mobile);
    }

    #[test]
    fn test_classify_desktop() {
        assert_eq!(
            Device::classify(Some("Mozilla/5.0 (Windows NT 10.0; Win64; x64)")),
            Device::Desktop
        );
        assert_eq!(Device::classify(Some("")), Device::Desktop);
        assert_eq!(Device::classify(None), Device::Desktop);
    }

    #[test]
    fn test_device_db_representation() {
        assert_eq!(Device::Mobile.as_str(), "mobile");
        assert_eq!(Device::from_db("mobile"), Device::Mobile);
        assert_eq!(Device::from_db("desktop"), Device::Desktop);
        assert_eq!(Device::from_db("tablet"), Device::Desktop);
    }

    #[test]
    fn test_utm_from_query() {
        let utm = UtmParams::from_query(Some(
            "utm_source=ig&utm_medium=story&utm_campaign=summer%20sale&subid=42&other=x",
        ));

        assert_eq!(utm.source.as_deref(), Some("ig"));
        assert_eq!(utm.medium.as_deref(), Some("story"));
        assert_eq!(utm.campaign.as_deref(), Some("summer sale"));
        assert_eq!(utm.subid.as_deref(), Some("42"));
        assert!(utm.term.is_none());
        assert!(utm.content.is_none());
    }

    #[test]
    fn test_utm_first_value_wins_and_empty_is_absent() {
        let utm = UtmParams::from_query(Some("utm_source=a&utm_source=b&utm_term="));
        assert_eq!(utm.source.as_deref(), Some("a"));
        assert!(utm.term.is_none());
    }

    #[test]
    fn test_utm_without_query() {
        assert_eq!(UtmParams::from_query(None), UtmParams::default());
    }

    #[test]
    fn test_new_click_classifies_device() {
        let link_id = Uuid::new_v4();
        let click = NewClick::new(
            link_id,
            "sess-1",
            ClientHints {
                ip: Some("203.0.113.7".to_string()),
                user_agent: Some(IPHONE_UA.to_string()),
                referer: None,
            },
            UtmParams::default(),
        );

        assert_eq!(click.link_id, link_id);
        assert_eq!(click.session_id, "sess-1");
        assert_eq!(click.device, Device::Mobile);
        assert_eq!(click.ip.as_deref(), Some("203.0.113.7"));
    }
}
