//! Query parameters of the conversion pixel.
//!
//! The pixel must answer with an image no matter what it is sent, so the
//! query is parsed by hand instead of through `Query<T>`, which would reject
//! malformed input.

use crate::application::services::PixelConversion;

/// Parses the pixel query string: `link_id`, `sid`, `rev`, `oid`, `cur`.
///
/// The first occurrence of each key wins. Unknown keys are ignored.
pub fn parse_pixel_query(query: Option<&str>) -> PixelConversion {
    let mut link_id = None;
    let mut session_id = None;
    let mut rev = None;
    let mut external_order_id = None;
    let mut currency = None;

    for (key, value) in url::form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
        let slot = match key.as_ref() {
            "link_id" => &mut link_id,
            "sid" => &mut session_id,
            "rev" => &mut rev,
            "oid" => &mut external_order_id,
            "cur" => &mut currency,
            _ => continue,
        };

        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    PixelConversion {
        link_id,
        session_id,
        revenue_cents: rev.as_deref().map(parse_revenue_cents).unwrap_or(0),
        external_order_id,
        currency,
    }
}

/// Leading-integer parse of the `rev` parameter.
///
/// Skips leading whitespace, accepts an optional sign, then takes the longest
/// run of ASCII digits: `"12.50"` is 12 and `"  -7abc"` is -7. Anything
/// without leading digits, or out of `i64` range, is 0.
pub fn parse_revenue_cents(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return 0;
    }

    let digits = &rest[..digits_len];
    let parsed = if negative {
        format!("-{}", digits).parse::<i64>()
    } else {
        digits.parse::<i64>()
    };

    parsed.unwrap_or(0)
}
