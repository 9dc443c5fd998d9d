use chrono::{DateTime, FixedOffset};

use crate::errors::AppError;

/// Optional lower/upper time bounds of a series export.
///
/// `from` after `until` is allowed and simply matches no rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeFilter {
    pub from: Option<DateTime<FixedOffset>>,
    pub until: Option<DateTime<FixedOffset>>,
}

impl RangeFilter {
    /// A bound that is present but empty or not RFC 3339 fails the whole filter.
    pub fn parse(from: Option<&str>, until: Option<&str>) -> Result<Self, AppError> {
        Ok(Self {
            from: from.map(parse_bound).transpose()?,
            until: until.map(parse_bound).transpose()?,
        })
    }
}

fn parse_bound(raw: &str) -> Result<DateTime<FixedOffset>, AppError> {
    DateTime::parse_from_rfc3339(raw).map_err(|_| AppError::InvalidTimestamp(raw.to_string()))
}
