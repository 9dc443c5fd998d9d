//! Timeseries API DTOs

/// Query string of `GET /{series_id}`.
///
/// A key that appears with an empty value still counts as present; when a key
/// repeats, the first occurrence wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TimeseriesQuery {
    pub from: Option<String>,
    pub until: Option<String>,
    pub format: Option<String>,
}

impl TimeseriesQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "from" => &mut query.from,
                "until" => &mut query.until,
                "format" => &mut query.format,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}
