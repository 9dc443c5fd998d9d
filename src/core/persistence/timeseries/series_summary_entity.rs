use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog entry: a known series with its first and last sample time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSummary {
    #[serde(rename = "dataSeriesID")]
    pub series_id: String,
    #[serde(rename = "firstEntry")]
    pub first_entry: DateTime<Utc>,
    #[serde(rename = "lastEntry")]
    pub last_entry: DateTime<Utc>,
}
