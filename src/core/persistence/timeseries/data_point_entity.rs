use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One flow-rate sample of a smart meter series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub timestamp: DateTime<Utc>,
    pub value: Option<f64>,
}
