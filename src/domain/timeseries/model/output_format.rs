/// Wire format of an exported series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Cbor,
}

impl OutputFormat {
    /// Never fails: anything unrecognised, including an empty string, is JSON.
    pub fn from_param(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "cbor" | "binary" => OutputFormat::Cbor,
            _ => OutputFormat::Json,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Json => "application/json",
            OutputFormat::Csv => "text/csv",
            OutputFormat::Cbor => "application/cbor",
        }
    }
}

impl From<Option<&str>> for OutputFormat {
    fn from(raw: Option<&str>) -> Self {
        raw.map(Self::from_param).unwrap_or_default()
    }
}
