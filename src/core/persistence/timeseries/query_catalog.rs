use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, FixedOffset};
use tokio_postgres::types::ToSql;
use tracing::{debug, info};

const EMBEDDED_QUERIES: &str = include_str!("../../../../resources/queries.sql");

/// The fixed set of statements the service issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryName {
    Overview,
    Exists,
    Timeseries,
    DaterangeUntil,
    DaterangeFrom,
    Daterange,
}

impl QueryName {
    pub const ALL: [QueryName; 6] = [
        QueryName::Overview,
        QueryName::Exists,
        QueryName::Timeseries,
        QueryName::DaterangeUntil,
        QueryName::DaterangeFrom,
        QueryName::Daterange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryName::Overview => "timeseries-overview",
            QueryName::Exists => "timeseries-exists",
            QueryName::Timeseries => "timeseries",
            QueryName::DaterangeUntil => "timeseries-daterange-until",
            QueryName::DaterangeFrom => "timeseries-daterange-from",
            QueryName::Daterange => "timeseries-daterange",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.as_str() == name)
    }
}

/// A value bound to a positional query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParam {
    SeriesId(String),
    Timestamp(DateTime<FixedOffset>),
}

impl QueryParam {
    pub fn as_sql(&self) -> &(dyn ToSql + Sync) {
        match self {
            QueryParam::SeriesId(id) => id,
            QueryParam::Timestamp(ts) => ts,
        }
    }
}

/// A range query variant together with the parameters bound to it, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedQuery {
    pub name: QueryName,
    pub params: Vec<QueryParam>,
}

/// SQL text for every [`QueryName`], parsed from a `-- name:` annotated file.
#[derive(Debug, Clone)]
pub struct QueryCatalog {
    queries: HashMap<QueryName, String>,
}

impl QueryCatalog {
    pub fn embedded() -> Result<Self> {
        Self::parse(EMBEDDED_QUERIES).context("embedded query file is invalid")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                info!(path = %path.display(), "loading sql queries from file");
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("unable to read query file {}", path.display()))?;
                Self::parse(&raw)
                    .with_context(|| format!("query file {} is invalid", path.display()))
            }
            None => {
                debug!("using embedded sql queries");
                Self::embedded()
            }
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let mut blocks: Vec<(String, String)> = Vec::new();

        for line in raw.lines() {
            if let Some(name) = parse_name_tag(line) {
                blocks.push((name.to_string(), String::new()));
                continue;
            }
            if let Some((_, body)) = blocks.last_mut() {
                body.push_str(line);
                body.push('\n');
            }
        }

        let mut queries = HashMap::new();
        for (name, body) in blocks {
            let Some(query) = QueryName::from_name(&name) else {
                debug!(name, "ignoring unused named query");
                continue;
            };
            let body = body.trim();
            if body.is_empty() {
                bail!("query '{name}' has no sql body");
            }
            if queries.insert(query, body.to_string()).is_some() {
                bail!("query '{name}' is defined more than once");
            }
        }

        for query in QueryName::ALL {
            if !queries.contains_key(&query) {
                return Err(anyhow!("query '{}' is missing", query.as_str()));
            }
        }

        Ok(Self { queries })
    }

    pub fn get(&self, name: QueryName) -> &str {
        // every name is checked in `parse`
        self.queries.get(&name).map(String::as_str).unwrap_or_default()
    }
}

fn parse_name_tag(line: &str) -> Option<&str> {
    let comment = line.trim().strip_prefix("--")?;
    let name = comment.trim().strip_prefix("name:")?.trim();
    (!name.is_empty()).then_some(name)
}
