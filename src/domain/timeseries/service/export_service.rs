//! Writes a series in the requested wire format.
//!
//! CSV is streamed row by row as the database delivers it. JSON and CBOR are
//! encoded in one piece once all rows have been read.

use axum::body::{Body, Bytes};
use axum::http::header::CONTENT_TYPE;
use axum::response::Response;
use chrono::{DateTime, SecondsFormat, Utc};
use futures::{future, stream, StreamExt, TryStreamExt};
use tracing::error;

use crate::core::persistence::timeseries::data_point_entity::DataPoint;
use crate::core::persistence::timeseries::timeseries_api_repository_trait::DataPointStream;
use crate::domain::timeseries::model::OutputFormat;
use crate::errors::{encode_error, query_error, AppError};

pub const CSV_HEADER: [&str; 2] = ["timestamp", "value"];

pub async fn encode(points: DataPointStream, format: OutputFormat) -> Result<Response, AppError> {
    let body = match format {
        OutputFormat::Csv => csv_body(points),
        OutputFormat::Json => {
            let points = collect(points).await?;
            Body::from(serde_json::to_vec(&points).map_err(encode_error)?)
        }
        OutputFormat::Cbor => {
            let points = collect(points).await?;
            // packed: fields are keyed by index, timestamp = 0, value = 1
            Body::from(serde_cbor::ser::to_vec_packed(&points).map_err(encode_error)?)
        }
    };

    Response::builder()
        .header(CONTENT_TYPE, format.content_type())
        .body(body)
        .map_err(encode_error)
}

async fn collect(points: DataPointStream) -> Result<Vec<DataPoint>, AppError> {
    points.try_collect().await.map_err(query_error)
}

/// Header first, then one chunk per row. A failing row ends the body with an
/// error, which aborts the transfer instead of sending a silently short file.
fn csv_body(points: DataPointStream) -> Body {
    let header = stream::once(future::ready(csv_record(CSV_HEADER)));
    let rows = points.map(|row| match row {
        Ok(point) => csv_record([format_timestamp(&point.timestamp), format_value(point.value)]),
        Err(err) => Err(query_error(err)),
    });

    Body::from_stream(header.chain(rows).inspect_err(|err| {
        error!(error = %err, "aborting csv export");
    }))
}

fn csv_record<I, T>(fields: I) -> Result<Bytes, AppError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::with_capacity(48));
    writer.write_record(fields).map_err(encode_error)?;
    let line = writer
        .into_inner()
        .map_err(|err| encode_error(err.into_error()))?;
    Ok(Bytes::from(line))
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn format_value(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.6}")).unwrap_or_default()
}
