//! CSV export endpoint

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, header},
};
use chrono::Utc;
use csv::WriterBuilder;

use crate::{ServerError, server::ServerState};

const COLUMNS: [&str; 7] = [
    "Receipt #",
    "Date",
    "Business Name",
    "Customer",
    "Attendant",
    "Items",
    "Total Amount",
];

/// All receipts as a CSV attachment, one row per receipt.
pub async fn receipts_csv(
    State(state): State<ServerState>,
) -> Result<(HeaderMap, Vec<u8>), ServerError> {
    let rows = state.engine.export_rows().await?;

    // Header row is written explicitly so an empty export still has one.
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    writer
        .write_record(COLUMNS)
        .map_err(|err| ServerError::Generic(format!("failed to write export: {err}")))?;
    for row in &rows {
        writer
            .serialize(row)
            .map_err(|err| ServerError::Generic(format!("failed to write export: {err}")))?;
    }
    let body = writer
        .into_inner()
        .map_err(|err| ServerError::Generic(format!("failed to finish export: {err}")))?;

    let filename = format!(
        "receipts_report_{}.csv",
        Utc::now()
            .with_timezone(&engine::BUSINESS_TZ)
            .format("%Y%m%d_%H%M%S")
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    if let Ok(value) =
        HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
    {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    Ok((headers, body))
}
