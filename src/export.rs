use crate::error::AdminError;
use crate::types::Booking;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::info;

/// Columns that may leave the office under GDPR; no postal or email
/// address, no consent or crew data.
pub const GDPR_COLUMNS: [&str; 11] = [
    "booking_date",
    "first_name",
    "surname",
    "contact_number",
    "group_name",
    "total_passengers",
    "wheelchair_users",
    "smoking",
    "destination",
    "lunch_arrangements",
    "notes",
];

pub const ALL_COLUMNS: [&str; 24] = [
    "booking_date",
    "first_name",
    "surname",
    "group_name",
    "contact_number",
    "email_address",
    "house_number",
    "street_name",
    "city",
    "postcode",
    "total_passengers",
    "wheelchair_users",
    "smoking",
    "destination",
    "lunch_arrangements",
    "notes",
    "terms_and_conditions",
    "group_leader_policy",
    "paid",
    "skipper",
    "crew1",
    "crew2",
    "complete",
    "bookingmonth",
];

pub fn export_rows(bookings: &[Booking], gdpr: bool) -> Result<Vec<Value>, AdminError> {
    let columns: &[&str] = if gdpr { &GDPR_COLUMNS } else { &ALL_COLUMNS };

    bookings
        .iter()
        .map(|booking| -> Result<Value, AdminError> {
            let record = serde_json::to_value(booking)?;
            let row: Map<String, Value> = columns
                .iter()
                .map(|column| {
                    let value = record.get(*column).cloned().unwrap_or(Value::Null);
                    (column.to_string(), value)
                })
                .collect();
            Ok(Value::Object(row))
        })
        .collect()
}

pub async fn export_bookings(
    bookings: &[Booking],
    path: &Path,
    gdpr: bool,
) -> Result<usize, AdminError> {
    let rows = export_rows(bookings, gdpr)?;
    tokio::fs::write(path, serde_json::to_vec_pretty(&rows)?).await?;
    info!(rows = rows.len(), gdpr, path = %path.display(), "Exported bookings");
    Ok(rows.len())
}
