use chrono::NaiveDate;
use reqwest::StatusCode;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Request to the booking service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Booking service answered {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("{}", validation_summary(.0))]
    Validation(#[from] ValidationErrors),

    #[error("Please select a future date! ({0})")]
    DateInPast(NaiveDate),

    #[error("There is already a booking on this date, please choose another ({0})")]
    DateTaken(NaiveDate),

    #[error("Could not confirm that {date} is free, booking not submitted: {source}")]
    AvailabilityUnknown {
        date: NaiveDate,
        #[source]
        source: Box<AdminError>,
    },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Deletion of {0} was not confirmed")]
    NotConfirmed(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown month: {0}")]
    InvalidMonth(String),

    #[error("Local file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Flattens the field errors into one line per failed rule, sorted by field
/// so the output is stable.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid ({})", error.code));
                (field.to_string(), message)
            })
        })
        .collect();
    messages.sort();
    messages.into_iter().map(|(_, message)| message).collect()
}

fn validation_summary(errors: &ValidationErrors) -> String {
    validation_messages(errors).join("; ")
}
