use crate::availability::AvailabilityChecker;
use crate::backend::BookingBackend;
use crate::calendar::{format_booking_date, Month};
use crate::error::AdminError;
use crate::types::{Booking, BookingConfirmation, BookingForm, BookingId};
use chrono::Datelike;
use tracing::{error, info};
use validator::Validate;

/// Create, edit and delete flows for bookings.
///
/// Every flow validates locally first, so malformed forms never reach the
/// service. The availability check and the submission are separate
/// requests; a concurrent submission for the same date can still win.
#[derive(Debug, Clone)]
pub struct BookingDesk<B: BookingBackend> {
    backend: B,
    checker: AvailabilityChecker<B>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatedBooking {
    pub summary: String,
    pub confirmation_sent: bool,
}

impl<B: BookingBackend> BookingDesk<B> {
    pub fn new(backend: B) -> Self {
        let checker = AvailabilityChecker::new(backend.clone());
        Self { backend, checker }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn create(&self, form: &BookingForm) -> Result<CreatedBooking, AdminError> {
        form.validate()?;
        self.checker.ensure_available(form.booking_date).await?;

        self.backend.create_booking(form).await?;
        info!(date = %form.booking_date, surname = %form.surname, "Booking created");

        // The booking stands even if the mailer is down.
        let confirmation_sent = match self
            .backend
            .send_booking_confirmation(&BookingConfirmation::from(form))
            .await
        {
            Ok(()) => true,
            Err(err) => {
                error!(?err, email = %form.email_address, "Failed to send booking confirmation");
                false
            }
        };

        Ok(CreatedBooking {
            summary: confirmation_summary(form),
            confirmation_sent,
        })
    }

    /// A booking keeping its date is not checked against itself.
    pub async fn edit(&self, id: BookingId, form: &BookingForm) -> Result<(), AdminError> {
        form.validate()?;

        let current = self.backend.booking(id).await?;
        if current.details.booking_date != form.booking_date {
            self.checker.ensure_available(form.booking_date).await?;
        }

        self.backend.update_booking(id, form).await?;
        info!(id, date = %form.booking_date, "Booking updated");
        Ok(())
    }

    pub async fn delete(&self, id: BookingId, confirmed: bool) -> Result<(), AdminError> {
        if !confirmed {
            return Err(AdminError::NotConfirmed(format!("booking {id}")));
        }
        self.backend.delete_booking(id).await?;
        info!(id, "Booking deleted");
        Ok(())
    }

    pub async fn month(&self, month: Month, year: i32) -> Result<Vec<Booking>, AdminError> {
        let bookings = self.backend.bookings().await?;
        Ok(bookings_for_month(bookings, month, year))
    }
}

/// Bookings dated within `month` of `year`, earliest first.
pub fn bookings_for_month(bookings: Vec<Booking>, month: Month, year: i32) -> Vec<Booking> {
    let mut selected: Vec<Booking> = bookings
        .into_iter()
        .filter(|booking| {
            let date = booking.details.booking_date;
            date.year() == year && Month::of(date) == month
        })
        .collect();
    selected.sort_by_key(|booking| booking.details.booking_date);
    selected
}

fn lunch_description(lunch_arrangements: &str) -> &'static str {
    match lunch_arrangements {
        "Packed Lunch" => "you will be bringing your own packed lunch.",
        "Fish and Chips" => "you will have fish and chips delivered to the boat.",
        "Pub Meal" => "you will be eating at the pub.",
        _ => "lunch arrangements are not specified.",
    }
}

fn wheelchair_description(wheelchair_users: u32) -> &'static str {
    match wheelchair_users {
        0 => "There are no wheelchair users on this trip. Please let us know if this changes so we can have the lift ready.",
        1 => "There is 1 wheelchair user on this trip. The lift will be ready for you.",
        _ => "There are 2 wheelchair users on this trip. The lift will be ready for you.",
    }
}

pub fn confirmation_summary(form: &BookingForm) -> String {
    format!(
        "{} ({}) has been successfully booked. This is a {} trip to {} and {} {}",
        format_booking_date(form.booking_date),
        form.booking_date.format("%d/%m/%Y"),
        if form.smoking { "smoking" } else { "non-smoking" },
        form.destination,
        lunch_description(&form.lunch_arrangements),
        wheelchair_description(form.wheelchair_users),
    )
}
