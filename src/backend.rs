use crate::availability::BookedDates;
use crate::error::AdminError;
use crate::types::{Booking, BookingConfirmation, BookingForm, BookingId, Volunteer};
use chrono::NaiveDate;
use std::future::Future;

/// The part of the booking service the booking flows depend on.
pub trait BookingBackend: Clone + Send + Sync + 'static {
    fn booked_dates(
        &self,
        date: Option<NaiveDate>,
    ) -> impl Future<Output = Result<BookedDates, AdminError>> + Send;
    fn bookings(&self) -> impl Future<Output = Result<Vec<Booking>, AdminError>> + Send;
    fn booking(&self, id: BookingId) -> impl Future<Output = Result<Booking, AdminError>> + Send;
    fn create_booking(
        &self,
        form: &BookingForm,
    ) -> impl Future<Output = Result<(), AdminError>> + Send;
    fn update_booking(
        &self,
        id: BookingId,
        form: &BookingForm,
    ) -> impl Future<Output = Result<(), AdminError>> + Send;
    fn delete_booking(&self, id: BookingId) -> impl Future<Output = Result<(), AdminError>> + Send;
    fn send_booking_confirmation(
        &self,
        confirmation: &BookingConfirmation,
    ) -> impl Future<Output = Result<(), AdminError>> + Send;
    fn volunteers(&self) -> impl Future<Output = Result<Vec<Volunteer>, AdminError>> + Send;
}
