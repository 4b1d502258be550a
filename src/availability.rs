use crate::backend::BookingBackend;
use crate::calendar::Month;
use crate::error::AdminError;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Calendar days the booking service reports as reserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookedDates(BTreeSet<NaiveDate>);

impl BookedDates {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<NaiveDate> for BookedDates {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    InPast,
    AlreadyBooked,
}

impl Availability {
    pub fn is_available(self) -> bool {
        self == Availability::Available
    }

    fn into_result(self, date: NaiveDate) -> Result<(), AdminError> {
        match self {
            Availability::Available => Ok(()),
            Availability::InPast => Err(AdminError::DateInPast(date)),
            Availability::AlreadyBooked => Err(AdminError::DateTaken(date)),
        }
    }
}

/// A booking date counts from midnight UTC, so it is in the future only if
/// that midnight has not passed yet.
pub fn is_in_future(candidate: NaiveDate, now: DateTime<Utc>) -> bool {
    candidate.and_time(NaiveTime::MIN).and_utc() > now
}

pub fn availability_at(
    candidate: NaiveDate,
    booked: &BookedDates,
    now: DateTime<Utc>,
) -> Availability {
    if !is_in_future(candidate, now) {
        return Availability::InPast;
    }
    if booked.contains(candidate) {
        return Availability::AlreadyBooked;
    }
    Availability::Available
}

pub fn is_date_available_at(candidate: NaiveDate, booked: &BookedDates, now: DateTime<Utc>) -> bool {
    availability_at(candidate, booked, now).is_available()
}

pub fn is_date_available(candidate: NaiveDate, booked: &BookedDates) -> bool {
    is_date_available_at(candidate, booked, Utc::now())
}

/// Trips run from April to October.
pub fn is_in_season(month: Month) -> bool {
    (Month::April..=Month::October).contains(&month)
}

/// How a day is shown on the booking calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    Booked,
    OutOfSeason,
    Free,
}

impl DayStatus {
    pub fn label(self) -> &'static str {
        match self {
            DayStatus::Booked => "Booked",
            DayStatus::OutOfSeason => "Out Of Season",
            DayStatus::Free => "Available",
        }
    }
}

/// A booked day shows as booked even outside the season.
pub fn day_status(day: NaiveDate, booked: &BookedDates) -> DayStatus {
    if booked.contains(day) {
        DayStatus::Booked
    } else if !is_in_season(Month::of(day)) {
        DayStatus::OutOfSeason
    } else {
        DayStatus::Free
    }
}

/// Every day of `month` in `year` with its calendar status.
pub fn month_view(
    month: Month,
    year: i32,
    booked: &BookedDates,
) -> Result<Vec<(NaiveDate, DayStatus)>, AdminError> {
    let first = NaiveDate::from_ymd_opt(year, month.number(), 1)
        .ok_or_else(|| AdminError::InvalidDate(format!("{month} {year}")))?;
    Ok(first
        .iter_days()
        .take_while(|day| day.month() == first.month())
        .map(|day| (day, day_status(day, booked)))
        .collect())
}

/// Checks candidate dates against the booked dates the service reports at
/// the time of the check. Nothing is cached between checks.
#[derive(Debug, Clone)]
pub struct AvailabilityChecker<B: BookingBackend> {
    backend: B,
}

impl<B: BookingBackend> AvailabilityChecker<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Fails closed: if the booked dates cannot be fetched the date is not
    /// reported available, the fetch error is returned instead.
    pub async fn check(&self, candidate: NaiveDate) -> Result<Availability, AdminError> {
        if !is_in_future(candidate, Utc::now()) {
            return Ok(Availability::InPast);
        }

        let booked = self
            .backend
            .booked_dates(Some(candidate))
            .await
            .map_err(|err| {
                warn!(?err, %candidate, "Failed to fetch booked dates");
                AdminError::AvailabilityUnknown {
                    date: candidate,
                    source: Box::new(err),
                }
            })?;

        let availability = if is_date_available(candidate, &booked) {
            Availability::Available
        } else if booked.contains(candidate) {
            Availability::AlreadyBooked
        } else {
            // midnight passed while the dates were being fetched
            Availability::InPast
        };
        info!(%candidate, ?availability, booked = booked.len(), "Checked booking date");
        Ok(availability)
    }

    pub async fn ensure_available(&self, candidate: NaiveDate) -> Result<(), AdminError> {
        self.check(candidate).await?.into_result(candidate)
    }
}
