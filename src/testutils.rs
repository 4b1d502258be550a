use std::{
    net::SocketAddr,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex,
    },
};

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use crate::{
    availability::BookedDates,
    backend::BookingBackend,
    error::AdminError,
    types::{Booking, BookingConfirmation, BookingForm, BookingId, Volunteer, VolunteerForm},
};

pub fn days_from_today(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}

pub fn example_form() -> BookingForm {
    BookingForm {
        first_name: "Ada".into(),
        surname: "Lovelace".into(),
        group_name: Some("Leeds Day Centre".into()),
        contact_number: "01234 567890".into(),
        email_address: "ada@example.org".into(),
        house_number: "12".into(),
        street_name: "Canal Street".into(),
        city: "Leeds".into(),
        postcode: "LS1 1AA".into(),
        booking_date: days_from_today(60),
        total_passengers: 8,
        wheelchair_users: 1,
        smoking: false,
        destination: "Bingley Five Rise".into(),
        lunch_arrangements: "Pub Meal".into(),
        notes: None,
        terms_and_conditions: true,
        group_leader_policy: true,
        skipper: None,
        crew1: None,
        crew2: None,
    }
}

pub fn example_booking(id: BookingId, booking_date: NaiveDate) -> Booking {
    let mut details = example_form();
    details.booking_date = booking_date;
    Booking {
        id,
        details,
        paid: None,
        complete: false,
        bookingmonth: None,
    }
}

pub fn example_volunteer(id: u64, first_name: &str, surname: &str, role: &str) -> Volunteer {
    Volunteer {
        id,
        details: VolunteerForm {
            first_name: first_name.into(),
            surname: surname.into(),
            contact_number: "07700 900000".into(),
            email_address: format!("{}@example.org", first_name.to_lowercase()),
            house_number: "3".into(),
            street_name: "Lock Lane".into(),
            city: "Shipley".into(),
            postcode: "BD18 3AA".into(),
            role: role.into(),
            notes: None,
        },
    }
}

pub struct MockBookingBackendInner {
    pub success: AtomicBool,
    pub confirmation_success: AtomicBool,
    pub calls_to_booked_dates: AtomicU64,
    pub calls_to_bookings: AtomicU64,
    pub calls_to_booking: AtomicU64,
    pub calls_to_create_booking: AtomicU64,
    pub calls_to_update_booking: AtomicU64,
    pub calls_to_delete_booking: AtomicU64,
    pub calls_to_send_booking_confirmation: AtomicU64,
    pub calls_to_volunteers: AtomicU64,
    pub booked: Mutex<Vec<NaiveDate>>,
    pub bookings: Mutex<Vec<Booking>>,
    pub volunteers: Mutex<Vec<Volunteer>>,
    pub submitted: Mutex<Vec<BookingForm>>,
    pub confirmations: Mutex<Vec<BookingConfirmation>>,
}

#[derive(Clone)]
pub struct MockBookingBackend(pub Arc<MockBookingBackendInner>);

impl MockBookingBackendInner {
    fn new() -> Self {
        Self {
            success: AtomicBool::new(true),
            confirmation_success: AtomicBool::new(true),
            calls_to_booked_dates: AtomicU64::default(),
            calls_to_bookings: AtomicU64::default(),
            calls_to_booking: AtomicU64::default(),
            calls_to_create_booking: AtomicU64::default(),
            calls_to_update_booking: AtomicU64::default(),
            calls_to_delete_booking: AtomicU64::default(),
            calls_to_send_booking_confirmation: AtomicU64::default(),
            calls_to_volunteers: AtomicU64::default(),
            booked: Mutex::default(),
            bookings: Mutex::default(),
            volunteers: Mutex::default(),
            submitted: Mutex::default(),
            confirmations: Mutex::default(),
        }
    }
}

impl MockBookingBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockBookingBackendInner::new()))
    }

    fn result(&self) -> Result<(), AdminError> {
        match self.0.success.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err(AdminError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                message: "Supposed to fail".into(),
            }),
        }
    }
}

impl BookingBackend for MockBookingBackend {
    async fn booked_dates(&self, _date: Option<NaiveDate>) -> Result<BookedDates, AdminError> {
        self.0.calls_to_booked_dates.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(self.0.booked.lock().unwrap().iter().copied().collect())
    }

    async fn bookings(&self) -> Result<Vec<Booking>, AdminError> {
        self.0.calls_to_bookings.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(self.0.bookings.lock().unwrap().clone())
    }

    async fn booking(&self, id: BookingId) -> Result<Booking, AdminError> {
        self.0.calls_to_booking.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        self.0
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|booking| booking.id == id)
            .cloned()
            .ok_or_else(|| AdminError::Status {
                status: reqwest::StatusCode::NOT_FOUND,
                message: "Booking not found".into(),
            })
    }

    async fn create_booking(&self, form: &BookingForm) -> Result<(), AdminError> {
        self.0.calls_to_create_booking.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        self.0.submitted.lock().unwrap().push(form.clone());
        Ok(())
    }

    async fn update_booking(&self, _id: BookingId, form: &BookingForm) -> Result<(), AdminError> {
        self.0.calls_to_update_booking.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        self.0.submitted.lock().unwrap().push(form.clone());
        Ok(())
    }

    async fn delete_booking(&self, _id: BookingId) -> Result<(), AdminError> {
        self.0.calls_to_delete_booking.fetch_add(1, Ordering::SeqCst);
        self.result()
    }

    async fn send_booking_confirmation(
        &self,
        confirmation: &BookingConfirmation,
    ) -> Result<(), AdminError> {
        self.0
            .calls_to_send_booking_confirmation
            .fetch_add(1, Ordering::SeqCst);
        if !self.0.confirmation_success.load(Ordering::SeqCst) {
            return Err(AdminError::Status {
                status: reqwest::StatusCode::BAD_GATEWAY,
                message: "Mailer offline".into(),
            });
        }
        self.0.confirmations.lock().unwrap().push(confirmation.clone());
        Ok(())
    }

    async fn volunteers(&self) -> Result<Vec<Volunteer>, AdminError> {
        self.0.calls_to_volunteers.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(self.0.volunteers.lock().unwrap().clone())
    }
}

/// One request as seen by the stub booking service.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: String,
}

#[derive(Clone, Default)]
pub struct StubApi {
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubApi {
    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> RecordedRequest {
        self.recorded().pop().unwrap()
    }
}

pub fn stub_booking_json(id: u64, booking_date: &str) -> Value {
    json!({
        "id": id,
        "first_name": "Ada",
        "surname": "Lovelace",
        "group_name": "Leeds Day Centre",
        "contact_number": "01234 567890",
        "email_address": "ada@example.org",
        "house_number": "12",
        "street_name": "Canal Street",
        "city": "Leeds",
        "postcode": "LS1 1AA",
        "booking_date": booking_date,
        "total_passengers": 8,
        "wheelchair_users": 1,
        "smoking": 0,
        "destination": "Bingley Five Rise",
        "lunch_arrangements": "Pub Meal",
        "notes": null,
        "terms_and_conditions": 1,
        "group_leader_policy": 1,
        "paid": null,
        "skipper": "Sam Skip",
        "crew1": null,
        "crew2": null,
        "complete": "false",
        "bookingmonth": "January"
    })
}

pub fn stub_volunteer_json(id: u64, first_name: &str, role: &str) -> Value {
    json!({
        "id": id,
        "first_name": first_name,
        "surname": "Boater",
        "contact_number": "07700 900000",
        "email_address": "crew@example.org",
        "house_number": "3",
        "street_name": "Lock Lane",
        "city": "Shipley",
        "postcode": "BD18 3AA",
        "role": role,
        "notes": null
    })
}

async fn stub_handler(
    State(stub): State<StubApi>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let path = uri
        .path_and_query()
        .map(|path| path.as_str().to_string())
        .unwrap_or_default();
    stub.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let route = uri.path();
    match (method.as_str(), route) {
        ("GET", "/dates") => {
            Json(json!(["2025-01-10", "2025-02-01T00:00:00.000Z"])).into_response()
        }
        ("GET", "/bookings") => Json(json!([
            stub_booking_json(1, "2025-01-10T00:00:00.000Z"),
            stub_booking_json(2, "2025-02-01")
        ]))
        .into_response(),
        ("GET", "/getBookingById/1") => {
            Json(stub_booking_json(1, "2025-01-10")).into_response()
        }
        ("GET", "/volunteers") => Json(json!([
            stub_volunteer_json(1, "Sam", "Skipper"),
            stub_volunteer_json(2, "Chris", " crew1 ")
        ]))
        .into_response(),
        ("GET", "/volunteers/2") => {
            Json(stub_volunteer_json(2, "Chris", "crew1")).into_response()
        }
        ("GET", "/news") => Json(json!([{
            "id": 3,
            "title": "Spring sailings",
            "content": "We are back on the water",
            "image_path": "/var/www/uploads/spring.jpg",
            "date": "2025-03-01T00:00:00.000Z"
        }]))
        .into_response(),
        ("GET", "/news/3") => Json(json!({
            "id": 3,
            "title": "Spring sailings",
            "content": "We are back on the water",
            "image_path": null,
            "date": "2025-03-01"
        }))
        .into_response(),
        ("GET", "/galleryImages") => Json(json!([
            { "id": 5, "file_path": "/var/www/uploads/gallery/lock.jpg" }
        ]))
        .into_response(),
        ("GET", "/prices") => Json(json!([{
            "id": 1,
            "trip1": 150.0,
            "trip2": 175.0,
            "trip3": 200.0,
            "trip4": 90,
            "trip5": 110,
            "trip6": 130
        }]))
        .into_response(),
        ("GET", "/news/404") => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "News item not found" })),
        )
            .into_response(),
        (_, "/fail") | ("GET", "/getBookingById/404") => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Booking not found" })),
        )
            .into_response(),
        (_, "/deleteBooking/500") => {
            (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response()
        }
        _ => Json(json!({ "message": "ok" })).into_response(),
    }
}

/// Starts an in-process stand-in for the remote booking service on an
/// ephemeral port and returns its base URL.
pub async fn spawn_stub_api() -> (String, StubApi, JoinHandle<()>) {
    let stub = StubApi::default();
    let app = Router::new()
        .fallback(stub_handler)
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address: SocketAddr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{address}"), stub, server)
}
