use crate::availability::BookedDates;
use crate::backend::BookingBackend;
use crate::calendar::{parse_calendar_day, Month};
use crate::configuration::Configuration;
use crate::error::AdminError;
use crate::types::{
    Booking, BookingConfirmation, BookingForm, BookingId, Fares, FileType, GalleryImage, ImageId,
    NewsDraft, NewsId, NewsItem, NewsUpdate, TripPrices, Volunteer, VolunteerForm, VolunteerId,
};
use chrono::NaiveDate;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error};

#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

fn parse_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.error)
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| body.to_string())
}

#[derive(Serialize)]
struct TripListsRequest<'a> {
    data: &'a [Booking],
    #[serde(rename = "targetMonth")]
    target_month: &'a str,
    volunteers: &'a [Volunteer],
}

/// Typed client for the canal boat booking service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    upload_timeout: Duration,
}

impl ApiClient {
    pub fn new<C: Configuration>(configuration: &C) -> Result<Self, AdminError> {
        let client = Client::builder()
            .timeout(configuration.request_timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: configuration.api_url().trim_end_matches('/').to_string(),
            upload_timeout: configuration.upload_timeout(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AdminError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = parse_error_message(&body);
        error!(%status, %message, "Booking service rejected request");
        Err(AdminError::Status { status, message })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AdminError> {
        debug!(path, "GET");
        let response = self.send(self.client.get(self.url(path))).await?;
        Ok(response.json().await?)
    }

    pub async fn volunteer(&self, id: VolunteerId) -> Result<Volunteer, AdminError> {
        self.get_json(&format!("/volunteers/{id}")).await
    }

    pub async fn add_volunteer(&self, form: &VolunteerForm) -> Result<(), AdminError> {
        self.send(self.client.post(self.url("/addVolunteers")).json(form))
            .await?;
        Ok(())
    }

    pub async fn update_volunteer(
        &self,
        id: VolunteerId,
        form: &VolunteerForm,
    ) -> Result<(), AdminError> {
        self.send(
            self.client
                .patch(self.url(&format!("/updateVolunteer/{id}")))
                .json(form),
        )
        .await?;
        Ok(())
    }

    pub async fn delete_volunteer(&self, id: VolunteerId) -> Result<(), AdminError> {
        self.send(
            self.client
                .delete(self.url(&format!("/deleteVolunteer/{id}"))),
        )
        .await?;
        Ok(())
    }

    pub async fn news(&self) -> Result<Vec<NewsItem>, AdminError> {
        self.get_json("/news").await
    }

    pub async fn news_item(&self, id: NewsId) -> Result<NewsItem, AdminError> {
        self.get_json(&format!("/news/{id}")).await
    }

    pub async fn add_news(&self, draft: &NewsDraft) -> Result<(), AdminError> {
        let mut form = Form::new()
            .text("title", draft.title.clone())
            .text("content", draft.content.clone());
        if let Some(image) = &draft.image {
            form = form.part("image", file_part(image).await?);
        }

        self.send(
            self.client
                .post(self.url("/addNews"))
                .timeout(self.upload_timeout)
                .multipart(form),
        )
        .await?;
        Ok(())
    }

    pub async fn update_news(&self, id: NewsId, update: &NewsUpdate) -> Result<(), AdminError> {
        self.send(
            self.client
                .patch(self.url(&format!("/updateNews/{id}")))
                .json(update),
        )
        .await?;
        Ok(())
    }

    pub async fn delete_news(&self, id: NewsId) -> Result<(), AdminError> {
        self.send(self.client.delete(self.url(&format!("/news/{id}"))))
            .await?;
        Ok(())
    }

    pub async fn gallery_images(&self) -> Result<Vec<GalleryImage>, AdminError> {
        self.get_json("/galleryImages").await
    }

    pub async fn add_gallery_image(&self, image: &Path) -> Result<(), AdminError> {
        let form = Form::new()
            .part("file", file_part(image).await?)
            .text("fileType", FileType::GalleryImages.as_str());

        self.send(
            self.client
                .post(self.url("/addGalleryImage"))
                .timeout(self.upload_timeout)
                .multipart(form),
        )
        .await?;
        Ok(())
    }

    pub async fn delete_gallery_image(&self, id: ImageId) -> Result<(), AdminError> {
        self.send(
            self.client
                .delete(self.url(&format!("/galleryImages/{id}"))),
        )
        .await?;
        Ok(())
    }

    /// The service reads `fileType` before the file itself, so it goes first.
    pub async fn upload_file(&self, file_type: FileType, file: &Path) -> Result<(), AdminError> {
        let form = Form::new()
            .text("fileType", file_type.as_str())
            .part("file", file_part(file).await?);

        self.send(
            self.client
                .post(self.url("/uploadFile"))
                .timeout(self.upload_timeout)
                .multipart(form),
        )
        .await?;
        Ok(())
    }

    pub async fn prices(&self) -> Result<Vec<TripPrices>, AdminError> {
        self.get_json("/prices").await
    }

    pub async fn update_prices(&self, id: u64, fares: &Fares) -> Result<(), AdminError> {
        self.send(
            self.client
                .put(self.url(&format!("/updatePrices/{id}")))
                .json(fares),
        )
        .await?;
        Ok(())
    }

    pub async fn send_trip_lists(
        &self,
        bookings: &[Booking],
        target_month: Month,
        volunteers: &[Volunteer],
    ) -> Result<(), AdminError> {
        let request = TripListsRequest {
            data: bookings,
            target_month: target_month.name(),
            volunteers,
        };
        self.send(
            self.client
                .post(self.url("/send-all-bookings-GDPR"))
                .json(&request),
        )
        .await?;
        Ok(())
    }
}

async fn file_part(path: &Path) -> Result<Part, AdminError> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(Part::bytes(bytes).file_name(file_name))
}

impl BookingBackend for ApiClient {
    async fn booked_dates(&self, date: Option<NaiveDate>) -> Result<BookedDates, AdminError> {
        let mut request = self.client.get(self.url("/dates"));
        if let Some(date) = date {
            request = request.query(&[("date", date.format("%Y-%m-%d").to_string())]);
        }
        let raw: Vec<String> = self.send(request).await?.json().await?;
        raw.iter().map(|value| parse_calendar_day(value)).collect()
    }

    async fn bookings(&self) -> Result<Vec<Booking>, AdminError> {
        self.get_json("/bookings").await
    }

    async fn booking(&self, id: BookingId) -> Result<Booking, AdminError> {
        self.get_json(&format!("/getBookingById/{id}")).await
    }

    async fn create_booking(&self, form: &BookingForm) -> Result<(), AdminError> {
        self.send(self.client.post(self.url("/createBooking")).json(form))
            .await?;
        Ok(())
    }

    async fn update_booking(&self, id: BookingId, form: &BookingForm) -> Result<(), AdminError> {
        self.send(
            self.client
                .patch(self.url(&format!("/updateBooking/{id}")))
                .json(form),
        )
        .await?;
        Ok(())
    }

    async fn delete_booking(&self, id: BookingId) -> Result<(), AdminError> {
        self.send(
            self.client
                .delete(self.url(&format!("/deleteBooking/{id}"))),
        )
        .await?;
        Ok(())
    }

    async fn send_booking_confirmation(
        &self,
        confirmation: &BookingConfirmation,
    ) -> Result<(), AdminError> {
        self.send(
            self.client
                .post(self.url("/sendBookingConfirmationEmail"))
                .json(confirmation),
        )
        .await?;
        Ok(())
    }

    async fn volunteers(&self) -> Result<Vec<Volunteer>, AdminError> {
        self.get_json("/volunteers").await
    }
}
