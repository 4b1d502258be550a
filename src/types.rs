//! Records exchanged with the booking service together with the rule set
//! that every create and edit flow validates them against.

use crate::calendar::calendar_day;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

pub type BookingId = u64;
pub type VolunteerId = u64;
pub type NewsId = u64;
pub type ImageId = u64;

/// A booking as entered by staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BookingForm {
    #[validate(length(min = 1, message = "You must enter a first name"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "You must enter a surname"))]
    pub surname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[validate(length(min = 1, message = "You must enter a contact number"))]
    pub contact_number: String,
    #[validate(length(min = 1, message = "You must enter an email address"))]
    pub email_address: String,
    #[validate(length(min = 1, message = "You must enter a house number"))]
    pub house_number: String,
    #[validate(length(min = 1, message = "You must enter a street name"))]
    pub street_name: String,
    #[validate(length(min = 1, message = "You must enter a city"))]
    pub city: String,
    #[validate(length(min = 1, message = "You must enter a postcode"))]
    pub postcode: String,
    #[serde(deserialize_with = "calendar_day")]
    pub booking_date: NaiveDate,
    #[validate(range(min = 1, max = 12, message = "Maximum of 12 passengers per booking"))]
    pub total_passengers: u32,
    #[validate(range(max = 2, message = "Maximum of 2 wheelchair users per booking"))]
    pub wheelchair_users: u32,
    #[serde(deserialize_with = "flag")]
    pub smoking: bool,
    #[validate(length(min = 1, message = "Please select a destination"))]
    pub destination: String,
    #[validate(length(min = 1, message = "Please select a lunch option"))]
    pub lunch_arrangements: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(deserialize_with = "flag")]
    #[validate(custom(function = accepted, message = "Please accept the terms and conditions"))]
    pub terms_and_conditions: bool,
    #[serde(deserialize_with = "flag")]
    #[validate(custom(function = accepted, message = "Please accept the group leader policy"))]
    pub group_leader_policy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skipper: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew2: Option<String>,
}

/// A booking as stored by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    #[serde(flatten)]
    pub details: BookingForm,
    #[serde(default)]
    pub paid: Option<f64>,
    #[serde(default, deserialize_with = "flag")]
    pub complete: bool,
    #[serde(default)]
    pub bookingmonth: Option<String>,
}

/// Customer facing subset of a booking sent to the confirmation mailer.
/// Crew assignments are internal and stay out of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub email_address: String,
    pub first_name: String,
    pub surname: String,
    pub group_name: Option<String>,
    pub contact_number: String,
    pub house_number: String,
    pub street_name: String,
    pub city: String,
    pub postcode: String,
    pub booking_date: NaiveDate,
    pub total_passengers: u32,
    pub wheelchair_users: u32,
    pub smoking: bool,
    pub destination: String,
    pub lunch_arrangements: String,
    pub notes: Option<String>,
    pub terms_and_conditions: bool,
    pub group_leader_policy: bool,
}

impl From<&BookingForm> for BookingConfirmation {
    fn from(form: &BookingForm) -> Self {
        Self {
            email_address: form.email_address.clone(),
            first_name: form.first_name.clone(),
            surname: form.surname.clone(),
            group_name: form.group_name.clone(),
            contact_number: form.contact_number.clone(),
            house_number: form.house_number.clone(),
            street_name: form.street_name.clone(),
            city: form.city.clone(),
            postcode: form.postcode.clone(),
            booking_date: form.booking_date,
            total_passengers: form.total_passengers,
            wheelchair_users: form.wheelchair_users,
            smoking: form.smoking,
            destination: form.destination.clone(),
            lunch_arrangements: form.lunch_arrangements.clone(),
            notes: form.notes.clone(),
            terms_and_conditions: form.terms_and_conditions,
            group_leader_policy: form.group_leader_policy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct VolunteerForm {
    #[validate(length(min = 1, message = "You must enter a first name"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "You must enter a surname"))]
    pub surname: String,
    #[validate(length(min = 1, message = "You must enter a contact number"))]
    pub contact_number: String,
    #[validate(length(min = 1, message = "You must enter an email address"))]
    pub email_address: String,
    #[validate(length(min = 1, message = "You must enter a house number"))]
    pub house_number: String,
    #[validate(length(min = 1, message = "You must enter a street name"))]
    pub street_name: String,
    #[validate(length(min = 1, message = "You must enter a city"))]
    pub city: String,
    #[validate(length(min = 1, message = "You must enter a postcode"))]
    pub postcode: String,
    #[validate(length(
        min = 1,
        message = "Please let us know what role the volunteer does"
    ))]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: VolunteerId,
    #[serde(flatten)]
    pub details: VolunteerForm,
}

impl Volunteer {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.details.first_name, self.details.surname)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: NewsId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_path: Option<String>,
    pub date: String,
}

impl NewsItem {
    pub fn web_path(&self) -> Option<String> {
        self.image_path.as_deref().map(to_web_path)
    }
}

/// Maps the path the server stored an upload under to the path it is
/// served from.
pub fn to_web_path(internal_path: &str) -> String {
    internal_path
        .strip_prefix("/var/www")
        .unwrap_or(internal_path)
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewsUpdate {
    #[validate(length(min = 1, message = "You must enter a title"))]
    pub title: String,
    #[validate(length(min = 1, message = "You must enter some content"))]
    pub content: String,
    #[serde(default)]
    pub image_path: String,
    #[serde(deserialize_with = "calendar_day")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewsDraft {
    #[validate(length(min = 1, message = "You must enter a title"))]
    pub title: String,
    #[validate(length(min = 1, message = "You must enter some content"))]
    pub content: String,
    pub image: Option<std::path::PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: ImageId,
    pub file_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Fares {
    #[validate(range(min = 0.0, message = "Trip prices cannot be negative"))]
    pub trip1: f64,
    #[validate(range(min = 0.0, message = "Trip prices cannot be negative"))]
    pub trip2: f64,
    #[validate(range(min = 0.0, message = "Trip prices cannot be negative"))]
    pub trip3: f64,
    #[validate(range(min = 0.0, message = "Trip prices cannot be negative"))]
    pub trip4: f64,
    #[validate(range(min = 0.0, message = "Trip prices cannot be negative"))]
    pub trip5: f64,
    #[validate(range(min = 0.0, message = "Trip prices cannot be negative"))]
    pub trip6: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripPrices {
    pub id: u64,
    #[serde(flatten)]
    pub fares: Fares,
}

/// Discriminator the upload endpoint files documents under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum FileType {
    #[serde(rename = "galleryImages")]
    GalleryImages,
    #[serde(rename = "TCs")]
    TermsAndConditions,
    #[serde(rename = "boatBrochure")]
    BoatBrochure,
    #[serde(rename = "groupLeaderPolicy")]
    GroupLeaderPolicy,
    #[serde(rename = "riskAssessments")]
    RiskAssessments,
    #[serde(rename = "HagPoster")]
    HagPoster,
    #[serde(rename = "bookingConditions")]
    BookingConditions,
    #[serde(rename = "insuranceCertificate")]
    InsuranceCertificate,
}

impl FileType {
    pub fn as_str(self) -> &'static str {
        match self {
            FileType::GalleryImages => "galleryImages",
            FileType::TermsAndConditions => "TCs",
            FileType::BoatBrochure => "boatBrochure",
            FileType::GroupLeaderPolicy => "groupLeaderPolicy",
            FileType::RiskAssessments => "riskAssessments",
            FileType::HagPoster => "HagPoster",
            FileType::BookingConditions => "bookingConditions",
            FileType::InsuranceCertificate => "insuranceCertificate",
        }
    }
}

fn accepted(value: &bool) -> Result<(), ValidationError> {
    if *value {
        Ok(())
    } else {
        Err(ValidationError::new("accepted"))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagValue {
    Bool(bool),
    Number(i64),
    Text(String),
}

/// The service stores flags in a mix of booleans, 0/1 integers and strings.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match FlagValue::deserialize(deserializer)? {
        FlagValue::Bool(value) => Ok(value),
        FlagValue::Number(value) => Ok(value != 0),
        FlagValue::Text(value) => match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected a yes/no flag, got {other:?}"
            ))),
        },
    }
}
