use crate::availability::{month_view, Availability, AvailabilityChecker, DayStatus};
use crate::backend::BookingBackend;
use crate::calendar::{format_booking_date, next_month, previous_month, Month};
use crate::client::ApiClient;
use crate::desk::BookingDesk;
use crate::error::AdminError;
use crate::export::export_bookings;
use crate::roster::CrewRoster;
use crate::types::{
    Booking, BookingForm, BookingId, Fares, FileType, ImageId, NewsDraft, NewsId, NewsUpdate,
    VolunteerForm, VolunteerId,
};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Args, Subcommand};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;
use validator::Validate;

/// Which month a listing is about. Defaults to the current one.
#[derive(Debug, Clone, Args)]
pub struct MonthSelection {
    #[arg(long)]
    pub month: Option<Month>,
    #[arg(long)]
    pub year: Option<i32>,
    /// Step back one month from the selection
    #[arg(long, conflicts_with = "next")]
    pub previous: bool,
    /// Step forward one month from the selection
    #[arg(long)]
    pub next: bool,
}

impl MonthSelection {
    pub fn resolve(&self, today: NaiveDate) -> (Month, i32) {
        let month = self.month.unwrap_or_else(|| Month::of(today));
        let year = self.year.unwrap_or_else(|| today.year());
        if self.previous {
            previous_month(month, year)
        } else if self.next {
            next_month(month, year)
        } else {
            (month, year)
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check whether a date can still be booked
    Availability { date: NaiveDate },
    /// Show which days of a month are booked, free or out of season
    Calendar {
        #[command(flatten)]
        selection: MonthSelection,
    },
    /// List the bookings of a month
    Bookings {
        #[command(flatten)]
        selection: MonthSelection,
    },
    ShowBooking { id: BookingId },
    /// Create a booking from a JSON form
    CreateBooking {
        #[arg(long)]
        form: PathBuf,
    },
    EditBooking {
        id: BookingId,
        #[arg(long)]
        form: PathBuf,
    },
    DeleteBooking {
        id: BookingId,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Write the bookings of a month to a JSON file
    ExportBookings {
        #[command(flatten)]
        selection: MonthSelection,
        #[arg(long)]
        output: PathBuf,
        /// Leave out personal data that may not be shared
        #[arg(long)]
        gdpr: bool,
    },
    /// Mail the trip lists of a month to the crew
    EmailTripLists {
        #[command(flatten)]
        selection: MonthSelection,
    },
    Volunteers,
    /// Show who can fill each crew slot
    ShowVolunteer { id: VolunteerId },
    Roster,
    AddVolunteer {
        #[arg(long)]
        form: PathBuf,
    },
    EditVolunteer {
        id: VolunteerId,
        #[arg(long)]
        form: PathBuf,
    },
    DeleteVolunteer {
        id: VolunteerId,
        #[arg(long)]
        yes: bool,
    },
    News,
    ShowNews { id: NewsId },
    AddNews {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    EditNews {
        id: NewsId,
        #[arg(long)]
        form: PathBuf,
    },
    DeleteNews {
        id: NewsId,
        #[arg(long)]
        yes: bool,
    },
    Gallery,
    AddGalleryImage { file: PathBuf },
    DeleteGalleryImage {
        id: ImageId,
        #[arg(long)]
        yes: bool,
    },
    Prices,
    UpdatePrices {
        id: u64,
        #[arg(long)]
        trip1: f64,
        #[arg(long)]
        trip2: f64,
        #[arg(long)]
        trip3: f64,
        #[arg(long)]
        trip4: f64,
        #[arg(long)]
        trip5: f64,
        #[arg(long)]
        trip6: f64,
    },
    /// Upload a document for the public site
    Upload {
        #[arg(value_enum)]
        file_type: FileType,
        file: PathBuf,
    },
}

async fn read_form<T: DeserializeOwned>(path: &Path) -> Result<T, AdminError> {
    let contents = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&contents)?)
}

fn confirmed(what: String, yes: bool) -> Result<(), AdminError> {
    if yes {
        Ok(())
    } else {
        Err(AdminError::NotConfirmed(what))
    }
}

fn booking_line(booking: &Booking) -> String {
    let details = &booking.details;
    format!(
        "#{:<5} {:<16} {} {} ({}) {} passengers, {} wheelchair, {} | skipper: {}",
        booking.id,
        format_booking_date(details.booking_date),
        details.first_name,
        details.surname,
        details.group_name.as_deref().unwrap_or("-"),
        details.total_passengers,
        details.wheelchair_users,
        details.destination,
        details.skipper.as_deref().unwrap_or("unassigned"),
    )
}

pub async fn run(command: Command, client: &ApiClient) -> Result<(), AdminError> {
    let today = Local::now().date_naive();
    let desk = BookingDesk::new(client.clone());

    match command {
        Command::Availability { date } => {
            let checker = AvailabilityChecker::new(client.clone());
            match checker.check(date).await? {
                Availability::Available => println!("{date} is available"),
                Availability::InPast => println!("{date} is not in the future"),
                Availability::AlreadyBooked => println!("{date} is already booked"),
            }
        }
        Command::Calendar { selection } => {
            let (month, year) = selection.resolve(today);
            let booked = client.booked_dates(None).await?;
            let view = month_view(month, year, &booked)?;
            println!("{month} {year}");
            for (day, status) in &view {
                println!("{} {}", day.format("%a %d"), status.label());
            }
            let free = view
                .iter()
                .filter(|(_, status)| *status == DayStatus::Free)
                .count();
            println!("{free} days available");
        }
        Command::Bookings { selection } => {
            let (month, year) = selection.resolve(today);
            let bookings = desk.month(month, year).await?;
            println!("{month} {year}: {} bookings", bookings.len());
            for booking in &bookings {
                println!("{}", booking_line(booking));
            }
        }
        Command::ShowBooking { id } => {
            let booking = desk.backend().booking(id).await?;
            println!("{}", serde_json::to_string_pretty(&booking)?);
        }
        Command::CreateBooking { form } => {
            let form: BookingForm = read_form(&form).await?;
            let created = desk.create(&form).await?;
            println!("{}", created.summary);
            if !created.confirmation_sent {
                println!("The confirmation email could not be sent.");
            }
        }
        Command::EditBooking { id, form } => {
            let form: BookingForm = read_form(&form).await?;
            desk.edit(id, &form).await?;
            println!("Booking {id} updated");
        }
        Command::DeleteBooking { id, yes } => {
            desk.delete(id, yes).await?;
            println!("Booking {id} deleted");
        }
        Command::ExportBookings {
            selection,
            output,
            gdpr,
        } => {
            let (month, year) = selection.resolve(today);
            let bookings = desk.month(month, year).await?;
            let rows = export_bookings(&bookings, &output, gdpr).await?;
            println!("Exported {rows} bookings to {}", output.display());
        }
        Command::EmailTripLists { selection } => {
            let (month, year) = selection.resolve(today);
            let (bookings, volunteers) =
                futures::try_join!(desk.month(month, year), client.volunteers())?;
            client.send_trip_lists(&bookings, month, &volunteers).await?;
            info!(%month, year, bookings = bookings.len(), "Trip lists sent");
            println!("Trip lists for {month} {year} sent");
        }
        Command::Volunteers => {
            for volunteer in client.volunteers().await? {
                println!(
                    "#{:<5} {:<24} {:<12} {} {}",
                    volunteer.id,
                    volunteer.display_name(),
                    volunteer.details.role,
                    volunteer.details.contact_number,
                    volunteer.details.email_address,
                );
            }
        }
        Command::ShowVolunteer { id } => {
            let volunteer = client.volunteer(id).await?;
            println!("{}", serde_json::to_string_pretty(&volunteer)?);
        }
        Command::Roster => {
            let roster = CrewRoster::from_volunteers(&client.volunteers().await?);
            println!("Skippers:    {}", roster.skippers.join(", "));
            println!("Crew 1:      {}", roster.crew1.join(", "));
            println!("Crew 2:      {}", roster.crew2.join(", "));
            println!("Admin/other: {}", roster.admin_other.join(", "));
            if !roster.unassigned.is_empty() {
                println!("Unassigned:  {}", roster.unassigned.join(", "));
            }
        }
        Command::AddVolunteer { form } => {
            let form: VolunteerForm = read_form(&form).await?;
            form.validate()?;
            client.add_volunteer(&form).await?;
            println!("Volunteer {} {} added", form.first_name, form.surname);
        }
        Command::EditVolunteer { id, form } => {
            let form: VolunteerForm = read_form(&form).await?;
            form.validate()?;
            client.update_volunteer(id, &form).await?;
            println!("Volunteer {id} updated");
        }
        Command::DeleteVolunteer { id, yes } => {
            confirmed(format!("volunteer {id}"), yes)?;
            client.delete_volunteer(id).await?;
            println!("Volunteer {id} deleted");
        }
        Command::News => {
            for item in client.news().await? {
                println!(
                    "#{:<5} {} {} {}",
                    item.id,
                    item.date,
                    item.title,
                    item.web_path().unwrap_or_default()
                );
            }
        }
        Command::ShowNews { id } => {
            let item = client.news_item(id).await?;
            println!("{}", serde_json::to_string_pretty(&item)?);
            if let Some(path) = item.web_path() {
                println!("Image served from {path}");
            }
        }
        Command::AddNews {
            title,
            content,
            image,
        } => {
            let draft = NewsDraft {
                title,
                content,
                image,
            };
            draft.validate()?;
            client.add_news(&draft).await?;
            println!("News item \"{}\" published", draft.title);
        }
        Command::EditNews { id, form } => {
            let update: NewsUpdate = read_form(&form).await?;
            update.validate()?;
            client.update_news(id, &update).await?;
            println!("News item {id} updated");
        }
        Command::DeleteNews { id, yes } => {
            confirmed(format!("news item {id}"), yes)?;
            client.delete_news(id).await?;
            println!("News item {id} deleted");
        }
        Command::Gallery => {
            for image in client.gallery_images().await? {
                println!("#{:<5} {}", image.id, image.file_path);
            }
        }
        Command::AddGalleryImage { file } => {
            client.add_gallery_image(&file).await?;
            println!("Uploaded {}", file.display());
        }
        Command::DeleteGalleryImage { id, yes } => {
            confirmed(format!("gallery image {id}"), yes)?;
            client.delete_gallery_image(id).await?;
            println!("Gallery image {id} deleted");
        }
        Command::Prices => {
            for prices in client.prices().await? {
                let fares = prices.fares;
                println!(
                    "#{} trip1 {:.2} trip2 {:.2} trip3 {:.2} trip4 {:.2} trip5 {:.2} trip6 {:.2}",
                    prices.id,
                    fares.trip1,
                    fares.trip2,
                    fares.trip3,
                    fares.trip4,
                    fares.trip5,
                    fares.trip6
                );
            }
        }
        Command::UpdatePrices {
            id,
            trip1,
            trip2,
            trip3,
            trip4,
            trip5,
            trip6,
        } => {
            let fares = Fares {
                trip1,
                trip2,
                trip3,
                trip4,
                trip5,
                trip6,
            };
            fares.validate()?;
            client.update_prices(id, &fares).await?;
            println!("Prices {id} updated");
        }
        Command::Upload { file_type, file } => {
            client.upload_file(file_type, &file).await?;
            println!("Uploaded {} as {}", file.display(), file_type.as_str());
        }
    }
    Ok(())
}
