use crate::error::AdminError;
use chrono::{DateTime, Local, Timelike};
use tracing::{info, warn};

/// The admin account the dashboard accepts.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

/// A signed-in staff member. Only obtainable through [`Session::login`] and
/// ended by [`Session::logout`], which consumes it.
#[derive(Debug)]
pub struct Session {
    display_name: String,
    started_at: DateTime<Local>,
}

impl Session {
    pub fn login(
        expected: &Credentials,
        username: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<Self, AdminError> {
        let password_matches = expected
            .password
            .as_deref()
            .is_some_and(|expected_password| expected_password == password);

        if username != expected.username || !password_matches {
            warn!(username, "Rejected login");
            return Err(AdminError::InvalidCredentials);
        }

        let display_name = display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| username.to_string());
        info!(%display_name, "Signed in");
        Ok(Self {
            display_name,
            started_at: Local::now(),
        })
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn greeting(&self) -> String {
        greeting(&self.display_name, self.started_at.hour())
    }

    pub fn logout(self) {
        let duration = Local::now() - self.started_at;
        info!(
            display_name = %self.display_name,
            seconds = duration.num_seconds(),
            "Signed out"
        );
    }
}

pub fn greeting(name: &str, hour: u32) -> String {
    match hour {
        0..=3 => format!("You're up early, {name}. Hope you have a great day!"),
        4..=7 => format!("Good Morning, {name}. Have a great day!"),
        8..=17 => format!("Good Afternoon, {name}. Hope you're having a good day!"),
        18..=21 => format!("Good Evening, {name}. Hope you're having a good night!"),
        _ => format!("You're up late, {name}. Can't sleep?"),
    }
}
