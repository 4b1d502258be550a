use crate::commands::Command;
use crate::configuration::Configuration;
use crate::session::Credentials;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Parser)]
#[command(name = "canal_admin")]
#[command(about = "Admin tooling for the canal boat trip booking service")]
pub struct ConfigurationHandler {
    /// Base URL of the booking service
    #[arg(long, env = "CANAL_API_URL", default_value = "https://adejord.co.uk")]
    api_url: String,

    #[arg(long, env = "CANAL_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    request_timeout_secs: u64,

    /// Uploads get longer, images and PDFs can be large
    #[arg(long, env = "CANAL_UPLOAD_TIMEOUT_SECS", default_value_t = 120)]
    upload_timeout_secs: u64,

    #[arg(long, env = "CANAL_ADMIN_USERNAME", default_value = "admin")]
    admin_username: String,

    #[arg(long, env = "CANAL_ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,

    /// Username to sign in with
    #[arg(long, env = "CANAL_USERNAME")]
    pub username: String,

    /// Password to sign in with
    #[arg(long, env = "CANAL_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Name to greet the signed in user with
    #[arg(long, env = "CANAL_DISPLAY_NAME")]
    name: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        loaded_env_file(dotenvy::dotenv());
        Self::parse()
    }

    #[cfg(test)]
    pub fn for_api(api_url: &str) -> Self {
        Self::parse_from([
            "canal_admin",
            "--api-url",
            api_url,
            "--request-timeout-secs",
            "5",
            "--admin-password",
            "password123",
            "--username",
            "admin",
            "--password",
            "password123",
            "prices",
        ])
    }
}

/// A missing `.env` is normal; anything else is worth a warning.
fn loaded_env_file(result: Result<PathBuf, dotenvy::Error>) -> Option<PathBuf> {
    match result {
        Ok(path) => Some(path),
        Err(err) if err.not_found() => None,
        Err(err) => {
            warn!(?err, "Ignoring unreadable .env file");
            None
        }
    }
}

impl Configuration for ConfigurationHandler {
    fn api_url(&self) -> String {
        self.api_url.clone()
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }

    fn admin_credentials(&self) -> Credentials {
        Credentials {
            username: self.admin_username.clone(),
            password: self.admin_password.clone(),
        }
    }

    fn display_name(&self) -> Option<String> {
        self.name.clone()
    }
}
