use std::process::ExitCode;

use crate::{
    client::ApiClient, configuration::Configuration, configuration_handler::ConfigurationHandler,
    session::Session,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod availability;
mod backend;
mod calendar;
mod client;
mod commands;
mod configuration;
mod configuration_handler;
mod desk;
mod error;
mod export;
mod roster;
mod session;
#[cfg(test)]
mod testutils;
mod types;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let configuration = ConfigurationHandler::parse_arguments();

    let session = match Session::login(
        &configuration.admin_credentials(),
        &configuration.username,
        &configuration.password,
        configuration.display_name(),
    ) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    println!("{}", session.greeting());

    let client = match ApiClient::new(&configuration) {
        Ok(client) => client,
        Err(err) => {
            error!(?err, "Failed to build HTTP client");
            eprintln!("{err}");
            session.logout();
            return ExitCode::FAILURE;
        }
    };

    info!(user = session.display_name(), "Running command");
    let result = commands::run(configuration.command, &client).await;
    session.logout();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(?err, "Command failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
