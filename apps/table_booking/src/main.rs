use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{load_settings_from, DEFAULT_SETTINGS_FILE},
    BookingFormController, ClientSettings, FormPhase, SubmitOutcome,
};
use shared::domain::FormSnapshot;
use tokio::io::{stdin, BufReader};
use tracing_subscriber::EnvFilter;

mod form;
mod terminal;

use form::FormSession;
use terminal::{render_field_errors, render_slots, TerminalNotifier};

#[derive(Parser, Debug)]
#[command(name = "table-booking", about = "Book a restaurant table")]
struct Cli {
    /// Backend base URL; overrides the settings file and environment.
    #[arg(long)]
    api_url: Option<String>,
    /// Settings file; `booking.toml` in the working directory when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the bookable times for a date.
    Times {
        #[arg(long)]
        date: String,
    },
    /// Submit a booking in one go.
    Book {
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
        #[arg(long)]
        guests: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        contact: String,
    },
    /// Fill in the booking form interactively.
    Form,
}

fn resolve_settings(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> Result<ClientSettings> {
    let settings = match (&cli.api_url, &cli.config) {
        (Some(url), _) => ClientSettings::with_api_base(url.as_str()),
        (None, Some(path)) => load_settings_from(path, env),
        (None, None) => load_settings_from(Path::new(DEFAULT_SETTINGS_FILE), env),
    };
    settings.context("failed to resolve booking api settings")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let settings = resolve_settings(&cli, |key| std::env::var(key).ok())?;
    tracing::debug!(api_base = %settings.api_base, "settings resolved");

    let controller = BookingFormController::new(&settings, Arc::new(TerminalNotifier));

    match cli.command {
        Command::Times { date } => {
            if controller.select_date(&date).await.is_none() {
                bail!("'{date}' is not a date in YYYY-MM-DD form");
            }
            let state = controller.state().await;
            if state.phase == FormPhase::TimesError {
                bail!("could not load available times for {date}");
            }
            println!("{}", render_slots(&state));
        }
        Command::Book {
            date,
            time,
            guests,
            name,
            contact,
        } => {
            controller.select_date(&date).await;
            let snapshot = FormSnapshot {
                date,
                time,
                guests,
                name,
                contact,
            };
            match controller.handle_submit(snapshot).await {
                SubmitOutcome::Booked(_) => {}
                SubmitOutcome::Invalid(errors) => {
                    eprintln!("{}", render_field_errors(&errors));
                    bail!("booking not submitted: {errors}");
                }
                SubmitOutcome::Failed { message } => bail!("booking rejected: {message}"),
            }
        }
        Command::Form => {
            println!("Restaurant Table Booking");
            let mut session = FormSession::new(&controller, BufReader::new(stdin()));
            let mut out = std::io::stdout();
            if session.run(&mut out).await?.is_none() {
                println!();
                println!("No booking made.");
            }
        }
    }

    Ok(())
}
