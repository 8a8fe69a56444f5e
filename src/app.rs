//! Fetch reservations, build the calendar and write it out.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use srt_calendar_core::{
    CalendarDocument, Credentials, FixtureSource, Reservation, ReservationSource, SrtCalResult,
    SrtOptions, SrtSource, fetch_trips,
};

use crate::cli::Cli;
use crate::config;

/// The reservation source picked from the command line.
pub enum Source {
    Live(SrtSource),
    Fixture(FixtureSource),
}

impl ReservationSource for Source {
    async fn reservations(&self) -> SrtCalResult<Vec<Reservation>> {
        match self {
            Source::Live(srt) => srt.reservations().await,
            Source::Fixture(fixture) => fixture.reservations().await,
        }
    }
}

/// `--debug` reads the fixture; otherwise log in to SRT.
pub fn select_source(cli: &Cli, credentials: Credentials) -> Source {
    if cli.debug {
        Source::Fixture(FixtureSource::new(
            &cli.fixture,
            cli.fixture_format.map(Into::into),
        ))
    } else {
        let options = SrtOptions {
            timeout: cli.request_timeout(),
            paid_only: cli.paid_only,
            ..SrtOptions::default()
        };
        Source::Live(SrtSource::new(credentials, options))
    }
}

#[derive(Debug)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub events: usize,
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wrote {} with {} events.", self.path.display(), self.events)
    }
}

/// Run one export: credentials first, then the source, then the file.
pub async fn run<S, L, F>(cli: &Cli, lookup: L, connect: F) -> Result<ExportSummary>
where
    S: ReservationSource,
    L: Fn(&str) -> Option<String>,
    F: FnOnce(&Cli, Credentials) -> S,
{
    let credentials = config::credentials_from(lookup)?;

    if cli.token.is_some() {
        tracing::debug!("--token is only used by the publish step, ignoring it");
    }

    let source = connect(cli, credentials);
    export(&source, cli).await
}

pub async fn export<S: ReservationSource>(source: &S, cli: &Cli) -> Result<ExportSummary> {
    let trips = fetch_trips(source)
        .await
        .context("Failed to fetch reservations")?;

    let mut doc = CalendarDocument::build(&trips, cli.title_style.into());
    if let Some(ref name) = cli.calendar_name {
        doc = doc.with_name(name);
    }

    std::fs::write(&cli.out, doc.render())
        .with_context(|| format!("Failed to write calendar to {}", cli.out.display()))?;

    Ok(ExportSummary {
        path: cli.out.clone(),
        events: doc.len(),
    })
}
