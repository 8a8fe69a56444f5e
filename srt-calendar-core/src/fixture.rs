//! Static reservation fixtures for debugging without an SRT login.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{SrtCalError, SrtCalResult};
use crate::reservation::Reservation;
use crate::source::ReservationSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureFormat {
    Json,
    Toml,
}

impl FixtureFormat {
    /// Guess the format from the file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => FixtureFormat::Toml,
            _ => FixtureFormat::Json,
        }
    }
}

/// Accepted fixture layouts: a bare JSON array, or a `reservations` list.
#[derive(Deserialize)]
#[serde(untagged)]
enum FixtureDocument {
    List(Vec<Reservation>),
    Table { reservations: Vec<Reservation> },
}

impl FixtureDocument {
    fn into_reservations(self) -> Vec<Reservation> {
        match self {
            FixtureDocument::List(reservations) => reservations,
            FixtureDocument::Table { reservations } => reservations,
        }
    }
}

/// Reads reservations from a local file instead of SRT.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    path: PathBuf,
    format: FixtureFormat,
}

impl FixtureSource {
    pub fn new(path: impl Into<PathBuf>, format: Option<FixtureFormat>) -> Self {
        let path = path.into();
        let format = format.unwrap_or_else(|| FixtureFormat::from_path(&path));
        FixtureSource { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> SrtCalResult<Vec<Reservation>> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| self.malformed(e))?;

        let doc: FixtureDocument = match self.format {
            FixtureFormat::Json => serde_json::from_str(&contents).map_err(|e| self.malformed(e))?,
            FixtureFormat::Toml => toml::from_str(&contents).map_err(|e| self.malformed(e))?,
        };

        Ok(doc.into_reservations())
    }

    fn malformed(&self, reason: impl ToString) -> SrtCalError {
        SrtCalError::MalformedFixture {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl ReservationSource for FixtureSource {
    async fn reservations(&self) -> SrtCalResult<Vec<Reservation>> {
        tracing::info!(path = %self.path.display(), "Debug mode: using static data");
        self.load()
    }
}
