//! Core types for srt-calendar.
//!
//! This crate turns SRT train reservations into calendar events:
//! - `reservation` holds the raw record shape returned by SRT (or a fixture)
//! - `trip` normalizes a reservation into timestamps and display fields
//! - `source` fetches reservations, live or from a fixture file
//! - `ics` builds and renders the calendar document

pub mod error;
pub mod fixture;
pub mod ics;
pub mod reservation;
pub mod source;
pub mod srt;
pub mod trip;

pub use error::{SrtCalError, SrtCalResult};
pub use fixture::{FixtureFormat, FixtureSource};
pub use ics::{CalendarDocument, CalendarEvent, TitleStyle};
pub use reservation::{Reservation, Ticket};
pub use source::{ReservationSource, fetch_trips};
pub use srt::{Credentials, SrtOptions, SrtSource};
pub use trip::Trip;
