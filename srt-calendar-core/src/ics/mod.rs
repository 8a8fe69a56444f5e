//! Calendar events for trips, and the document that holds them.

mod generate;

use chrono::{DateTime, FixedOffset};

use crate::trip::Trip;

/// Title prefix for reservations that still have to be paid.
pub const UNPAID_MARKER: &str = "<예약>";

/// Domain appended to booking refs to form a stable UID.
pub const UID_DOMAIN: &str = "train-calendar";

/// How event titles and descriptions are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TitleStyle {
    /// `<예약>수서→부산: 3-12A`, with the train number in the description.
    #[default]
    Reservation,
    /// `SRT 381 수서→부산: 3-12A`, no payment marker.
    Train,
}

/// A single calendar event derived from a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    /// `None` lets the serializer pick a random UID.
    pub uid: Option<String>,
    pub summary: String,
    pub description: Option<String>,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl CalendarEvent {
    pub fn from_trip(trip: &Trip, style: TitleStyle) -> Self {
        CalendarEvent {
            uid: trip
                .booking_ref
                .as_ref()
                .map(|booking_ref| format!("{booking_ref}@{UID_DOMAIN}")),
            summary: title(trip, style),
            description: description(trip, style),
            start: trip.departure,
            end: trip.arrival,
        }
    }
}

fn title(trip: &Trip, style: TitleStyle) -> String {
    let route = format!(
        "{}→{}: {}",
        trip.from_station,
        trip.to_station,
        trip.seat.as_deref().unwrap_or("?")
    );

    match style {
        TitleStyle::Reservation if trip.paid.unwrap_or(false) => route,
        TitleStyle::Reservation => format!("{UNPAID_MARKER}{route}"),
        TitleStyle::Train => format!("SRT {} {}", short_train_number(&trip.train_number), route),
    }
}

fn description(trip: &Trip, style: TitleStyle) -> Option<String> {
    let mut lines = Vec::new();

    if style == TitleStyle::Reservation {
        let number = trip.train_number.trim_matches(|c| c == '0' || c == ' ');
        lines.push(format!("SRT {number}"));
    }
    if let Some(ref seat) = trip.seat {
        lines.push(format!("Seat: {seat}"));
    }
    if let Some(ref booking_ref) = trip.booking_ref {
        lines.push(format!("Booking ref: {booking_ref}"));
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// `" 00381 "` -> `"381"`
fn short_train_number(train_number: &str) -> &str {
    train_number.trim().trim_start_matches('0')
}

/// An in-memory calendar, ready to be rendered.
#[derive(Debug, Clone, Default)]
pub struct CalendarDocument {
    pub name: Option<String>,
    pub events: Vec<CalendarEvent>,
}

impl CalendarDocument {
    /// One event per trip, in input order. Trips sharing a booking ref are not merged.
    pub fn build(trips: &[Trip], style: TitleStyle) -> Self {
        let events = trips
            .iter()
            .map(|trip| {
                let event = CalendarEvent::from_trip(trip, style);
                tracing::debug!(title = %event.summary, "built event");
                event
            })
            .collect();

        CalendarDocument { name: None, events }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Serialize to iCalendar text.
    pub fn render(&self) -> String {
        generate::generate_ics(self)
    }
}
