//! Normalized trips: one reservation with real timestamps.

use chrono::{DateTime, Duration, FixedOffset};

use crate::error::{SrtCalError, SrtCalResult};
use crate::reservation::Reservation;

/// SRT reports all times in Korea Standard Time.
const SEOUL_OFFSET: &str = "+09:00";

/// A reservation normalized for calendar output.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub train_number: String,
    pub departure: DateTime<FixedOffset>,
    pub arrival: DateTime<FixedOffset>,
    pub from_station: String,
    pub to_station: String,
    pub seat: Option<String>,
    pub booking_ref: Option<String>,
    pub paid: Option<bool>,
}

impl Trip {
    pub fn from_reservation(reservation: &Reservation) -> SrtCalResult<Self> {
        let departure = parse_iso(&compose_iso(&reservation.dep_date, &reservation.dep_time)?)?;
        let mut arrival = parse_iso(&compose_iso(&reservation.dep_date, &reservation.arr_time)?)?;

        // Only the departure date is known; an arrival "before" departure is past midnight.
        if arrival < departure {
            tracing::debug!(
                train = %reservation.train_number,
                "arrival precedes departure, rolling arrival to the next day"
            );
            arrival += Duration::days(1);
        }

        Ok(Trip {
            train_number: reservation.train_number.clone(),
            departure,
            arrival,
            from_station: reservation.dep_station_name.clone(),
            to_station: reservation.arr_station_name.clone(),
            seat: reservation.seat_summary(),
            booking_ref: reservation.booking_ref().map(str::to_string),
            paid: reservation.paid,
        })
    }

    pub fn departure_iso(&self) -> String {
        self.departure.to_rfc3339()
    }

    pub fn arrival_iso(&self) -> String {
        self.arrival.to_rfc3339()
    }
}

/// Build `YYYY-MM-DDTHH:MM:SS+09:00` from a `YYYYMMDD` date and `HHMMSS` time.
pub fn compose_iso(date: &str, time: &str) -> SrtCalResult<String> {
    if !is_digits(date, 8) {
        return Err(SrtCalError::MalformedReservation(format!(
            "date '{date}' is not in YYYYMMDD format"
        )));
    }
    if !is_digits(time, 6) {
        return Err(SrtCalError::MalformedReservation(format!(
            "time '{time}' is not in HHMMSS format"
        )));
    }

    Ok(format!(
        "{}-{}-{}T{}:{}:{}{}",
        &date[..4],
        &date[4..6],
        &date[6..],
        &time[..2],
        &time[2..4],
        &time[4..],
        SEOUL_OFFSET
    ))
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_iso(iso: &str) -> SrtCalResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(iso)
        .map_err(|e| SrtCalError::MalformedReservation(format!("invalid timestamp '{iso}': {e}")))
}
