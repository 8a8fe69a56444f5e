//! Raw reservation records, as returned by SRT or stored in a fixture.

use serde::{Deserialize, Serialize};

/// One booked journey in the SRT account.
///
/// Dates use `YYYYMMDD` and times `HHMMSS`, exactly as SRT reports them.
/// The arrival has no date of its own: SRT only reports the departure date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default)]
    pub reservation_number: Option<String>,
    #[serde(default)]
    pub total_cost: Option<u32>,
    #[serde(default)]
    pub seat_count: Option<u32>,
    #[serde(default)]
    pub train_code: Option<String>,
    #[serde(default)]
    pub train_name: Option<String>,
    pub train_number: String,
    pub dep_date: String,
    pub dep_time: String,
    #[serde(default)]
    pub dep_station_code: Option<String>,
    pub dep_station_name: String,
    pub arr_time: String,
    #[serde(default)]
    pub arr_station_code: Option<String>,
    pub arr_station_name: String,
    /// Deadline for paying an unpaid reservation.
    #[serde(default)]
    pub payment_date: Option<String>,
    #[serde(default)]
    pub payment_time: Option<String>,
    #[serde(default)]
    pub paid: Option<bool>,
    #[serde(default, alias = "_tickets")]
    pub tickets: Vec<Ticket>,
}

/// A single passenger ticket within a reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub car: String,
    /// Empty or missing for standing tickets.
    #[serde(default)]
    pub seat: Option<String>,
    #[serde(default)]
    pub seat_type_code: Option<String>,
    #[serde(default)]
    pub passenger_type_code: Option<String>,
    #[serde(default)]
    pub price: Option<u32>,
    #[serde(default)]
    pub original_price: Option<u32>,
    #[serde(default)]
    pub discount: Option<u32>,
}

impl Ticket {
    /// `"<car>-<seat>"`, or `None` when no seat is assigned.
    pub fn seat_label(&self) -> Option<String> {
        match self.seat.as_deref() {
            Some(seat) if !seat.is_empty() => Some(format!("{}-{}", self.car, seat)),
            _ => None,
        }
    }
}

impl Reservation {
    /// Comma-joined seat labels of every seated ticket.
    pub fn seat_summary(&self) -> Option<String> {
        let seats: Vec<String> = self.tickets.iter().filter_map(Ticket::seat_label).collect();

        if seats.is_empty() {
            None
        } else {
            Some(seats.join(", "))
        }
    }

    pub fn booking_ref(&self) -> Option<&str> {
        self.reservation_number
            .as_deref()
            .filter(|number| !number.is_empty())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn make_reservation() -> Reservation {
        Reservation {
            reservation_number: Some("320240115001234".to_string()),
            total_cost: Some(52600),
            seat_count: Some(2),
            train_code: Some("17".to_string()),
            train_name: Some("SRT".to_string()),
            train_number: "00381".to_string(),
            dep_date: "20240115".to_string(),
            dep_time: "093000".to_string(),
            dep_station_code: Some("0551".to_string()),
            dep_station_name: "수서".to_string(),
            arr_time: "115500".to_string(),
            arr_station_code: Some("0020".to_string()),
            arr_station_name: "부산".to_string(),
            payment_date: Some("20240110".to_string()),
            payment_time: Some("235900".to_string()),
            paid: Some(true),
            tickets: vec![make_ticket("3", Some("12A")), make_ticket("3", Some("12B"))],
        }
    }

    pub fn make_ticket(car: &str, seat: Option<&str>) -> Ticket {
        Ticket {
            car: car.to_string(),
            seat: seat.map(str::to_string),
            seat_type_code: Some("1".to_string()),
            passenger_type_code: Some("1".to_string()),
            price: Some(26300),
            original_price: Some(26300),
            discount: Some(0),
        }
    }

    #[test]
    fn test_seat_summary_joins_with_comma_and_space() {
        let reservation = make_reservation();
        assert_eq!(reservation.seat_summary().as_deref(), Some("3-12A, 3-12B"));
    }

    #[test]
    fn test_seat_summary_skips_seatless_tickets() {
        let mut reservation = make_reservation();
        reservation.tickets = vec![
            make_ticket("3", Some("12A")),
            make_ticket("4", None),
            make_ticket("5", Some("")),
            make_ticket("6", Some("1D")),
        ];

        assert_eq!(reservation.seat_summary().as_deref(), Some("3-12A, 6-1D"));
    }

    #[test]
    fn test_seat_summary_none_without_seats() {
        let mut reservation = make_reservation();
        reservation.tickets = vec![make_ticket("4", None)];
        assert_eq!(reservation.seat_summary(), None);

        reservation.tickets.clear();
        assert_eq!(reservation.seat_summary(), None);
    }

    #[test]
    fn test_empty_reservation_number_is_no_booking_ref() {
        let mut reservation = make_reservation();
        reservation.reservation_number = Some(String::new());
        assert_eq!(reservation.booking_ref(), None);
    }

    #[test]
    fn test_deserialize_accepts_underscore_tickets() {
        let json = r#"{
            "train_number": "00381",
            "dep_date": "20240115",
            "dep_time": "093000",
            "dep_station_name": "수서",
            "arr_time": "115500",
            "arr_station_name": "부산",
            "_tickets": [{"car": "3", "seat": "12A"}, {"car": "3", "seat": ""}]
        }"#;

        let reservation: Reservation = serde_json::from_str(json).unwrap();
        assert_eq!(reservation.tickets.len(), 2);
        assert_eq!(reservation.paid, None);
        assert_eq!(reservation.seat_summary().as_deref(), Some("3-12A"));
    }
}
