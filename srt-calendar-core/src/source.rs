//! Where reservations come from.
//!
//! A source only hands back raw reservations; normalization into trips is
//! shared by every source so live and fixture data go through the same path.

use std::future::Future;

use crate::error::SrtCalResult;
use crate::reservation::Reservation;
use crate::trip::Trip;

/// Anything that can list the reservations of an account.
pub trait ReservationSource {
    fn reservations(&self) -> impl Future<Output = SrtCalResult<Vec<Reservation>>> + Send;
}

/// Fetch every reservation from `source` and normalize it into a trip.
///
/// An account without reservations yields an empty list.
pub async fn fetch_trips<S: ReservationSource>(source: &S) -> SrtCalResult<Vec<Trip>> {
    let reservations = source.reservations().await?;

    if reservations.is_empty() {
        tracing::info!("No reservations found");
        return Ok(Vec::new());
    }

    tracing::debug!(count = reservations.len(), "normalizing reservations");

    reservations.iter().map(Trip::from_reservation).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SrtCalError;
    use crate::reservation::tests::make_reservation;

    struct StaticSource(Vec<Reservation>);

    impl ReservationSource for StaticSource {
        async fn reservations(&self) -> SrtCalResult<Vec<Reservation>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl ReservationSource for FailingSource {
        async fn reservations(&self) -> SrtCalResult<Vec<Reservation>> {
            Err(SrtCalError::Authentication("wrong password".into()))
        }
    }

    #[tokio::test]
    async fn test_empty_source_yields_no_trips() {
        let trips = fetch_trips(&StaticSource(vec![])).await.unwrap();
        assert!(trips.is_empty());
    }

    #[tokio::test]
    async fn test_trips_keep_source_order() {
        let mut second = make_reservation();
        second.reservation_number = Some("999".to_string());

        let trips = fetch_trips(&StaticSource(vec![make_reservation(), second]))
            .await
            .unwrap();

        assert_eq!(trips.len(), 2);
        assert_eq!(trips[1].booking_ref.as_deref(), Some("999"));
    }

    #[tokio::test]
    async fn test_source_errors_propagate() {
        let result = fetch_trips(&FailingSource).await;
        assert!(matches!(result, Err(SrtCalError::Authentication(_))));
    }
}
