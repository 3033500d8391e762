//! # Reservation Commands
//!
//! ## Booking Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Reservation Submission                               │
//! │                                                                         │
//! │  ReservationRequest                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_request(catalog, schedule, request, today)   (salon-core)    │
//! │       │  Err ──► VALIDATION_ERROR, nothing written                     │
//! │       ▼                                                                 │
//! │  commit_booking(validated)                             (salon-db)      │
//! │       │  lock (provider, date) → re-check → guarded INSERT             │
//! │       │  Err ──► CONFLICT, nothing written                             │
//! │       ▼                                                                 │
//! │  Reservation { status: confirmed, price/duration frozen }              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::commands::availability::get_available_slots;
use crate::error::ApiError;
use crate::state::{BookingFlow, ConfigState, DbState};
use salon_core::booking::validate_request;
use salon_core::schedule::parse_hhmm;
use salon_core::{Reservation, ReservationFilter, ReservationRequest};

/// Contact details and choices for a one-shot booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInput {
    pub service: String,
    pub provider: String,
    pub date: NaiveDate,
    #[serde(with = "salon_core::schedule::hhmm")]
    pub time: NaiveTime,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: Option<String>,
}

/// Submits a reservation request, using the local date as "today".
pub async fn create_reservation(
    db: &DbState,
    config: &ConfigState,
    request: &ReservationRequest,
) -> Result<Reservation, ApiError> {
    create_reservation_at(db, config, request, Local::now().date_naive()).await
}

/// Submits a reservation request relative to an explicit `today`.
pub async fn create_reservation_at(
    db: &DbState,
    config: &ConfigState,
    request: &ReservationRequest,
    today: NaiveDate,
) -> Result<Reservation, ApiError> {
    debug!(
        service = %request.service_name,
        provider = %request.provider_name,
        date = ?request.date,
        "create_reservation command"
    );

    let booking = validate_request(&config.catalog, &config.schedule, request, today)?;
    let reservation = db.inner().reservations().commit_booking(booking).await?;

    Ok(reservation)
}

/// Walks the booking wizard end to end for one request.
///
/// Each step is checked as a client would see it: the time must be one of
/// the slots currently offered for the chosen service.
pub async fn book_at(
    db: &DbState,
    config: &ConfigState,
    input: &BookingInput,
    today: NaiveDate,
) -> Result<BookingFlow, ApiError> {
    let flow = BookingFlow::new()
        .select_service(&config.catalog, &input.service)?
        .select_provider_date(&config.catalog, &input.provider, input.date)?;

    let offered = get_available_slots(db, config, input.date, &input.provider, Some(&input.service))
        .await?
        .slots
        .iter()
        .map(|s| parse_hhmm(s))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let flow = flow.select_time(input.time, &offered)?;
    let request = flow.submit_contact(
        &input.client_name,
        &input.client_phone,
        input.client_email.as_deref(),
    )?;

    let reservation = create_reservation_at(db, config, &request, today).await?;
    let flow = flow.confirm(reservation)?;

    info!(step = flow.step_name(), "Booking flow finished");
    Ok(flow)
}

/// Cancels a reservation. The row is kept with status `cancelled`.
///
/// Cancelling twice returns the same cancelled reservation.
pub async fn cancel_reservation(db: &DbState, id: &str) -> Result<Reservation, ApiError> {
    debug!(id = %id, "cancel_reservation command");

    // Anything that is not a UUID cannot name a stored reservation
    salon_core::validation::validate_uuid("id", id)
        .map_err(|_| ApiError::not_found("Reservation", id))?;

    Ok(db.inner().reservations().cancel(id).await?)
}

/// Lists reservations, optionally for one date and/or provider.
pub async fn list_reservations(
    db: &DbState,
    filter: &ReservationFilter,
) -> Result<Vec<Reservation>, ApiError> {
    debug!(date = ?filter.date, provider = ?filter.provider, "list_reservations command");
    Ok(db.inner().reservations().list(filter).await?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::stats::get_stats_snapshot;
    use crate::error::ErrorCode;
    use salon_core::ReservationStatus;
    use salon_db::{Database, DbConfig};
    use std::sync::Arc;

    fn tuesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn request(service: &str, provider: &str, time: NaiveTime) -> ReservationRequest {
        ReservationRequest {
            service_name: service.to_string(),
            provider_name: provider.to_string(),
            date: Some(tuesday()),
            start_time: Some(time),
            client_name: "Lucía Fernández".to_string(),
            client_phone: "600 101 202".to_string(),
            client_email: None,
        }
    }

    async fn setup() -> (DbState, ConfigState) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        (DbState::new(db), ConfigState::default())
    }

    #[tokio::test]
    async fn test_book_then_conflict_then_next_slot() {
        let (db, config) = setup().await;

        let slots = get_available_slots(&db, &config, tuesday(), "Andrés", Some("Corte de cabello"))
            .await
            .unwrap();
        assert_eq!(slots.slots.len(), 18);

        let first = create_reservation_at(&db, &config, &request("Corte de cabello", "Andrés", at(10, 0)), today())
            .await
            .unwrap();
        assert_eq!(first.status, ReservationStatus::Confirmed);
        assert_eq!(first.price_cents, 1500);

        let err = create_reservation_at(&db, &config, &request("Corte de cabello", "Andrés", at(10, 0)), today())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);

        create_reservation_at(&db, &config, &request("Corte de cabello", "Andrés", at(10, 30)), today())
            .await
            .unwrap();

        let listed = list_reservations(&db, &ReservationFilter::on(tuesday())).await.unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn test_validation_error_names_field() {
        let (db, config) = setup().await;

        let mut bad = request("Corte de cabello", "Andrés", at(10, 0));
        bad.client_phone = "call me".to_string();

        let err = create_reservation_at(&db, &config, &bad, today()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.field.as_deref(), Some("client_phone"));
        assert!(list_reservations(&db, &ReservationFilter::all()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_past_date_rejected() {
        let (db, config) = setup().await;

        let later = NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();
        let err = create_reservation_at(&db, &config, &request("Tinte", "Adrián", at(12, 0)), later)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.field.as_deref(), Some("date"));
    }

    #[tokio::test]
    async fn test_every_offered_slot_is_bookable() {
        let (db, config) = setup().await;

        // A long booking in the middle of the day
        create_reservation_at(&db, &config, &request("Tinte", "Alejandro", at(12, 0)), today())
            .await
            .unwrap();

        for service in config.catalog.list_services() {
            let offered = get_available_slots(&db, &config, tuesday(), "Alejandro", Some(&service.name))
                .await
                .unwrap();
            for slot in offered.slots {
                let time = parse_hhmm(&slot).unwrap();
                let probe = request(&service.name, "Alejandro", time);
                let booking = validate_request(&config.catalog, &config.schedule, &probe, today())
                    .unwrap_or_else(|e| panic!("{} at {} rejected: {}", service.name, slot, e));
                let existing = db
                    .inner()
                    .reservations()
                    .list(&ReservationFilter::for_slot("Alejandro", tuesday()))
                    .await
                    .unwrap();
                salon_core::booking::check_conflict(&booking, &existing).unwrap();
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submissions_one_winner() {
        let (db, config) = setup().await;
        let db = Arc::new(db);
        let config = Arc::new(config);

        let mut handles = Vec::new();
        for _ in 0..6 {
            let db = Arc::clone(&db);
            let config = Arc::clone(&config);
            handles.push(tokio::spawn(async move {
                create_reservation_at(&db, &config, &request("Peinado", "Adrián", at(16, 0)), today()).await
            }));
        }

        let mut won = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => won += 1,
                Err(e) if e.code == ErrorCode::Conflict => conflicts += 1,
                Err(e) => panic!("unexpected error: {}", e),
            }
        }

        assert_eq!(won, 1);
        assert_eq!(conflicts, 5);
    }

    #[tokio::test]
    async fn test_cancel_frees_slot_and_leaves_stats() {
        let (db, config) = setup().await;

        let booked = create_reservation_at(&db, &config, &request("Corte de cabello", "Andrés", at(11, 0)), today())
            .await
            .unwrap();
        assert_eq!(get_stats_snapshot(&db, tuesday()).await.unwrap().reservations_today, 1);

        let cancelled = cancel_reservation(&db, &booked.id).await.unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);

        let again = cancel_reservation(&db, &booked.id).await.unwrap();
        assert_eq!(again, cancelled);

        let stats = get_stats_snapshot(&db, tuesday()).await.unwrap();
        assert_eq!(stats.reservations_today, 0);
        assert_eq!(stats.revenue_today.cents(), 0);

        create_reservation_at(&db, &config, &request("Corte de cabello", "Andrés", at(11, 0)), today())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancel_unknown_is_not_found() {
        let (db, _) = setup().await;

        let err = cancel_reservation(&db, "550e8400-e29b-41d4-a716-446655440000")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = cancel_reservation(&db, "not-an-id").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_book_walks_the_flow() {
        let (db, config) = setup().await;

        let input = BookingInput {
            service: "Arreglo de barba".to_string(),
            provider: "Alejandro".to_string(),
            date: tuesday(),
            time: at(10, 0),
            client_name: "Carlos Martín".to_string(),
            client_phone: "+34 600 303 404".to_string(),
            client_email: Some("carlos@example.com".to_string()),
        };

        let flow = book_at(&db, &config, &input, today()).await.unwrap();
        let BookingFlow::Confirmed { reservation } = flow else {
            panic!("flow not confirmed");
        };
        assert_eq!(reservation.duration_minutes, 20);
        assert_eq!(reservation.client_email.as_deref(), Some("carlos@example.com"));

        // 10:00 is no longer offered, so the flow stops at the time step
        let err = book_at(&db, &config, &input, today()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
    }
}
