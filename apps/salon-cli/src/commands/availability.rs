//! # Availability Commands
//!
//! ## Query Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Slot Query Flow                                      │
//! │                                                                         │
//! │  salon slots --date 2025-06-10 --provider Andrés --service "Tinte"     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  reservations().list(for_slot(provider, date))   ◄── one indexed read  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  salon_core::availability (grid minus occupied intervals)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ["10:00", "11:30", ...]                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown providers or services and closed days yield an empty list,
//! never an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, DbState};
use salon_core::availability;
use salon_core::schedule::slots_to_strings;
use salon_core::ReservationFilter;

/// Free start times for one provider on one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsResponse {
    pub date: NaiveDate,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// "HH:MM", ascending
    pub slots: Vec<String>,
}

/// Free start times on `date` with `provider`.
///
/// With a `service`, only starts where the whole service fits before
/// closing and clear of other bookings are returned. Without one, every
/// grid point not inside an existing booking is returned.
///
/// Names are trimmed the same way the booking path trims them.
pub async fn get_available_slots(
    db: &DbState,
    config: &ConfigState,
    date: NaiveDate,
    provider: &str,
    service: Option<&str>,
) -> Result<SlotsResponse, ApiError> {
    let provider = provider.trim();
    let service = service.map(str::trim);
    debug!(%date, provider = %provider, service = ?service, "get_available_slots command");

    let existing = db
        .inner()
        .reservations()
        .list(&ReservationFilter::for_slot(provider, date))
        .await?;

    let slots = match service {
        Some(name) => availability::slots_for_service(
            &config.schedule,
            &config.catalog,
            date,
            provider,
            &existing,
            name,
        ),
        None => availability::available_slots(
            &config.schedule,
            &config.catalog,
            date,
            provider,
            &existing,
            None,
        ),
    };

    debug!(count = slots.len(), "Slots computed");

    Ok(SlotsResponse {
        date,
        provider: provider.to_string(),
        service: service.map(str::to_string),
        slots: slots_to_strings(&slots),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use salon_db::{Database, DbConfig};

    async fn setup() -> (DbState, ConfigState) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        (DbState::new(db), ConfigState::default())
    }

    #[tokio::test]
    async fn test_empty_day_has_full_grid() {
        let (db, config) = setup().await;
        let tuesday = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

        let response = get_available_slots(&db, &config, tuesday, "Andrés", Some("Corte de cabello"))
            .await
            .unwrap();

        assert_eq!(response.slots.len(), 18);
        assert_eq!(response.slots.first().map(String::as_str), Some("10:00"));
        assert_eq!(response.slots.last().map(String::as_str), Some("18:30"));
    }

    #[tokio::test]
    async fn test_names_are_trimmed_like_bookings() {
        let (db, config) = setup().await;
        let tuesday = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

        let response = get_available_slots(&db, &config, tuesday, " Andrés ", Some(" Tinte"))
            .await
            .unwrap();

        assert_eq!(response.provider, "Andrés");
        assert_eq!(response.service.as_deref(), Some("Tinte"));
        // Tinte (90 min) must end by 19:00
        assert_eq!(response.slots.last().map(String::as_str), Some("17:30"));
    }

    #[tokio::test]
    async fn test_unknowns_and_sunday_are_empty() {
        let (db, config) = setup().await;
        let tuesday = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

        let unknown_provider = get_available_slots(&db, &config, tuesday, "Nadie", None)
            .await
            .unwrap();
        assert!(unknown_provider.slots.is_empty());

        let unknown_service = get_available_slots(&db, &config, tuesday, "Andrés", Some("Manicura"))
            .await
            .unwrap();
        assert!(unknown_service.slots.is_empty());

        let closed = get_available_slots(&db, &config, sunday, "Andrés", None)
            .await
            .unwrap();
        assert!(closed.slots.is_empty());
    }

    #[tokio::test]
    async fn test_long_service_stops_before_closing() {
        let (db, config) = setup().await;
        let tuesday = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

        // Mechas takes 120 minutes; last start is 17:00 for a 19:00 close
        let response = get_available_slots(&db, &config, tuesday, "Adrián", Some("Mechas"))
            .await
            .unwrap();

        assert_eq!(response.slots.last().map(String::as_str), Some("17:00"));
        assert_eq!(response.slots.len(), 15);
    }
}
