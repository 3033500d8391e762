//! # Availability Engine
//!
//! Computes the start times a provider can still take on a given date.
//!
//! ## How a Slot Survives
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  grid(date)            10:00 10:30 11:00 11:30 12:00 ...                │
//! │                          │     │     │     │     │                      │
//! │  existing  [10:30 ─── Tinte 90 min ─── 12:00)                           │
//! │                          │     ✗     ✗     ✗     │                      │
//! │  no duration:          10:00             12:00 ...   (point inside?)    │
//! │                                                                         │
//! │  duration = 45 min:    [10:00 ── 10:45) overlaps 10:30 → ✗              │
//! │                                            12:00 ... ✓                  │
//! │                                                                         │
//! │  last start must also finish by closing time                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is a pure function of its inputs. Unknown providers,
//! closed days and full days all yield an empty list rather than an error.

use chrono::{NaiveDate, NaiveTime};

use crate::catalog::Catalog;
use crate::schedule::{minutes_of, Schedule, TimeRange};
use crate::types::Reservation;

/// Occupied intervals for one (provider, date), ignoring cancellations.
pub fn occupied_ranges<'a>(
    reservations: &'a [Reservation],
    provider: &'a str,
    date: NaiveDate,
) -> impl Iterator<Item = TimeRange> + 'a {
    reservations
        .iter()
        .filter(move |r| r.is_active() && r.provider_name == provider && r.date == date)
        .map(Reservation::time_range)
}

/// Start times still free for `provider` on `date`, ascending.
///
/// ## Behavior
/// - Without a duration, a grid point is dropped when it falls inside an
///   existing reservation.
/// - With a duration, a grid point is dropped when `[t, t + duration)`
///   overlaps an existing reservation or ends after closing time.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use salon_core::availability::available_slots;
/// use salon_core::catalog::Catalog;
/// use salon_core::schedule::Schedule;
///
/// let tuesday = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
/// let slots = available_slots(
///     &Schedule::default(),
///     &Catalog::default(),
///     tuesday,
///     "Andrés",
///     &[],
///     Some(30),
/// );
/// assert_eq!(slots.len(), 18);
/// ```
pub fn available_slots(
    schedule: &Schedule,
    catalog: &Catalog,
    date: NaiveDate,
    provider: &str,
    reservations: &[Reservation],
    duration_minutes: Option<u32>,
) -> Vec<NaiveTime> {
    if !catalog.has_provider(provider) {
        return Vec::new();
    }
    let Some(close) = schedule.closing_minute(date) else {
        return Vec::new();
    };

    let taken: Vec<TimeRange> = occupied_ranges(reservations, provider, date).collect();

    schedule
        .grid(date)
        .into_iter()
        .filter(|&t| match duration_minutes {
            None => {
                let minute = minutes_of(t);
                !taken.iter().any(|r| r.contains(minute))
            }
            Some(duration) => {
                let candidate = TimeRange::starting_at(t, duration);
                candidate.end <= close && !taken.iter().any(|r| r.overlaps(&candidate))
            }
        })
        .collect()
}

/// Like [`available_slots`], with the duration taken from a catalog service.
///
/// An unknown service yields no slots.
pub fn slots_for_service(
    schedule: &Schedule,
    catalog: &Catalog,
    date: NaiveDate,
    provider: &str,
    reservations: &[Reservation],
    service_name: &str,
) -> Vec<NaiveTime> {
    match catalog.service(service_name) {
        Some(service) => available_slots(
            schedule,
            catalog,
            date,
            provider,
            reservations,
            Some(service.duration_minutes),
        ),
        None => Vec::new(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReservationStatus;
    use chrono::Utc;

    fn tuesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn booked(provider: &str, start: NaiveTime, duration: u32) -> Reservation {
        Reservation {
            id: format!("{}-{}", provider, start),
            service_name: "Tinte".to_string(),
            provider_name: provider.to_string(),
            date: tuesday(),
            start_time: start,
            duration_minutes: duration,
            price_cents: 4500,
            client_name: "Carmen".to_string(),
            client_phone: "600000000".to_string(),
            client_email: None,
            status: ReservationStatus::Confirmed,
            created_at: Utc::now(),
        }
    }

    fn slots(reservations: &[Reservation], duration: Option<u32>) -> Vec<NaiveTime> {
        available_slots(
            &Schedule::default(),
            &Catalog::default(),
            tuesday(),
            "Andrés",
            reservations,
            duration,
        )
    }

    #[test]
    fn test_empty_day_has_full_grid() {
        let all = slots(&[], None);
        assert_eq!(all.len(), 18);
        assert_eq!(all[0], t(10, 0));
        assert_eq!(all[17], t(18, 30));
    }

    #[test]
    fn test_raw_grid_drops_points_inside_reservations() {
        let existing = [booked("Andrés", t(10, 30), 90)];
        let free = slots(&existing, None);

        assert!(free.contains(&t(10, 0)));
        assert!(!free.contains(&t(10, 30)));
        assert!(!free.contains(&t(11, 0)));
        assert!(!free.contains(&t(11, 30)));
        assert!(free.contains(&t(12, 0)));
        assert_eq!(free.len(), 15);
    }

    #[test]
    fn test_duration_filters_overlaps() {
        let existing = [booked("Andrés", t(10, 30), 90)];
        let free = slots(&existing, Some(45));

        // 10:00 + 45 min runs into the 10:30 appointment.
        assert!(!free.contains(&t(10, 0)));
        assert_eq!(free.first(), Some(&t(12, 0)));
    }

    #[test]
    fn test_duration_respects_closing_time() {
        let free = slots(&[], Some(120));
        assert_eq!(free.last(), Some(&t(17, 0)));

        let free = slots(&[], Some(30));
        assert_eq!(free.last(), Some(&t(18, 30)));
    }

    #[test]
    fn test_other_providers_and_cancellations_ignored() {
        let mut cancelled = booked("Andrés", t(10, 0), 30);
        cancelled.status = ReservationStatus::Cancelled;
        let existing = [booked("Alejandro", t(10, 0), 30), cancelled];

        assert_eq!(slots(&existing, Some(30)).len(), 18);
    }

    #[test]
    fn test_unknown_provider_and_closed_day() {
        let schedule = Schedule::default();
        let catalog = Catalog::default();

        assert!(available_slots(&schedule, &catalog, tuesday(), "Nadie", &[], None).is_empty());

        let sunday = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert!(available_slots(&schedule, &catalog, sunday, "Andrés", &[], None).is_empty());
    }

    #[test]
    fn test_fully_booked_day() {
        let existing = [booked("Andrés", t(10, 0), 9 * 60)];
        assert!(slots(&existing, None).is_empty());
        assert!(slots(&existing, Some(20)).is_empty());
    }

    #[test]
    fn test_slots_for_service() {
        let schedule = Schedule::default();
        let catalog = Catalog::default();

        let mechas = slots_for_service(&schedule, &catalog, tuesday(), "Adrián", &[], "Mechas");
        assert_eq!(mechas.last(), Some(&t(17, 0)));

        let unknown = slots_for_service(&schedule, &catalog, tuesday(), "Adrián", &[], "Permanente");
        assert!(unknown.is_empty());
    }
}
