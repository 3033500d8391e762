//! # Booking Validator
//!
//! Turns a client's [`ReservationRequest`] into a [`ValidatedBooking`], or
//! explains why it cannot be booked.
//!
//! ## Validation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ReservationRequest                                                    │
//! │       │                                                                 │
//! │       ├── 1. service   blank → Required, not listed → Unknown          │
//! │       ├── 2. provider  blank → Required, not listed → Unknown          │
//! │       ├── 3. fields    date, time, name, phone, email format           │
//! │       ├── 4. date      before today → InPast                           │
//! │       ├── 5. time      off the grid / ends after close → OffGrid       │
//! │       ▼                                                                 │
//! │  ValidatedBooking ──► check_conflict(existing) ──► SlotConflict?       │
//! │                                                                         │
//! │  The first failing rule wins; later rules are not evaluated.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The conflict check is separate because it needs the ledger's current
//! reservations, which the database layer re-reads under its booking lock.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{Catalog, Service};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::schedule::{format_hhmm, hhmm, Schedule, TimeRange};
use crate::types::{Reservation, ReservationStatus};
use crate::validation::{validate_client_name, validate_email, validate_phone};

// =============================================================================
// Request
// =============================================================================

/// What a client submits. Optional fields may be missing on arrival;
/// validation decides whether that is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct ReservationRequest {
    pub service_name: String,
    pub provider_name: String,
    #[ts(as = "Option<String>")]
    pub date: Option<NaiveDate>,
    #[serde(with = "hhmm::option")]
    #[ts(as = "Option<String>")]
    pub start_time: Option<NaiveTime>,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: Option<String>,
}

// =============================================================================
// Validated Booking
// =============================================================================

/// A request that passed every rule except the conflict check.
///
/// Carries the resolved catalog service so the reservation snapshots its
/// price and duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBooking {
    pub service: Service,
    pub provider: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: Option<String>,
}

impl ValidatedBooking {
    /// Interval the booking would occupy.
    #[inline]
    pub fn time_range(&self) -> TimeRange {
        TimeRange::starting_at(self.start_time, self.service.duration_minutes)
    }

    /// Builds the stored form: confirmed, with price and duration frozen.
    pub fn into_reservation(self, id: String, created_at: DateTime<Utc>) -> Reservation {
        Reservation {
            id,
            service_name: self.service.name,
            provider_name: self.provider,
            date: self.date,
            start_time: self.start_time,
            duration_minutes: self.service.duration_minutes,
            price_cents: self.service.price_cents,
            client_name: self.client_name,
            client_phone: self.client_phone,
            client_email: self.client_email,
            status: ReservationStatus::Confirmed,
            created_at,
        }
    }

    fn conflict(&self, conflicting_id: Option<String>) -> CoreError {
        CoreError::SlotConflict {
            provider: self.provider.clone(),
            date: self.date.to_string(),
            start: format_hhmm(self.start_time),
            conflicting_id,
        }
    }

    /// The error reported when the slot turns out to be taken.
    pub fn slot_taken(&self) -> CoreError {
        self.conflict(None)
    }
}

// =============================================================================
// Validation
// =============================================================================

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

/// Runs every rule that does not need the ledger, in order.
///
/// ## Example
/// ```rust
/// use chrono::{NaiveDate, NaiveTime};
/// use salon_core::booking::{validate_request, ReservationRequest};
/// use salon_core::catalog::Catalog;
/// use salon_core::schedule::Schedule;
///
/// let request = ReservationRequest {
///     service_name: "Corte de cabello".into(),
///     provider_name: "Andrés".into(),
///     date: NaiveDate::from_ymd_opt(2025, 6, 10),
///     start_time: NaiveTime::from_hms_opt(10, 0, 0),
///     client_name: "Lucía".into(),
///     client_phone: "600 123 456".into(),
///     client_email: None,
/// };
/// let today = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();
///
/// let booking = validate_request(&Catalog::default(), &Schedule::default(), &request, today).unwrap();
/// assert_eq!(booking.service.duration_minutes, 30);
/// ```
pub fn validate_request(
    catalog: &Catalog,
    schedule: &Schedule,
    request: &ReservationRequest,
    today: NaiveDate,
) -> CoreResult<ValidatedBooking> {
    // 1. service
    let service_name = request.service_name.trim();
    if service_name.is_empty() {
        return Err(required("service").into());
    }
    let service = catalog
        .service(service_name)
        .ok_or_else(|| ValidationError::Unknown {
            field: "service".to_string(),
            value: service_name.to_string(),
        })?;

    // 2. provider
    let provider = request.provider_name.trim();
    if provider.is_empty() {
        return Err(required("provider").into());
    }
    if !catalog.has_provider(provider) {
        return Err(ValidationError::Unknown {
            field: "provider".to_string(),
            value: provider.to_string(),
        }
        .into());
    }

    // 3. remaining fields
    let date = request.date.ok_or_else(|| required("date"))?;
    let start_time = request.start_time.ok_or_else(|| required("start_time"))?;
    let client_name = validate_client_name(&request.client_name)?;
    let client_phone = validate_phone("client_phone", &request.client_phone)?;
    let client_email = validate_email("client_email", request.client_email.as_deref())?;

    // 4. past dates
    if date < today {
        return Err(ValidationError::InPast {
            field: "date".to_string(),
            value: date.to_string(),
        }
        .into());
    }

    // 5. grid and closing time
    schedule.check_bookable(date, start_time, service.duration_minutes)?;

    Ok(ValidatedBooking {
        service: service.clone(),
        provider: provider.to_string(),
        date,
        start_time,
        client_name,
        client_phone,
        client_email,
    })
}

/// Rejects the booking when it overlaps a non-cancelled reservation of the
/// same provider on the same date.
///
/// Existing reservations are measured with their stored duration.
pub fn check_conflict(booking: &ValidatedBooking, existing: &[Reservation]) -> CoreResult<()> {
    let wanted = booking.time_range();

    let clash = existing.iter().find(|r| {
        r.is_active()
            && r.provider_name == booking.provider
            && r.date == booking.date
            && r.time_range().overlaps(&wanted)
    });

    match clash {
        Some(r) => Err(booking.conflict(Some(r.id.clone()))),
        None => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn tuesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn request(service: &str, provider: &str, start: NaiveTime) -> ReservationRequest {
        ReservationRequest {
            service_name: service.to_string(),
            provider_name: provider.to_string(),
            date: Some(tuesday()),
            start_time: Some(start),
            client_name: "Lucía".to_string(),
            client_phone: "600 123 456".to_string(),
            client_email: None,
        }
    }

    fn validate(req: &ReservationRequest) -> CoreResult<ValidatedBooking> {
        let today = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();
        validate_request(&Catalog::default(), &Schedule::default(), req, today)
    }

    fn field_of(err: CoreError) -> String {
        match err {
            CoreError::Validation(v) => v.field().to_string(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_request() {
        let booking = validate(&request("Corte de cabello", "Andrés", t(10, 0))).unwrap();
        assert_eq!(booking.provider, "Andrés");
        assert_eq!(booking.time_range(), TimeRange { start: 600, end: 630 });

        let reservation = booking.into_reservation("id-1".to_string(), Utc::now());
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert_eq!(reservation.price_cents, 1500);
        assert_eq!(reservation.duration_minutes, 30);
    }

    #[test]
    fn test_service_checked_first() {
        let mut req = request("", "", t(10, 0));
        req.client_name.clear();
        let err = validate(&req).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { ref field }) if field == "service"
        ));

        let err = validate(&request("Permanente", "Andrés", t(10, 0))).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Unknown { ref field, .. }) if field == "service"
        ));
    }

    #[test]
    fn test_provider_checked_second() {
        let err = validate(&request("Tinte", " ", t(10, 0))).unwrap_err();
        assert_eq!(field_of(err), "provider");

        let err = validate(&request("Tinte", "Nadie", t(10, 0))).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Unknown { ref field, .. }) if field == "provider"
        ));
    }

    #[test]
    fn test_missing_fields() {
        let mut req = request("Tinte", "Adrián", t(10, 0));
        req.date = None;
        assert_eq!(field_of(validate(&req).unwrap_err()), "date");

        let mut req = request("Tinte", "Adrián", t(10, 0));
        req.start_time = None;
        assert_eq!(field_of(validate(&req).unwrap_err()), "start_time");

        let mut req = request("Tinte", "Adrián", t(10, 0));
        req.client_name = "   ".to_string();
        assert_eq!(field_of(validate(&req).unwrap_err()), "client_name");

        let mut req = request("Tinte", "Adrián", t(10, 0));
        req.client_phone = "abc".to_string();
        assert_eq!(field_of(validate(&req).unwrap_err()), "client_phone");

        let mut req = request("Tinte", "Adrián", t(10, 0));
        req.client_email = Some("lucia@".to_string());
        assert_eq!(field_of(validate(&req).unwrap_err()), "client_email");
    }

    #[test]
    fn test_blank_email_is_absent() {
        let mut req = request("Tinte", "Adrián", t(10, 0));
        req.client_email = Some("  ".to_string());
        assert_eq!(validate(&req).unwrap().client_email, None);
    }

    #[test]
    fn test_past_date_rejected() {
        let mut req = request("Tinte", "Adrián", t(10, 0));
        req.date = NaiveDate::from_ymd_opt(2025, 6, 2);
        let err = validate(&req).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::InPast { .. })));

        // Today itself is bookable.
        let today = tuesday();
        let req = request("Tinte", "Adrián", t(10, 0));
        assert!(validate_request(&Catalog::default(), &Schedule::default(), &req, today).is_ok());
    }

    #[test]
    fn test_off_grid_rejected() {
        let err = validate(&request("Tinte", "Adrián", t(10, 15))).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::OffGrid { .. })));

        // Mechas (120 min) at 18:00 would run past 19:00.
        let err = validate(&request("Mechas", "Adrián", t(18, 0))).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::OffGrid { .. })));
    }

    #[test]
    fn test_overlong_service_rejected_not_wrapped() {
        // A catalog built without check_grid can still hold absurd durations
        let mut catalog = Catalog::default();
        catalog
            .services
            .push(Service::new("Maratón", Money::from_units(90), u32::MAX));
        let today = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();

        let err = validate_request(
            &catalog,
            &Schedule::default(),
            &request("Maratón", "Andrés", t(10, 0)),
            today,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::OffGrid { .. })));
    }

    #[test]
    fn test_check_conflict() {
        let first = validate(&request("Corte de cabello", "Andrés", t(10, 0)))
            .unwrap()
            .into_reservation("first".to_string(), Utc::now());
        let existing = vec![first];

        let same = validate(&request("Corte de cabello", "Andrés", t(10, 0))).unwrap();
        match check_conflict(&same, &existing) {
            Err(CoreError::SlotConflict { conflicting_id, start, .. }) => {
                assert_eq!(conflicting_id.as_deref(), Some("first"));
                assert_eq!(start, "10:00");
            }
            other => panic!("expected conflict, got {:?}", other),
        }

        let next = validate(&request("Corte de cabello", "Andrés", t(10, 30))).unwrap();
        assert!(check_conflict(&next, &existing).is_ok());

        let other_provider = validate(&request("Corte de cabello", "Alejandro", t(10, 0))).unwrap();
        assert!(check_conflict(&other_provider, &existing).is_ok());
    }

    #[test]
    fn test_conflict_uses_stored_duration() {
        // A long dye job booked earlier blocks a later start inside it.
        let dye = validate(&request("Tinte", "Andrés", t(10, 0)))
            .unwrap()
            .into_reservation("dye".to_string(), Utc::now());
        let existing = vec![dye];

        let inside = validate(&request("Peinado", "Andrés", t(11, 0))).unwrap();
        assert!(check_conflict(&inside, &existing).is_err());

        let after = validate(&request("Peinado", "Andrés", t(11, 30))).unwrap();
        assert!(check_conflict(&after, &existing).is_ok());
    }

    #[test]
    fn test_cancelled_reservations_do_not_conflict() {
        let mut first = validate(&request("Corte de cabello", "Andrés", t(10, 0)))
            .unwrap()
            .into_reservation("first".to_string(), Utc::now());
        first.status = ReservationStatus::Cancelled;

        let again = validate(&request("Corte de cabello", "Andrés", t(10, 0))).unwrap();
        assert!(check_conflict(&again, &[first]).is_ok());
    }

    #[test]
    fn test_request_deserializes_from_json() {
        let json = r#"{
            "service_name": "Peinado",
            "provider_name": "Alejandro",
            "date": "2025-06-10",
            "start_time": "16:30",
            "client_name": "Rosa",
            "client_phone": "+34 611 000 111"
        }"#;
        let req: ReservationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.start_time, Some(t(16, 30)));
        assert_eq!(req.client_email, None);
        assert!(validate(&req).is_ok());
    }
}
