//! # Schedule Module
//!
//! Business hours, the slot grid, and minute-based time ranges.
//!
//! ## The Slot Grid
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Tuesday, open 10:00 - 19:00, step 30 min                               │
//! │                                                                         │
//! │  10:00 10:30 11:00 11:30 ... 18:00 18:30 │ 19:00 (close, not a slot)    │
//! │    ▲                                                                    │
//! │    └── every candidate start is open + k × step, strictly before close  │
//! │                                                                         │
//! │  18 candidate starts on a weekday, 8 on Saturday, none on Sunday        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Times of day are handled internally as minutes from midnight so interval
//! arithmetic never has to deal with `NaiveTime` wrap-around.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::DEFAULT_SLOT_MINUTES;

/// Minutes in a day; no interval may extend past this.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

// =============================================================================
// Time Helpers
// =============================================================================

/// Minutes since midnight for a time of day (seconds are dropped).
#[inline]
pub fn minutes_of(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Time of day for a minute offset, `None` past the end of the day.
#[inline]
pub fn time_at(minutes: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).filter(|_| minutes < MINUTES_PER_DAY)
}

/// Parses a wall-clock time written as `HH:MM` (or `HH:MM:SS`).
///
/// ## Example
/// ```rust
/// use salon_core::schedule::parse_hhmm;
///
/// let t = parse_hhmm("10:30").unwrap();
/// assert_eq!(t.to_string(), "10:30:00");
/// assert!(parse_hhmm("25:00").is_err());
/// ```
pub fn parse_hhmm(value: &str) -> Result<NaiveTime, ValidationError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| ValidationError::InvalidFormat {
            field: "time".to_string(),
            reason: format!("'{}' is not a HH:MM time", value),
        })
}

/// Formats a time of day as `HH:MM`.
#[inline]
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Serde adapter that writes times as `HH:MM`, the format the booking UI uses.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw).map_err(serde::de::Error::custom)
    }

    /// Same as the parent module for `Option<NaiveTime>`.
    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(t) => serializer.serialize_some(&super::super::format_hhmm(*t)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            match raw.as_deref().map(str::trim) {
                None | Some("") => Ok(None),
                Some(value) => super::super::parse_hhmm(value)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
            }
        }
    }
}

/// Serializes a list of slot times as `["10:00", "10:30", ...]`.
pub fn slots_to_strings(slots: &[NaiveTime]) -> Vec<String> {
    slots.iter().copied().map(format_hhmm).collect()
}

// =============================================================================
// Time Range
// =============================================================================

/// Half-open interval `[start, end)` in minutes from midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: u32,
    pub end: u32,
}

impl TimeRange {
    /// Interval starting at `start` and lasting `duration_minutes`.
    ///
    /// The end saturates at `u32::MAX`, so the range is never inverted.
    pub fn starting_at(start: NaiveTime, duration_minutes: u32) -> Self {
        let start = minutes_of(start);
        TimeRange {
            start,
            end: start.saturating_add(duration_minutes),
        }
    }

    /// `a.start < b.end && b.start < a.end`; touching intervals do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether a single minute falls inside the interval.
    #[inline]
    pub fn contains(&self, minute: u32) -> bool {
        self.start <= minute && minute < self.end
    }
}

// =============================================================================
// Business Hours
// =============================================================================

/// Opening and closing time for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OpeningHours {
    #[serde(with = "hhmm")]
    #[ts(as = "String")]
    pub open: NaiveTime,
    #[serde(with = "hhmm")]
    #[ts(as = "String")]
    pub close: NaiveTime,
}

impl OpeningHours {
    /// Builds opening hours from hour/minute pairs.
    pub fn new(open: (u32, u32), close: (u32, u32)) -> Option<Self> {
        Some(OpeningHours {
            open: NaiveTime::from_hms_opt(open.0, open.1, 0)?,
            close: NaiveTime::from_hms_opt(close.0, close.1, 0)?,
        })
    }

    #[inline]
    pub fn open_minute(&self) -> u32 {
        minutes_of(self.open)
    }

    #[inline]
    pub fn close_minute(&self) -> u32 {
        minutes_of(self.close)
    }
}

/// Weekly opening hours; `None` means closed that day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct BusinessHours {
    pub monday: Option<OpeningHours>,
    pub tuesday: Option<OpeningHours>,
    pub wednesday: Option<OpeningHours>,
    pub thursday: Option<OpeningHours>,
    pub friday: Option<OpeningHours>,
    pub saturday: Option<OpeningHours>,
    pub sunday: Option<OpeningHours>,
}

impl BusinessHours {
    /// Opening hours for a weekday.
    pub fn for_weekday(&self, weekday: Weekday) -> Option<&OpeningHours> {
        match weekday {
            Weekday::Mon => self.monday.as_ref(),
            Weekday::Tue => self.tuesday.as_ref(),
            Weekday::Wed => self.wednesday.as_ref(),
            Weekday::Thu => self.thursday.as_ref(),
            Weekday::Fri => self.friday.as_ref(),
            Weekday::Sat => self.saturday.as_ref(),
            Weekday::Sun => self.sunday.as_ref(),
        }
    }

    /// Opening hours for a calendar date.
    pub fn for_date(&self, date: NaiveDate) -> Option<&OpeningHours> {
        self.for_weekday(date.weekday())
    }

    fn days(&self) -> [(Weekday, Option<&OpeningHours>); 7] {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .map(|day| (day, self.for_weekday(day)))
    }
}

/// Monday–Friday 10:00–19:00, Saturday 10:00–14:00, Sunday closed.
impl Default for BusinessHours {
    fn default() -> Self {
        let weekday = OpeningHours::new((10, 0), (19, 0));
        BusinessHours {
            monday: weekday,
            tuesday: weekday,
            wednesday: weekday,
            thursday: weekday,
            friday: weekday,
            saturday: OpeningHours::new((10, 0), (14, 0)),
            sunday: None,
        }
    }
}

// =============================================================================
// Schedule
// =============================================================================

/// Business hours plus the step between candidate start times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct Schedule {
    pub hours: BusinessHours,
    pub slot_minutes: u32,
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule {
            hours: BusinessHours::default(),
            slot_minutes: DEFAULT_SLOT_MINUTES,
        }
    }
}

impl Schedule {
    /// Checks that the schedule can produce a grid at all.
    ///
    /// ## Rules
    /// - `slot_minutes` must be positive
    /// - every open day must open before it closes
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.slot_minutes == 0 {
            return Err(ValidationError::MustBePositive {
                field: "slot_minutes".to_string(),
            });
        }

        for (day, hours) in self.hours.days() {
            if let Some(hours) = hours {
                if hours.open >= hours.close {
                    return Err(ValidationError::InvalidFormat {
                        field: format!("hours.{}", day).to_lowercase(),
                        reason: "opening time must be before closing time".to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Every candidate start time for a date, in ascending order.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use salon_core::schedule::Schedule;
    ///
    /// let schedule = Schedule::default();
    /// let tuesday = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
    /// let sunday = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    ///
    /// assert_eq!(schedule.grid(tuesday).len(), 18);
    /// assert!(schedule.grid(sunday).is_empty());
    /// ```
    pub fn grid(&self, date: NaiveDate) -> Vec<NaiveTime> {
        let Some(hours) = self.hours.for_date(date) else {
            return Vec::new();
        };
        if self.slot_minutes == 0 {
            return Vec::new();
        }

        let close = hours.close_minute();
        (hours.open_minute()..close)
            .step_by(self.slot_minutes as usize)
            .filter_map(time_at)
            .collect()
    }

    /// Closing minute for a date, `None` when closed.
    pub fn closing_minute(&self, date: NaiveDate) -> Option<u32> {
        self.hours.for_date(date).map(OpeningHours::close_minute)
    }

    /// Checks that `start` is a grid point on an open day and that a service
    /// of `duration_minutes` finishes by closing time.
    pub fn check_bookable(
        &self,
        date: NaiveDate,
        start: NaiveTime,
        duration_minutes: u32,
    ) -> Result<(), ValidationError> {
        let off_grid = |reason: &str| ValidationError::OffGrid {
            field: "start_time".to_string(),
            value: format_hhmm(start),
            reason: reason.to_string(),
        };

        let Some(hours) = self.hours.for_date(date) else {
            return Err(off_grid("the salon is closed that day"));
        };

        let minute = minutes_of(start);
        if minute < hours.open_minute() || minute >= hours.close_minute() {
            return Err(off_grid("outside business hours"));
        }
        if self.slot_minutes == 0 || (minute - hours.open_minute()) % self.slot_minutes != 0 {
            return Err(off_grid("not aligned to the slot grid"));
        }
        match minute.checked_add(duration_minutes) {
            Some(end) if end <= hours.close_minute() => {}
            _ => return Err(off_grid("the service would end after closing time")),
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_weekday_grid() {
        let grid = Schedule::default().grid(date(2025, 6, 10));
        assert_eq!(grid.len(), 18);
        assert_eq!(grid.first(), Some(&t(10, 0)));
        assert_eq!(grid.last(), Some(&t(18, 30)));
    }

    #[test]
    fn test_saturday_and_sunday_grid() {
        let schedule = Schedule::default();
        let saturday = schedule.grid(date(2025, 6, 14));
        assert_eq!(saturday.len(), 8);
        assert_eq!(saturday.last(), Some(&t(13, 30)));
        assert!(schedule.grid(date(2025, 6, 15)).is_empty());
    }

    #[test]
    fn test_custom_step() {
        let schedule = Schedule {
            slot_minutes: 45,
            ..Schedule::default()
        };
        let grid = schedule.grid(date(2025, 6, 14));
        assert_eq!(grid, vec![t(10, 0), t(10, 45), t(11, 30), t(12, 15), t(13, 0), t(13, 45)]);
    }

    #[test]
    fn test_time_range_overlap() {
        let a = TimeRange::starting_at(t(10, 0), 30);
        let b = TimeRange::starting_at(t(10, 30), 30);
        let c = TimeRange::starting_at(t(10, 15), 90);

        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
        assert!(a.contains(minutes_of(t(10, 29))));
        assert!(!a.contains(minutes_of(t(10, 30))));
    }

    #[test]
    fn test_huge_duration_does_not_wrap() {
        let endless = TimeRange::starting_at(t(10, 0), u32::MAX);
        assert_eq!(endless.end, u32::MAX);
        assert!(endless.overlaps(&TimeRange::starting_at(t(12, 0), 30)));

        let schedule = Schedule::default();
        assert!(matches!(
            schedule.check_bookable(date(2025, 6, 10), t(10, 0), u32::MAX),
            Err(ValidationError::OffGrid { .. })
        ));
    }

    #[test]
    fn test_check_bookable() {
        let schedule = Schedule::default();
        let tuesday = date(2025, 6, 10);

        assert!(schedule.check_bookable(tuesday, t(10, 0), 30).is_ok());
        assert!(schedule.check_bookable(tuesday, t(18, 30), 30).is_ok());

        assert!(matches!(
            schedule.check_bookable(tuesday, t(10, 15), 30),
            Err(ValidationError::OffGrid { .. })
        ));
        assert!(schedule.check_bookable(tuesday, t(9, 30), 30).is_err());
        assert!(schedule.check_bookable(tuesday, t(19, 0), 30).is_err());
        assert!(schedule.check_bookable(tuesday, t(18, 0), 120).is_err());
        assert!(schedule.check_bookable(date(2025, 6, 15), t(10, 0), 30).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(Schedule::default().validate().is_ok());

        let zero_step = Schedule {
            slot_minutes: 0,
            ..Schedule::default()
        };
        assert!(zero_step.validate().is_err());

        let mut inverted = Schedule::default();
        inverted.hours.monday = OpeningHours::new((19, 0), (10, 0));
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_parse_and_format_hhmm() {
        assert_eq!(parse_hhmm("09:05").unwrap(), t(9, 5));
        assert_eq!(parse_hhmm(" 18:30:00 ").unwrap(), t(18, 30));
        assert!(parse_hhmm("noon").is_err());
        assert_eq!(format_hhmm(t(9, 5)), "09:05");
    }

    #[test]
    fn test_business_hours_deserialize() {
        let json = r#"{ "hours": { "saturday": { "open": "09:00", "close": "13:00" } }, "slot_minutes": 20 }"#;
        let schedule: Schedule = serde_json::from_str(json).unwrap();

        // Days left out keep their default hours.
        assert_eq!(schedule.slot_minutes, 20);
        assert_eq!(schedule.hours.monday, BusinessHours::default().monday);
        assert!(schedule.hours.sunday.is_none());
        assert_eq!(schedule.hours.saturday.unwrap().open, t(9, 0));
    }
}
