//! # Catalog Module
//!
//! The salon's reference data: bookable services and the stylists who
//! perform them.
//!
//! ## Default Catalog
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Service              Duration   Price       Providers                  │
//! │  ───────────────────  ────────   ─────       ─────────                  │
//! │  Corte de cabello       30 min      15       Andrés                     │
//! │  Arreglo de barba       20 min      10       Alejandro                  │
//! │  Tinte                  90 min      45       Adrián                     │
//! │  Corte mujer            45 min      25                                  │
//! │  Peinado                30 min      20                                  │
//! │  Mechas                120 min      60                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every provider performs every service. Lookups are by exact name.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::schedule::MINUTES_PER_DAY;

// =============================================================================
// Service
// =============================================================================

/// A bookable service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Service {
    /// Unique within the catalog.
    pub name: String,
    pub price_cents: i64,
    pub duration_minutes: u32,
}

impl Service {
    pub fn new(name: impl Into<String>, price: Money, duration_minutes: u32) -> Self {
        Service {
            name: name.into(),
            price_cents: price.cents(),
            duration_minutes,
        }
    }

    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Services and providers, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct Catalog {
    pub services: Vec<Service>,
    pub providers: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            services: vec![
                Service::new("Corte de cabello", Money::from_units(15), 30),
                Service::new("Arreglo de barba", Money::from_units(10), 20),
                Service::new("Tinte", Money::from_units(45), 90),
                Service::new("Corte mujer", Money::from_units(25), 45),
                Service::new("Peinado", Money::from_units(20), 30),
                Service::new("Mechas", Money::from_units(60), 120),
            ],
            providers: vec![
                "Andrés".to_string(),
                "Alejandro".to_string(),
                "Adrián".to_string(),
            ],
        }
    }
}

impl Catalog {
    pub fn list_services(&self) -> &[Service] {
        &self.services
    }

    pub fn list_providers(&self) -> &[String] {
        &self.providers
    }

    /// Looks up a service by exact name.
    ///
    /// ## Example
    /// ```rust
    /// use salon_core::catalog::Catalog;
    ///
    /// let catalog = Catalog::default();
    /// assert_eq!(catalog.service("Tinte").unwrap().duration_minutes, 90);
    /// assert!(catalog.service("tinte").is_none());
    /// ```
    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }

    pub fn has_provider(&self, name: &str) -> bool {
        self.providers.iter().any(|p| p == name)
    }

    /// Shortest service duration, `None` for an empty catalog.
    pub fn shortest_duration(&self) -> Option<u32> {
        self.services.iter().map(|s| s.duration_minutes).min()
    }

    /// Checks the catalog is usable with a slot step of `slot_minutes`.
    ///
    /// ## Rules
    /// - at least one service and one provider
    /// - names are non-blank and unique
    /// - prices are not negative, durations are positive and at most a day
    /// - the step is no finer than the shortest service
    pub fn check_grid(&self, slot_minutes: u32) -> CoreResult<()> {
        if self.services.is_empty() {
            return Err(CoreError::InvalidCatalog("no services defined".to_string()));
        }
        if self.providers.is_empty() {
            return Err(CoreError::InvalidCatalog("no providers defined".to_string()));
        }

        for (i, service) in self.services.iter().enumerate() {
            if service.name.trim().is_empty() {
                return Err(CoreError::InvalidCatalog(format!(
                    "service #{} has no name",
                    i + 1
                )));
            }
            if self.services[..i].iter().any(|s| s.name == service.name) {
                return Err(CoreError::InvalidCatalog(format!(
                    "duplicate service '{}'",
                    service.name
                )));
            }
            if service.price_cents < 0 {
                return Err(CoreError::InvalidCatalog(format!(
                    "service '{}' has a negative price",
                    service.name
                )));
            }
            if service.duration_minutes == 0 {
                return Err(CoreError::InvalidCatalog(format!(
                    "service '{}' has no duration",
                    service.name
                )));
            }
            if service.duration_minutes > MINUTES_PER_DAY {
                return Err(CoreError::InvalidCatalog(format!(
                    "service '{}' lasts longer than a day",
                    service.name
                )));
            }
        }

        for (i, provider) in self.providers.iter().enumerate() {
            if provider.trim().is_empty() {
                return Err(CoreError::InvalidCatalog(format!(
                    "provider #{} has no name",
                    i + 1
                )));
            }
            if self.providers[..i].contains(provider) {
                return Err(CoreError::InvalidCatalog(format!(
                    "duplicate provider '{}'",
                    provider
                )));
            }
        }

        if let Some(shortest) = self.shortest_duration() {
            if slot_minutes < shortest {
                return Err(CoreError::InvalidCatalog(format!(
                    "slot step of {} minutes is finer than the shortest service ({} minutes)",
                    slot_minutes, shortest
                )));
            }
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
