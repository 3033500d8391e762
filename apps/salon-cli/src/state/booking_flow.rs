//! # Booking Flow
//!
//! The client-side booking wizard as an explicit state machine.
//!
//! ## Steps
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Booking Wizard                                   │
//! │                                                                         │
//! │  SelectingService ──select_service──► SelectingProviderDate             │
//! │                                              │                          │
//! │                                   select_provider_date                  │
//! │                                              ▼                          │
//! │                                        SelectingTime                    │
//! │                                              │                          │
//! │                          select_time (must be an offered slot)          │
//! │                                              ▼                          │
//! │                                       EnteringContact                   │
//! │                                              │                          │
//! │            submit_contact ──► ReservationRequest ──► create_reservation │
//! │                                              │                          │
//! │                                          confirm                        │
//! │                                              ▼                          │
//! │                                         Confirmed                       │
//! │                                                                         │
//! │  back() steps one state toward SelectingService, keeping the choices   │
//! │  made before that step.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transitions are pure: each takes `&self` and returns the next state, so
//! a rejected step leaves the current one untouched. The flow checks only
//! what it can see (catalog membership, offered slots). The authoritative
//! checks run when the finished `ReservationRequest` is submitted.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use thiserror::Error;

use salon_core::schedule::format_hhmm;
use salon_core::{Catalog, Reservation, ReservationRequest};

/// A transition that is not allowed from the current step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// The action belongs to another step.
    #[error("Cannot {action} while {step}")]
    WrongStep {
        action: &'static str,
        step: &'static str,
    },

    /// Service not in the catalog.
    #[error("Unknown service: '{0}'")]
    UnknownService(String),

    /// Provider not in the catalog.
    #[error("Unknown provider: '{0}'")]
    UnknownProvider(String),

    /// The chosen time was not among the slots offered.
    #[error("Time slot {time} on {date} with {provider} is not available")]
    SlotUnavailable {
        provider: String,
        date: NaiveDate,
        time: String,
    },

    /// The confirmed reservation does not match the choices made.
    #[error("Reservation {0} does not match the booking in progress")]
    Mismatch(String),
}

/// Where the client is in the booking wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum BookingFlow {
    #[default]
    SelectingService,
    SelectingProviderDate {
        service: String,
    },
    SelectingTime {
        service: String,
        provider: String,
        date: NaiveDate,
    },
    EnteringContact {
        service: String,
        provider: String,
        date: NaiveDate,
        #[serde(with = "salon_core::schedule::hhmm")]
        time: NaiveTime,
    },
    Confirmed {
        reservation: Reservation,
    },
}

impl BookingFlow {
    /// Starts a new booking.
    pub fn new() -> Self {
        BookingFlow::default()
    }

    /// Name of the current step.
    pub fn step_name(&self) -> &'static str {
        match self {
            BookingFlow::SelectingService => "selecting service",
            BookingFlow::SelectingProviderDate { .. } => "selecting provider and date",
            BookingFlow::SelectingTime { .. } => "selecting time",
            BookingFlow::EnteringContact { .. } => "entering contact details",
            BookingFlow::Confirmed { .. } => "confirmed",
        }
    }

    fn wrong_step(&self, action: &'static str) -> FlowError {
        FlowError::WrongStep {
            action,
            step: self.step_name(),
        }
    }

    /// Picks a service from the catalog.
    pub fn select_service(&self, catalog: &Catalog, service: &str) -> Result<Self, FlowError> {
        match self {
            BookingFlow::SelectingService => {
                let service = catalog
                    .service(service.trim())
                    .ok_or_else(|| FlowError::UnknownService(service.to_string()))?;
                Ok(BookingFlow::SelectingProviderDate {
                    service: service.name.clone(),
                })
            }
            _ => Err(self.wrong_step("select a service")),
        }
    }

    /// Picks the stylist and the day.
    pub fn select_provider_date(
        &self,
        catalog: &Catalog,
        provider: &str,
        date: NaiveDate,
    ) -> Result<Self, FlowError> {
        match self {
            BookingFlow::SelectingProviderDate { service } => {
                let provider = provider.trim();
                if !catalog.has_provider(provider) {
                    return Err(FlowError::UnknownProvider(provider.to_string()));
                }
                Ok(BookingFlow::SelectingTime {
                    service: service.clone(),
                    provider: provider.to_string(),
                    date,
                })
            }
            _ => Err(self.wrong_step("select a provider and date")),
        }
    }

    /// Picks one of the `offered` start times.
    pub fn select_time(&self, time: NaiveTime, offered: &[NaiveTime]) -> Result<Self, FlowError> {
        match self {
            BookingFlow::SelectingTime {
                service,
                provider,
                date,
            } => {
                if !offered.contains(&time) {
                    return Err(FlowError::SlotUnavailable {
                        provider: provider.clone(),
                        date: *date,
                        time: format_hhmm(time),
                    });
                }
                Ok(BookingFlow::EnteringContact {
                    service: service.clone(),
                    provider: provider.clone(),
                    date: *date,
                    time,
                })
            }
            _ => Err(self.wrong_step("select a time")),
        }
    }

    /// Turns the choices plus contact details into a request to submit.
    ///
    /// The flow stays in `EnteringContact` until [`BookingFlow::confirm`]
    /// receives the stored reservation.
    pub fn submit_contact(
        &self,
        client_name: &str,
        client_phone: &str,
        client_email: Option<&str>,
    ) -> Result<ReservationRequest, FlowError> {
        match self {
            BookingFlow::EnteringContact {
                service,
                provider,
                date,
                time,
            } => Ok(ReservationRequest {
                service_name: service.clone(),
                provider_name: provider.clone(),
                date: Some(*date),
                start_time: Some(*time),
                client_name: client_name.to_string(),
                client_phone: client_phone.to_string(),
                client_email: client_email.map(str::to_string),
            }),
            _ => Err(self.wrong_step("submit contact details")),
        }
    }

    /// Records the reservation the ledger stored for this booking.
    pub fn confirm(&self, reservation: Reservation) -> Result<Self, FlowError> {
        match self {
            BookingFlow::EnteringContact {
                service,
                provider,
                date,
                time,
            } => {
                let matches = reservation.service_name == *service
                    && reservation.provider_name == *provider
                    && reservation.date == *date
                    && reservation.start_time == *time;
                if !matches {
                    return Err(FlowError::Mismatch(reservation.id));
                }
                Ok(BookingFlow::Confirmed { reservation })
            }
            _ => Err(self.wrong_step("confirm")),
        }
    }

    /// Steps back one state. A confirmed booking starts over.
    pub fn back(&self) -> Self {
        match self {
            BookingFlow::SelectingService | BookingFlow::SelectingProviderDate { .. } => {
                BookingFlow::SelectingService
            }
            BookingFlow::SelectingTime { service, .. } => BookingFlow::SelectingProviderDate {
                service: service.clone(),
            },
            BookingFlow::EnteringContact {
                service,
                provider,
                date,
                ..
            } => BookingFlow::SelectingTime {
                service: service.clone(),
                provider: provider.clone(),
                date: *date,
            },
            BookingFlow::Confirmed { .. } => BookingFlow::SelectingService,
        }
    }
}
