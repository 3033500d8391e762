//! # Catalog Commands
//!
//! Read-only access to the configured services and providers.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::ConfigState;
use salon_core::Service;

/// Service as shown to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDto {
    pub name: String,
    pub price_cents: i64,
    /// Price with the shop's currency symbol, e.g. "15.00€"
    pub price: String,
    pub duration_minutes: u32,
}

impl ServiceDto {
    fn from_service(service: &Service, config: &ConfigState) -> Self {
        ServiceDto {
            name: service.name.clone(),
            price_cents: service.price_cents,
            price: config.format_currency(service.price_cents),
            duration_minutes: service.duration_minutes,
        }
    }
}

/// Lists the services, in catalog order.
pub fn list_services(config: &ConfigState) -> Vec<ServiceDto> {
    debug!("list_services command");

    config
        .catalog
        .list_services()
        .iter()
        .map(|s| ServiceDto::from_service(s, config))
        .collect()
}

/// Lists the providers, in catalog order.
pub fn list_providers(config: &ConfigState) -> Vec<String> {
    debug!("list_providers command");
    config.catalog.list_providers().to_vec()
}
