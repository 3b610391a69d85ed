//! Invoice manager application layer: configuration, page view-models,
//! simulated email and terminal rendering on top of `invoicekit-store`.

pub mod config;
pub mod mailer;
pub mod pages;
pub mod render;

use invoicekit_core::Clock;
use invoicekit_store::{InvoiceState, InvoiceStore};

pub use config::{AppConfig, ConfigError};
pub use mailer::{EmailMessage, MailError, Mailer, SimulatedMailer};

/// Build the store the application starts with.
pub fn build_store<C: Clock>(config: &AppConfig, clock: C) -> InvoiceStore<C> {
    if config.seed_mock_data {
        InvoiceStore::seeded(clock)
    } else {
        InvoiceStore::with_clock(InvoiceState::new(), clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoicekit_core::SystemClock;

    #[test]
    fn seeding_follows_config() {
        let seeded = build_store(&AppConfig::default(), SystemClock);
        assert_eq!(seeded.all_invoices().len(), 2);

        let config = AppConfig {
            seed_mock_data: false,
            ..AppConfig::default()
        };
        assert!(build_store(&config, SystemClock).all_invoices().is_empty());
    }
}
