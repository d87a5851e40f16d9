//! Mailer
//!
//! Simulated mail transport: a fixed artificial delay and a log line, no
//! real delivery. The delay is configurable so tests run instantly.

use std::{thread, time::Duration};

use bikestore::invoice::Invoice;
use tracing::info;

/// Fake transport that "sends" invoices by email.
#[derive(Debug, Clone)]
pub struct Mailer {
    delay: Duration,
}

impl Default for Mailer {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(2),
        }
    }
}

impl Mailer {
    /// Creates a mailer with the given artificial delay.
    #[must_use]
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// "Sends" an invoice, blocking for the configured delay.
    pub fn send_invoice(&self, invoice: &Invoice, email: &str) {
        thread::sleep(self.delay);

        info!(
            invoice = %invoice.id,
            email,
            total = %invoice.total,
            "invoice emailed with PDF, XML (DTE) and verification QR attachments"
        );
    }
}

#[cfg(test)]
mod tests {
    use bikestore::invoice::{Customer, Invoice};
    use std::time::Instant;

    use super::*;

    #[test]
    fn zero_delay_mailer_returns_immediately() {
        let mailer = Mailer::with_delay(Duration::ZERO);
        let invoice = Invoice::issue(
            "INV-1".to_string(),
            Customer {
                name: "Juan Pérez".to_string(),
                nit: "1234567-8".to_string(),
                email: "cliente@ejemplo.com".to_string(),
            },
            Vec::new(),
            jiff::civil::date(2024, 1, 15),
            None,
        );

        let started = Instant::now();

        mailer.send_invoice(&invoice, "cliente@ejemplo.com");

        assert!(
            started.elapsed() < Duration::from_millis(500),
            "zero-delay send must not block"
        );
    }
}
