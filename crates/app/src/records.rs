//! Records
//!
//! DTE records tracked alongside invoices: created pending at checkout,
//! decided (approved or rejected) by an administrator, never re-decided.

use std::fmt;

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Review status of a DTE record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DteRecordStatus {
    /// Awaiting an admin decision.
    Pending,

    /// Accepted.
    Approved,

    /// Refused.
    Rejected,
}

impl DteRecordStatus {
    /// Status name as stored and displayed.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for DteRecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from record operations.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    /// No record with the given id.
    #[error("DTE record {0} not found")]
    NotFound(String),

    /// The record already left the pending state.
    #[error("DTE record {id} was already {status}")]
    AlreadyDecided {
        /// Record id.
        id: String,
        /// Its settled status.
        status: DteRecordStatus,
    },
}

/// A tracked DTE record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DteRecord {
    /// Record id (`DTE-{millis}` for checkout-created records).
    pub id: String,

    /// Invoiced customer name.
    pub customer_name: String,

    /// Invoice total.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// Review status.
    pub status: DteRecordStatus,

    /// Creation date.
    pub date: Date,

    /// Placeholder link to the XML artifact.
    pub xml_url: String,

    /// Placeholder link to the PDF artifact.
    pub pdf_url: String,
}

impl DteRecord {
    /// Settles a pending record as approved or rejected.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::AlreadyDecided`] if the record is not pending.
    pub fn decide(&mut self, status: DteRecordStatus) -> Result<(), RecordError> {
        if self.status != DteRecordStatus::Pending {
            return Err(RecordError::AlreadyDecided {
                id: self.id.clone(),
                status: self.status,
            });
        }

        self.status = status;

        Ok(())
    }
}

/// The three demo records seeded into a fresh store.
#[must_use]
pub fn seed_records() -> Vec<DteRecord> {
    vec![
        DteRecord {
            id: "DTE-2024-001".to_string(),
            customer_name: "Juan Pérez Empresa S.A.".to_string(),
            amount: Decimal::new(143_500, 2),
            status: DteRecordStatus::Approved,
            date: jiff::civil::date(2024, 1, 15),
            xml_url: "#".to_string(),
            pdf_url: "#".to_string(),
        },
        DteRecord {
            id: "DTE-2024-002".to_string(),
            customer_name: "María González Comercial".to_string(),
            amount: Decimal::new(20_500, 2),
            status: DteRecordStatus::Pending,
            date: jiff::civil::date(2024, 1, 15),
            xml_url: "#".to_string(),
            pdf_url: "#".to_string(),
        },
        DteRecord {
            id: "DTE-2024-003".to_string(),
            customer_name: "Carlos Ruiz Deportes".to_string(),
            amount: Decimal::new(87_000, 2),
            status: DteRecordStatus::Rejected,
            date: jiff::civil::date(2024, 1, 14),
            xml_url: "#".to_string(),
            pdf_url: "#".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn pending() -> DteRecord {
        DteRecord {
            id: "DTE-1".to_string(),
            customer_name: "Juan Pérez".to_string(),
            amount: Decimal::new(11_300, 2),
            status: DteRecordStatus::Pending,
            date: jiff::civil::date(2024, 1, 15),
            xml_url: "#".to_string(),
            pdf_url: "#".to_string(),
        }
    }

    #[test]
    fn pending_record_can_be_approved() -> TestResult {
        let mut record = pending();

        record.decide(DteRecordStatus::Approved)?;

        assert_eq!(record.status, DteRecordStatus::Approved);

        Ok(())
    }

    #[test]
    fn decided_record_cannot_be_redecided() -> TestResult {
        let mut record = pending();

        record.decide(DteRecordStatus::Rejected)?;

        let result = record.decide(DteRecordStatus::Approved);

        assert_eq!(
            result,
            Err(RecordError::AlreadyDecided {
                id: "DTE-1".to_string(),
                status: DteRecordStatus::Rejected,
            })
        );

        Ok(())
    }

    #[test]
    fn seed_records_cover_all_statuses() {
        let seeded = seed_records();
        let statuses: Vec<DteRecordStatus> = seeded.iter().map(|record| record.status).collect();

        assert_eq!(seeded.len(), 3);
        assert!(statuses.contains(&DteRecordStatus::Approved));
        assert!(statuses.contains(&DteRecordStatus::Pending));
        assert!(statuses.contains(&DteRecordStatus::Rejected));
    }

    #[test]
    fn serde_matches_original_shape() -> TestResult {
        let json = serde_json::to_string(&pending())?;

        assert!(json.contains("\"customerName\""), "json was: {json}");
        assert!(json.contains("\"xmlUrl\""), "json was: {json}");
        assert!(json.contains("\"status\":\"pending\""), "json was: {json}");

        Ok(())
    }
}
