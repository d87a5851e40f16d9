//! Checkout
//!
//! Payment data captured at checkout and its presence validation (the
//! original form's required fields, expressed as errors).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Card payment.
    Card,

    /// Bank transfer.
    Transfer,
}

/// Data captured by the payment form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentData {
    /// Customer name or razón social.
    pub customer_name: String,

    /// Customer tax id.
    #[serde(rename = "customerNIT")]
    pub customer_nit: String,

    /// Customer email.
    pub customer_email: String,

    /// Selected payment method.
    pub payment_method: PaymentMethod,

    /// Card number, for card payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,

    /// Card expiry, for card payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,

    /// Card verification value, for card payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvv: Option<String>,

    /// Account number, for transfers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
}

/// Validation errors for payment data.
#[derive(Debug, Error, PartialEq)]
pub enum PaymentError {
    /// A customer identity field was blank.
    #[error("customer name, tax id and email are required")]
    MissingCustomerDetails,

    /// Card payment without complete card details.
    #[error("card payments require number, expiry date and cvv")]
    MissingCardDetails,

    /// Transfer payment without an account number.
    #[error("transfer payments require an account number")]
    MissingAccountDetails,
}

impl PaymentData {
    /// Checks that every field the selected method needs is present.
    ///
    /// # Errors
    ///
    /// Returns a [`PaymentError`] naming the first missing group.
    pub fn validate(&self) -> Result<(), PaymentError> {
        if self.customer_name.trim().is_empty()
            || self.customer_nit.trim().is_empty()
            || self.customer_email.trim().is_empty()
        {
            return Err(PaymentError::MissingCustomerDetails);
        }

        match self.payment_method {
            PaymentMethod::Card => {
                let complete = [&self.card_number, &self.expiry_date, &self.cvv]
                    .into_iter()
                    .all(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()));

                if complete {
                    Ok(())
                } else {
                    Err(PaymentError::MissingCardDetails)
                }
            }
            PaymentMethod::Transfer => {
                if self
                    .account_number
                    .as_deref()
                    .is_some_and(|v| !v.trim().is_empty())
                {
                    Ok(())
                } else {
                    Err(PaymentError::MissingAccountDetails)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_payment() -> PaymentData {
        PaymentData {
            customer_name: "Juan Pérez".to_string(),
            customer_nit: "1234567-8".to_string(),
            customer_email: "cliente@ejemplo.com".to_string(),
            payment_method: PaymentMethod::Card,
            card_number: Some("4111111111111111".to_string()),
            expiry_date: Some("12/26".to_string()),
            cvv: Some("123".to_string()),
            account_number: None,
        }
    }

    #[test]
    fn complete_card_payment_validates() {
        assert_eq!(card_payment().validate(), Ok(()));
    }

    #[test]
    fn card_without_cvv_is_rejected() {
        let mut payment = card_payment();

        payment.cvv = None;

        assert_eq!(payment.validate(), Err(PaymentError::MissingCardDetails));
    }

    #[test]
    fn transfer_requires_account_number() {
        let mut payment = card_payment();

        payment.payment_method = PaymentMethod::Transfer;
        payment.account_number = None;

        assert_eq!(payment.validate(), Err(PaymentError::MissingAccountDetails));

        payment.account_number = Some("001-123456".to_string());

        assert_eq!(payment.validate(), Ok(()));
    }

    #[test]
    fn blank_customer_fields_are_rejected() {
        let mut payment = card_payment();

        payment.customer_nit = "   ".to_string();

        assert_eq!(
            payment.validate(),
            Err(PaymentError::MissingCustomerDetails)
        );
    }

    #[test]
    fn serde_uses_original_field_names() {
        let json = serde_json::to_string(&card_payment()).unwrap_or_default();

        assert!(json.contains("\"customerNIT\""), "json was: {json}");
        assert!(json.contains("\"paymentMethod\":\"card\""), "json was: {json}");
    }
}
