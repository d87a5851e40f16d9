//! Render
//!
//! Serializations of an assembled [`Dte`]: official JSON, the XML
//! representation and a plain-text mock PDF. All three read from the same
//! document value, so they cannot drift apart.

use super::Dte;

pub mod pdf;
pub mod xml;

/// Serializes the document as pretty-printed official JSON.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if serialization fails.
pub fn to_json(dte: &Dte) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(dte)
}

#[cfg(test)]
mod tests {
    use jiff::Zoned;
    use rand::{SeedableRng, rngs::StdRng};
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        cart::CartItem,
        catalog::Product,
        invoice::{Customer, Invoice},
    };

    use super::*;

    pub(super) fn sample_invoice() -> Invoice {
        Invoice::issue(
            "INV-1705314600000".to_string(),
            Customer {
                name: "Juan Pérez".to_string(),
                nit: "1234567-8".to_string(),
                email: "cliente@ejemplo.com".to_string(),
            },
            vec![CartItem {
                product: Product {
                    code: "3".to_string(),
                    name: "Kit de Herramientas Completo".to_string(),
                    price: Decimal::new(12_000, 2),
                    stock: 30,
                    category: "Herramientas".to_string(),
                    image: String::new(),
                },
                quantity: 2,
            }],
            jiff::civil::date(2024, 1, 15),
            None,
        )
    }

    pub(super) fn sample_dte(invoice: &Invoice) -> Dte {
        let issued_at: Zoned = "2024-01-15T10:30:00-06:00[-06:00]"
            .parse()
            .expect("valid timestamp literal");
        let mut rng = StdRng::seed_from_u64(5);

        Dte::from_invoice(invoice, &issued_at, &mut rng)
    }

    #[test]
    fn json_uses_official_field_names() -> TestResult {
        let invoice = sample_invoice();
        let json = to_json(&sample_dte(&invoice))?;

        assert!(json.contains("\"numeroControl\""), "json was: {json}");
        assert!(json.contains("\"codigoGeneracion\""), "json was: {json}");
        assert!(json.contains("\"cuerpoDocumento\""), "json was: {json}");
        assert!(json.contains("\"totalPagar\""), "json was: {json}");
        assert!(json.contains("\"codEstableMH\""), "json was: {json}");

        Ok(())
    }

    #[test]
    fn json_total_pagar_matches_invoice_total() -> TestResult {
        let invoice = sample_invoice();
        let json = to_json(&sample_dte(&invoice))?;
        let value: serde_json::Value = serde_json::from_str(&json)?;

        let total_pagar = value
            .pointer("/resumen/totalPagar")
            .and_then(serde_json::Value::as_f64)
            .ok_or("missing totalPagar")?;

        // 240.00 + 31.20
        assert!(
            (total_pagar - 271.2).abs() < f64::EPSILON,
            "totalPagar was {total_pagar}"
        );

        Ok(())
    }

    #[test]
    fn json_nulls_stay_null() -> TestResult {
        let invoice = sample_invoice();
        let json = to_json(&sample_dte(&invoice))?;
        let value: serde_json::Value = serde_json::from_str(&json)?;

        assert!(
            value
                .get("documentoRelacionado")
                .is_some_and(serde_json::Value::is_null),
            "documentoRelacionado must serialize as an explicit null"
        );

        Ok(())
    }
}
