//! Control
//!
//! Mock document numbering: the formatted control number and the generation
//! code. Both are fed from a caller-supplied RNG; neither is globally unique
//! nor fiscally valid, which is all the prototype needs.

use jiff::Timestamp;
use rand::Rng;
use uuid::{Builder, Uuid};

/// Prefix shared by every factura control number.
const PREFIJO: &str = "DTE-01";

/// Builds a control number: `DTE-01-{RANDOM8}-{MILLIS}`, where RANDOM8 is
/// eight uppercase base-36 characters and MILLIS is the emission Unix
/// millisecond timestamp with its first three digits dropped.
pub fn numero_control(rng: &mut impl Rng, issued_at: Timestamp) -> String {
    let aleatorio: String = (0..8)
        .map(|_| {
            char::from_digit(rng.gen_range(0..36), 36)
                .unwrap_or('0')
                .to_ascii_uppercase()
        })
        .collect();

    let millis = issued_at.as_millisecond().to_string();
    let cola: String = millis.chars().skip(3).collect();

    format!("{PREFIJO}-{aleatorio}-{cola}")
}

/// Builds a generation code: an uppercase UUID-v4-shaped string drawn from
/// the given RNG.
pub fn codigo_generacion(rng: &mut impl Rng) -> String {
    let uuid: Uuid = Builder::from_random_bytes(rng.r#gen()).into_uuid();

    uuid.to_string().to_uppercase()
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn issued_at() -> Timestamp {
        // 2024-01-15T10:30:00Z
        Timestamp::from_millisecond(1_705_314_600_000).unwrap_or_default()
    }

    #[test]
    fn numero_control_has_the_fixed_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let numero = numero_control(&mut rng, issued_at());
        let partes: Vec<&str> = numero.split('-').collect();

        assert_eq!(partes.first(), Some(&"DTE"));
        assert_eq!(partes.get(1), Some(&"01"));
        assert_eq!(partes.get(2).map(|p| p.len()), Some(8));
        assert!(
            partes
                .get(2)
                .is_some_and(|p| p.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())),
            "random block must be uppercase base-36, got {numero}"
        );
        // 1705314600000 with the first three digits dropped.
        assert_eq!(partes.get(3), Some(&"5314600000"));
    }

    #[test]
    fn numero_control_is_deterministic_for_a_seeded_rng() {
        let mut first = StdRng::seed_from_u64(42);
        let mut second = StdRng::seed_from_u64(42);

        assert_eq!(
            numero_control(&mut first, issued_at()),
            numero_control(&mut second, issued_at())
        );
    }

    #[test]
    fn codigo_generacion_is_an_uppercase_uuid() {
        let mut rng = StdRng::seed_from_u64(7);
        let codigo = codigo_generacion(&mut rng);

        assert_eq!(codigo.len(), 36);
        assert_eq!(codigo, codigo.to_uppercase());

        let segmentos: Vec<&str> = codigo.split('-').collect();
        let longitudes: Vec<usize> = segmentos.iter().map(|s| s.len()).collect();

        assert_eq!(longitudes, vec![8, 4, 4, 4, 12]);
        // Version nibble must read 4 (UUID v4 shape).
        assert_eq!(
            segmentos.get(2).and_then(|s| s.chars().next()),
            Some('4'),
            "generation code must look like a v4 UUID, got {codigo}"
        );
    }

    #[test]
    fn codigo_generacion_varies_with_the_rng() {
        let mut rng = StdRng::seed_from_u64(7);

        assert_ne!(codigo_generacion(&mut rng), codigo_generacion(&mut rng));
    }
}
