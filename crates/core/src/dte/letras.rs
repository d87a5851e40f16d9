//! Letras
//!
//! Spanish amount-in-words rendering for the DTE summary (`totalLetras`).
//! Uppercase, dollar-denominated, with the irregular forms the language
//! demands: `VEINTI`-contraction for 21–29, `CIEN` for exactly one hundred.
//! Three-digit groups beyond 999 fall back to their digit string.

use std::fmt::Write;

use rust_decimal::{Decimal, prelude::ToPrimitive};

/// Renders a USD amount in Spanish words.
#[must_use]
pub fn numero_a_letras(amount: Decimal) -> String {
    if amount.is_zero() {
        return "CERO DÓLARES".to_string();
    }

    let entero = amount.trunc().to_u64().unwrap_or_default();
    let centavos = ((amount.fract()) * Decimal::ONE_HUNDRED)
        .round()
        .to_u64()
        .unwrap_or_default();

    let mut resultado = String::new();

    if entero >= 1000 {
        let miles = entero / 1000;
        let resto = entero % 1000;

        _ = write!(resultado, "{} MIL", grupo(miles));

        if resto > 0 {
            _ = write!(resultado, " {}", grupo(resto));
        }
    } else if entero > 0 {
        resultado.push_str(&grupo(entero));
    }

    if !resultado.is_empty() {
        resultado.push(' ');
    }

    resultado.push_str(if entero == 1 { "DÓLAR" } else { "DÓLARES" });

    if centavos > 0 {
        _ = write!(
            resultado,
            " CON {} {}",
            grupo(centavos),
            if centavos == 1 { "CENTAVO" } else { "CENTAVOS" }
        );
    }

    resultado
}

/// Words for a number below 1000; empty for zero, digits beyond 999.
fn grupo(n: u64) -> String {
    match n {
        0 => String::new(),
        1..=9 => unidad(n).to_string(),
        10..=19 => teen(n).to_string(),
        20 => "VEINTE".to_string(),
        21..=29 => format!("VEINTI{}", grupo(n - 20)),
        30..=99 => {
            let palabra = decena(n / 10);
            let resto = n % 10;

            if resto > 0 {
                format!("{palabra} Y {}", grupo(resto))
            } else {
                palabra.to_string()
            }
        }
        100 => "CIEN".to_string(),
        101..=999 => {
            let palabra = centena(n / 100);
            let resto = n % 100;

            if resto > 0 {
                format!("{palabra} {}", grupo(resto))
            } else {
                palabra.to_string()
            }
        }
        _ => n.to_string(),
    }
}

fn unidad(n: u64) -> &'static str {
    match n {
        1 => "UNO",
        2 => "DOS",
        3 => "TRES",
        4 => "CUATRO",
        5 => "CINCO",
        6 => "SEIS",
        7 => "SIETE",
        8 => "OCHO",
        9 => "NUEVE",
        _ => "",
    }
}

fn teen(n: u64) -> &'static str {
    match n {
        10 => "DIEZ",
        11 => "ONCE",
        12 => "DOCE",
        13 => "TRECE",
        14 => "CATORCE",
        15 => "QUINCE",
        16 => "DIECISÉIS",
        17 => "DIECISIETE",
        18 => "DIECIOCHO",
        19 => "DIECINUEVE",
        _ => "",
    }
}

fn decena(n: u64) -> &'static str {
    match n {
        2 => "VEINTE",
        3 => "TREINTA",
        4 => "CUARENTA",
        5 => "CINCUENTA",
        6 => "SESENTA",
        7 => "SETENTA",
        8 => "OCHENTA",
        9 => "NOVENTA",
        _ => "",
    }
}

fn centena(n: u64) -> &'static str {
    match n {
        1 => "CIENTO",
        2 => "DOSCIENTOS",
        3 => "TRESCIENTOS",
        4 => "CUATROCIENTOS",
        5 => "QUINIENTOS",
        6 => "SEISCIENTOS",
        7 => "SETECIENTOS",
        8 => "OCHOCIENTOS",
        9 => "NOVECIENTOS",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: f64) -> Decimal {
        use rust_decimal::prelude::FromPrimitive;

        Decimal::from_f64(value).unwrap_or_default()
    }

    #[test]
    fn zero_is_cero_dolares() {
        assert_eq!(numero_a_letras(Decimal::ZERO), "CERO DÓLARES");
    }

    #[test]
    fn one_dollar_is_singular() {
        assert_eq!(numero_a_letras(Decimal::ONE), "UNO DÓLAR");
    }

    #[test]
    fn veinti_contraction_below_thirty() {
        assert_eq!(numero_a_letras(dec(21.0)), "VEINTIUNO DÓLARES");
        assert_eq!(numero_a_letras(dec(29.0)), "VEINTINUEVE DÓLARES");
        assert_eq!(numero_a_letras(dec(20.0)), "VEINTE DÓLARES");
    }

    #[test]
    fn y_joins_tens_from_thirty() {
        assert_eq!(numero_a_letras(dec(32.0)), "TREINTA Y DOS DÓLARES");
        assert_eq!(numero_a_letras(dec(99.0)), "NOVENTA Y NUEVE DÓLARES");
    }

    #[test]
    fn exactly_one_hundred_is_cien() {
        assert_eq!(numero_a_letras(dec(100.0)), "CIEN DÓLARES");
    }

    #[test]
    fn above_one_hundred_uses_ciento() {
        assert_eq!(numero_a_letras(dec(116.0)), "CIENTO DIECISÉIS DÓLARES");
        assert_eq!(
            numero_a_letras(dec(545.0)),
            "QUINIENTOS CUARENTA Y CINCO DÓLARES"
        );
    }

    #[test]
    fn thousands_decompose_recursively() {
        assert_eq!(
            numero_a_letras(dec(2125.0)),
            "DOS MIL CIENTO VEINTICINCO DÓLARES"
        );
        assert_eq!(numero_a_letras(dec(1000.0)), "UNO MIL DÓLARES");
    }

    #[test]
    fn cents_append_with_con() {
        assert_eq!(
            numero_a_letras(dec(1435.50)),
            "UNO MIL CUATROCIENTOS TREINTA Y CINCO DÓLARES CON CINCUENTA CENTAVOS"
        );
        assert_eq!(numero_a_letras(dec(0.01)), "DÓLARES CON UNO CENTAVO");
    }

    #[test]
    fn millions_fall_back_to_digits() {
        assert_eq!(numero_a_letras(dec(2_500_000.0)), "2500 MIL DÓLARES");
    }
}
