use log::trace;

use super::model::{BaseUnit, Quantity};
use crate::error::{Result, UnitError, ValidationError};

/// SI prefixes accepted in query units. Micro has three spellings.
const SI_PREFIXES: [(&str, f64); 19] = [
    ("y", 1e-24),
    ("z", 1e-21),
    ("a", 1e-18),
    ("f", 1e-15),
    ("p", 1e-12),
    ("n", 1e-9),
    ("u", 1e-6),
    ("µ", 1e-6),
    ("μ", 1e-6),
    ("m", 1e-3),
    ("c", 1e-2),
    ("d", 1e-1),
    ("", 1.0),
    ("da", 1e1),
    ("h", 1e2),
    ("k", 1e3),
    ("M", 1e6),
    ("G", 1e9),
    ("T", 1e12),
];

/// Scale factor for an SI prefix, `None` if the prefix is not known.
pub fn prefix_factor(prefix: &str) -> Option<f64> {
    SI_PREFIXES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|&(_, factor)| factor)
}

/// Every prefix spelling in the SI table.
pub fn prefixes() -> impl Iterator<Item = (&'static str, f64)> {
    SI_PREFIXES.iter().copied()
}

/// Normalize a quantity to `expected` base units (volts or hertz).
pub fn parse_quantity(q: &Quantity, expected: BaseUnit) -> Result<f64> {
    let value = match q {
        Quantity::Number(n) => *n,
        Quantity::Pair(n, unit) | Quantity::KeyValue { value: n, unit } => {
            convert_with_unit(*n, unit, expected)?
        }
        Quantity::Text(s) => {
            let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
            let split = compact
                .char_indices()
                .find(|&(_, c)| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | ',')))
                .map(|(i, _)| i)
                .unwrap_or(compact.len());
            let (literal, unit) = compact.split_at(split);
            let n = coerce_number(literal)?;
            let unit = if unit.is_empty() { expected.symbol() } else { unit };
            convert_with_unit(n, unit, expected)?
        }
    };
    trace!("normalized {q} to {value} {expected}");
    Ok(value)
}

/// Like [`parse_quantity`] but with the base given as a string, as it
/// arrives from JSON or the command line.
pub fn parse_quantity_str(q: &Quantity, expected: &str) -> Result<f64> {
    let base: BaseUnit = expected.parse()?;
    parse_quantity(q, base)
}

/// Scale `value` by the SI prefix carried in `unit`.
///
/// `unit` may end in `V` or `Hz` (case-insensitive), in which case the base
/// must equal `expected`; otherwise the whole token is read as a prefix of
/// the expected base.
pub fn convert_with_unit(value: f64, unit: &str, expected: BaseUnit) -> Result<f64, UnitError> {
    let unit = unit.trim();
    let (prefix, base) = split_base(unit).unwrap_or((unit, expected.symbol()));

    if base != expected.symbol() {
        return Err(UnitError::BaseMismatch {
            found: base.to_string(),
            expected: expected.symbol().to_string(),
        });
    }

    let factor =
        prefix_factor(prefix).ok_or_else(|| UnitError::UnknownPrefix(prefix.to_string()))?;
    Ok(value * factor)
}

/// Split a unit token into (prefix, base symbol) if it ends in a base symbol.
fn split_base(unit: &str) -> Option<(&str, &'static str)> {
    if unit.len() >= 2 {
        let cut = unit.len() - 2;
        if let Some(tail) = unit.get(cut..) {
            if tail.eq_ignore_ascii_case("hz") {
                return Some((&unit[..cut], "Hz"));
            }
        }
    }
    let stripped = unit.strip_suffix('V').or_else(|| unit.strip_suffix('v'))?;
    Some((stripped, "V"))
}

/// Parse a decimal literal, accepting `,` as the decimal separator.
pub(crate) fn coerce_number(s: &str) -> Result<f64, ValidationError> {
    s.trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidNumber(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;

    #[test]
    fn every_prefix_scales_volts_and_hertz() {
        for (prefix, factor) in prefixes() {
            let volts = convert_with_unit(1.0, &format!("{prefix}V"), BaseUnit::Volt).unwrap();
            assert_eq!(volts, factor, "prefix '{prefix}' on V");

            let hertz = convert_with_unit(1.0, &format!("{prefix}Hz"), BaseUnit::Hertz).unwrap();
            assert_eq!(hertz, factor, "prefix '{prefix}' on Hz");
        }
    }

    #[test]
    fn base_suffix_is_case_insensitive() {
        assert_eq!(convert_with_unit(2.0, "khz", BaseUnit::Hertz).unwrap(), 2e3);
        assert_eq!(convert_with_unit(2.0, "kHZ", BaseUnit::Hertz).unwrap(), 2e3);
        assert_eq!(convert_with_unit(2.0, "mv", BaseUnit::Volt).unwrap(), 2e-3);
    }

    #[test]
    fn bare_prefix_defaults_to_expected_base() {
        assert_eq!(convert_with_unit(5.0, "k", BaseUnit::Hertz).unwrap(), 5e3);
        assert_eq!(convert_with_unit(5.0, "", BaseUnit::Volt).unwrap(), 5.0);
        assert_eq!(convert_with_unit(5.0, " m ", BaseUnit::Volt).unwrap(), 5e-3);
    }

    #[test]
    fn base_mismatch_is_rejected() {
        for v in [0.0, 1.0, -3.5, 1e9] {
            assert_eq!(
                convert_with_unit(v, "kHz", BaseUnit::Volt),
                Err(UnitError::BaseMismatch {
                    found: "Hz".into(),
                    expected: "V".into()
                })
            );
        }
        assert!(matches!(
            convert_with_unit(1.0, "mV", BaseUnit::Hertz),
            Err(UnitError::BaseMismatch { .. })
        ));
    }

    #[test]
    fn unknown_prefix_is_rejected() {
        assert_eq!(
            convert_with_unit(1.0, "xV", BaseUnit::Volt),
            Err(UnitError::UnknownPrefix("x".into()))
        );
        assert_eq!(
            convert_with_unit(1.0, "Ohm", BaseUnit::Volt),
            Err(UnitError::UnknownPrefix("Ohm".into()))
        );
    }

    #[test]
    fn text_quantities() {
        let cases = [
            ("0.5 V", BaseUnit::Volt, 0.5),
            ("500mV", BaseUnit::Volt, 0.5),
            ("0,5 kV", BaseUnit::Volt, 500.0),
            ("10 kHz", BaseUnit::Hertz, 1e4),
            ("200kHz", BaseUnit::Hertz, 2e5),
            ("12", BaseUnit::Hertz, 12.0),
            ("  7  ", BaseUnit::Volt, 7.0),
            ("-2 mV", BaseUnit::Volt, -2e-3),
            ("3 k", BaseUnit::Hertz, 3e3),
        ];
        for (text, base, expected) in cases {
            let got = parse_quantity(&Quantity::from(text), base).unwrap();
            assert_eq!(got, expected, "parsing '{text}'");
        }
    }

    #[test]
    fn structured_quantities() {
        assert_eq!(parse_quantity(&Quantity::Number(500.0), BaseUnit::Volt).unwrap(), 500.0);
        assert_eq!(
            parse_quantity(&Quantity::from((50.0, "kHz")), BaseUnit::Hertz).unwrap(),
            5e4
        );
        let kv = Quantity::KeyValue {
            value: 10.0,
            unit: "V".into(),
        };
        assert_eq!(parse_quantity(&kv, BaseUnit::Volt).unwrap(), 10.0);
    }

    #[test]
    fn text_without_number_is_a_validation_error() {
        assert!(matches!(
            parse_quantity(&Quantity::from("kHz"), BaseUnit::Hertz),
            Err(LookupError::Validation(ValidationError::InvalidNumber(_)))
        ));
        assert!(matches!(
            parse_quantity(&Quantity::from("1.2.3 V"), BaseUnit::Volt),
            Err(LookupError::Validation(ValidationError::InvalidNumber(_)))
        ));
    }

    #[test]
    fn string_base_must_be_known() {
        assert!(matches!(
            parse_quantity_str(&Quantity::Number(1.0), "A"),
            Err(LookupError::Validation(ValidationError::InvalidBase(_)))
        ));
        assert_eq!(parse_quantity_str(&Quantity::from("1 kHz"), "Hz").unwrap(), 1e3);
    }
}
