//! Typed parsing of free-form numeric input.

use diet_core::{Error, Result};

/// Parse a number, rejecting `nan` and infinities that `f64::from_str` accepts
pub fn parse_finite(raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::Validation(format!("{:?} is not a number", raw)))?;

    if !value.is_finite() {
        return Err(Error::Validation(format!(
            "{:?} is not a finite number",
            raw
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_and_negative_numbers() {
        assert_eq!(parse_finite("72.5").unwrap(), 72.5);
        assert_eq!(parse_finite(" -5 ").unwrap(), -5.0);
        assert_eq!(parse_finite("1e3").unwrap(), 1000.0);
    }

    #[test]
    fn test_rejects_non_finite() {
        for raw in ["nan", "NaN", "inf", "-inf", "infinity", "1e999"] {
            assert!(
                matches!(parse_finite(raw), Err(Error::Validation(_))),
                "{raw} accepted"
            );
        }
    }

    #[test]
    fn test_rejects_text() {
        let err = parse_finite("lots").unwrap_err();
        assert!(err.to_string().contains("\"lots\" is not a number"));
    }
}
