//! pgvector text literal codec and the L2 metric behind the `<->` operator.
//!
//! The literal is `[x1,x2,...]`: bracketed, comma-separated, plain decimal.
//! `f32`'s `Display` never emits exponent notation and always round-trips, so
//! it is used as-is for each component.

use std::fmt::Write as _;

use crate::error::CoreError;

/// Index of the first NaN or infinite component, if any.
pub fn first_non_finite(vector: &[f32]) -> Option<usize> {
    vector.iter().position(|v| !v.is_finite())
}

/// Render a vector as a pgvector literal. Non-finite components are rejected
/// because pgvector refuses them and they have no decimal spelling.
pub fn format_vector_literal(vector: &[f32]) -> Result<String, CoreError> {
    if let Some(index) = first_non_finite(vector) {
        return Err(CoreError::NonFiniteComponent { index });
    }
    let mut out = String::with_capacity(vector.len().saturating_mul(12).saturating_add(2));
    out.push('[');
    for (i, v) in vector.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        // Writing to a String cannot fail.
        let _ = write!(out, "{v}");
    }
    out.push(']');
    Ok(out)
}

/// Parse a pgvector literal as returned by `embedding::text`.
pub fn parse_vector_literal(literal: &str) -> Result<Vec<f32>, CoreError> {
    let inner = literal
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| CoreError::InvalidVectorLiteral(literal.to_owned()))?;
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    inner
        .split(',')
        .map(|part| {
            let value: f32 = part
                .trim()
                .parse()
                .map_err(|_| CoreError::InvalidVectorLiteral(literal.to_owned()))?;
            Ok(value)
        })
        .collect()
}

/// Euclidean distance between two equally sized vectors, accumulated in `f64`.
///
/// Extra components of the longer slice are ignored; callers check dimensions.
pub fn l2_distance(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = f64::from(*x) - f64::from(*y);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_has_no_spaces_or_trailing_separator() {
        let literal = format_vector_literal(&[0.123, -0.456, 1.0]).unwrap();
        assert_eq!(literal, "[0.123,-0.456,1]");
    }

    #[test]
    fn literal_never_uses_exponent_notation() {
        let literal = format_vector_literal(&[1e-7, 3.5e12, -2.5e-9]).unwrap();
        assert!(!literal.contains('e') && !literal.contains('E'), "{literal}");
        let parsed = parse_vector_literal(&literal).unwrap();
        assert_eq!(parsed, vec![1e-7, 3.5e12, -2.5e-9]);
    }

    #[test]
    fn empty_vector_literal() {
        assert_eq!(format_vector_literal(&[]).unwrap(), "[]");
        assert_eq!(parse_vector_literal("[]").unwrap(), Vec::<f32>::new());
    }

    #[test]
    fn non_finite_components_are_rejected() {
        assert_eq!(
            format_vector_literal(&[0.0, f32::NAN]),
            Err(CoreError::NonFiniteComponent { index: 1 })
        );
        assert_eq!(
            format_vector_literal(&[f32::INFINITY]),
            Err(CoreError::NonFiniteComponent { index: 0 })
        );
    }

    #[test]
    fn parse_accepts_pgvector_output() {
        assert_eq!(parse_vector_literal("[1,2.5,-3]").unwrap(), vec![1.0, 2.5, -3.0]);
        assert_eq!(parse_vector_literal(" [1, 2] ").unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert!(parse_vector_literal("1,2,3").is_err());
        assert!(parse_vector_literal("[1,,2]").is_err());
        assert!(parse_vector_literal("[1,2,]").is_err());
        assert!(parse_vector_literal("[a]").is_err());
    }

    #[test]
    fn l2_distance_matches_hand_computation() {
        assert_eq!(l2_distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(l2_distance(&[1.5, -2.0], &[1.5, -2.0]), 0.0);
    }
}
