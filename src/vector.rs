//! Componentwise arithmetic on positions and velocities.
//!
//! Every binary operation checks that both operands share a dimensionality
//! and fails with `Error::DimensionMismatch` instead of truncating to the
//! shorter of the two, the way `zip` on its own would.

use crate::result::{Error, Result};

fn check(expected: &[f64], got: &[f64]) -> Result<()> {
    if expected.len() == got.len() {
        Ok(())
    } else {
        Err(Error::DimensionMismatch {
            expected: expected.len(),
            got: got.len(),
        })
    }
}

/// `a + b`
pub fn add(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    check(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
}

/// `a - b`
pub fn sub(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    check(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
}

/// `a ⊙ b` (Hadamard product).
pub fn mul(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    check(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).collect())
}

/// `k * a`
pub fn scale(a: &[f64], k: f64) -> Vec<f64> {
    a.iter().map(|x| k * x).collect()
}

/// Adds `b` into `a` in place.
pub fn add_assign(a: &mut [f64], b: &[f64]) -> Result<()> {
    check(a, b)?;
    for (x, y) in a.iter_mut().zip(b) {
        *x += y;
    }
    Ok(())
}

/// Clamps every component of `a` into `[low, high]`.
pub fn clamp_into(a: &mut [f64], low: f64, high: f64) {
    for x in a.iter_mut() {
        *x = x.max(low).min(high);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elementwise_ops() {
        assert_eq!(add(&[1.0, 2.0], &[0.5, -2.0]).unwrap(), vec![1.5, 0.0]);
        assert_eq!(sub(&[1.0, 2.0], &[0.5, -2.0]).unwrap(), vec![0.5, 4.0]);
        assert_eq!(mul(&[1.0, 2.0], &[0.5, -2.0]).unwrap(), vec![0.5, -4.0]);
        assert_eq!(scale(&[1.0, -2.0], 3.0), vec![3.0, -6.0]);
    }

    #[test]
    fn mismatch_fails_fast() {
        match sub(&[1.0, 2.0, 3.0], &[1.0]) {
            Err(Error::DimensionMismatch { expected, got }) => {
                assert_eq!((expected, got), (3, 1));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        let mut a = vec![0.0; 2];
        assert!(add_assign(&mut a, &[1.0; 3]).is_err());
        assert_eq!(a, vec![0.0, 0.0]);
    }

    #[test]
    fn clamps_both_sides() {
        let mut a = vec![-11.0, 0.25, 42.0];
        clamp_into(&mut a, -10.0, 10.0);
        assert_eq!(a, vec![-10.0, 0.25, 10.0]);
    }
}
