use crate::HcError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, HcError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HcError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, HcError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(HcError::NonPositive { what, value: v })
    }
}

/// Sign of `v` with an exact zero mapped to 0.0.
///
/// `f64::signum` returns 1.0 for +0.0, which would give a zero flow a direction.
#[inline]
pub fn sign_or_zero(v: Real) -> Real {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
