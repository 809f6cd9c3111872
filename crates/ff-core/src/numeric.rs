use crate::FfError;

/// Floating point type used throughout system
pub type Real = f64;

/// Denominators with magnitude below this are treated as zero.
pub const NEAR_ZERO: Real = 1e-12;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, FfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FfError::NonFinite { what, value: v })
    }
}

/// Outcome of a division whose denominator may be degenerate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Guarded {
    pub value: Real,
    /// True when `value` is the fallback rather than the quotient.
    pub fell_back: bool,
}

/// Divide `num` by `den`, returning `fallback` when the denominator is
/// near zero or the quotient is not finite.
pub fn guarded_div(num: Real, den: Real, fallback: Real) -> Guarded {
    if den.abs() < NEAR_ZERO || !den.is_finite() {
        return Guarded {
            value: fallback,
            fell_back: true,
        };
    }
    let q = num / den;
    if q.is_finite() {
        Guarded {
            value: q,
            fell_back: false,
        }
    } else {
        Guarded {
            value: fallback,
            fell_back: true,
        }
    }
}
