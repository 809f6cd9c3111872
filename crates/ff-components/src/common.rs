//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use ff_core::numeric::ensure_finite;

/// Resistances below this (ohm) are treated as zero when forming X/R.
pub const EPSILON_RESISTANCE: f64 = 1e-9;

/// Fallback impedance (ohm) when a rating would give a degenerate value.
///
/// Large enough that the component contributes almost nothing to a fault.
pub const FALLBACK_IMPEDANCE: f64 = 1e6;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, component: &str, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical {
        component: component.to_string(),
        what,
    })?;
    Ok(())
}

/// Ensure a rating is finite and strictly positive.
pub fn check_positive(value: f64, component: &str, what: &'static str) -> ComponentResult<()> {
    check_finite(value, component, what)?;
    if value <= 0.0 {
        return Err(ComponentError::NonPhysical {
            component: component.to_string(),
            what,
        });
    }
    Ok(())
}
