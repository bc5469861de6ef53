//! Pipe component with friction using the Hazen-Williams correlation.

use crate::error::{ComponentError, ComponentResult};
use crate::traits::HeadLossModel;
use hc_core::numeric::{ensure_positive, sign_or_zero};
use hc_core::units::{Length, in_feet, in_inches};
use hc_core::Real;

/// Hazen-Williams constants for the US customary convention.
///
/// Length in feet, diameter in inches, flow in cubic feet per second, head in
/// feet. `UNIT_CONSTANT` is only valid for that combination; any other unit
/// system needs a different constant.
pub mod hazen_williams {
    use hc_core::Real;

    /// Flow exponent n in h = k·|Q|^n.
    pub const FLOW_EXPONENT: Real = 1.852;

    /// Empirical exponent on the diameter.
    pub const DIAMETER_EXPONENT: Real = 4.8704;

    /// Unit-system constant (ft, in, cfs).
    pub const UNIT_CONSTANT: Real = 4.727;
}

/// Resistance coefficient k = 4.727·L / (C^1.852 · D^4.8704).
///
/// `length` is read in feet and `diameter` in inches. `roughness` is the
/// dimensionless C factor. Every input must be finite and strictly positive.
pub fn hazen_williams_k(length: Length, roughness: Real, diameter: Length) -> ComponentResult<Real> {
    use hazen_williams::*;

    let l_ft = pipe_parameter(in_feet(length), "length")?;
    let c = pipe_parameter(roughness, "roughness")?;
    let d_in = pipe_parameter(in_inches(diameter), "diameter")?;

    let k = (UNIT_CONSTANT * l_ft) / (c.powf(FLOW_EXPONENT) * d_in.powf(DIAMETER_EXPONENT));
    pipe_parameter(k, "resistance coefficient")
}

fn pipe_parameter(value: Real, what: &'static str) -> ComponentResult<Real> {
    ensure_positive(value, what).map_err(|_| ComponentError::InvalidPipeParameter { what, value })
}

/// Pipe with friction using the Hazen-Williams head-loss law.
///
/// The coefficient is computed once in `new` and never changes.
#[derive(Debug, Clone)]
pub struct HazenWilliamsPipe {
    name: String,
    /// Pipe length
    pub length: Length,
    /// Pipe inner diameter
    pub diameter: Length,
    /// Hazen-Williams C factor
    pub roughness: Real,
    k: Real,
}

impl HazenWilliamsPipe {
    /// Create a new pipe, rejecting non-positive geometry or roughness.
    pub fn new(
        name: impl Into<String>,
        length: Length,
        diameter: Length,
        roughness: Real,
    ) -> ComponentResult<Self> {
        let k = hazen_williams_k(length, roughness, diameter)?;
        Ok(Self {
            name: name.into(),
            length,
            diameter,
            roughness,
            k,
        })
    }

    /// Resistance coefficient (ft per cfs^1.852).
    pub fn k(&self) -> Real {
        self.k
    }
}

impl HeadLossModel for HazenWilliamsPipe {
    fn name(&self) -> &str {
        &self.name
    }

    fn head_loss(&self, q: Real) -> Real {
        // |0|^n is 0 for n > 0, sign_or_zero keeps the product at 0
        self.k * q.abs().powf(hazen_williams::FLOW_EXPONENT) * sign_or_zero(q)
    }

    fn slope(&self, q: Real) -> Real {
        let n = hazen_williams::FLOW_EXPONENT;
        if q == 0.0 {
            return 0.0;
        }
        n * self.k * q.abs().powf(n - 1.0)
    }
}
