//! Core traits for head-loss models.

use hc_core::Real;

/// A pipe element whose head loss is a function of its volumetric flow.
///
/// Flow `q` is signed in the pipe's reference direction (from → to). Head loss
/// carries the same sign as the flow, so a model is an odd function of `q`.
pub trait HeadLossModel: Send + Sync {
    /// Name for debugging and reporting.
    fn name(&self) -> &str;

    /// Signed head loss (ft) for a signed flow (cfs).
    ///
    /// Zero flow yields zero head loss.
    fn head_loss(&self, q: Real) -> Real;

    /// Derivative of head-loss magnitude with respect to |q|.
    ///
    /// Always non-negative; zero at zero flow.
    fn slope(&self, q: Real) -> Real;
}
