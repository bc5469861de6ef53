//! hc-core: shared foundation for the hardycross workspace.
//!
//! Contains:
//! - units (uom length type + feet / inch constructors)
//! - numeric (Real + finite/positive checks)
//! - ids (typed compact IDs for junctions, pipes and loops)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::HcError;
pub use ids::*;
pub use numeric::*;
pub use units::*;
