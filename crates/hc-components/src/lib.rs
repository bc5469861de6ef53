//! hc-components: head-loss models for pipe network elements.
//!
//! Provides:
//! - the Hazen-Williams resistance coefficient calculator
//! - `HazenWilliamsPipe`, a pipe implementing `HeadLossModel`
//!
//! Models are pure functions of flow and immutable parameters, suitable for
//! loop-by-loop correction.
//!
//! # Example
//!
//! ```
//! use hc_components::{HazenWilliamsPipe, HeadLossModel};
//! use hc_core::units::{ft, inch};
//!
//! let pipe = HazenWilliamsPipe::new("P1", ft(1500.0), inch(10.0), 100.0).unwrap();
//! assert!(pipe.k() > 0.0);
//! assert!(pipe.head_loss(-0.5) < 0.0);
//! ```

pub mod error;
pub mod pipe;
pub mod traits;

// Re-exports
pub use error::{ComponentError, ComponentResult};
pub use pipe::{HazenWilliamsPipe, hazen_williams, hazen_williams_k};
pub use traits::HeadLossModel;
