//! hc-network: topology layer for pipe networks.
//!
//! Provides:
//! - Core data structures (Junction, Pipe, Loop, Network)
//! - Incremental network builder with validation
//! - Shared-pipe lookup for loop coupling
//!
//! # Example
//!
//! ```
//! use hc_network::{NetworkBuilder, Orientation};
//!
//! let mut builder = NetworkBuilder::new();
//! let a = builder.add_junction("A");
//! let b = builder.add_junction("B");
//! let c = builder.add_junction("C");
//! let p1 = builder.add_pipe("1", a, b);
//! let p2 = builder.add_pipe("2", b, c);
//! let p3 = builder.add_pipe("3", a, c);
//! builder.add_loop(
//!     "L1",
//!     [
//!         (p1, Orientation::Forward),
//!         (p2, Orientation::Forward),
//!         (p3, Orientation::Reverse),
//!     ],
//! );
//! let network = builder.build().unwrap();
//!
//! assert_eq!(network.pipes().len(), 3);
//! assert_eq!(network.loops().len(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod network;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::NetworkBuilder;
pub use error::{NetworkError, NetworkResult};
pub use network::{Junction, Loop, LoopMember, Network, Orientation, Pipe, SharedPipe};
