use core::fmt;
use core::num::NonZeroU32;

/// Declares a compact, typed identifier.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<Id>` to be pointer-optimized
/// - one type per entity so a `PipeId` can never index the junction table
macro_rules! typed_id {
    ($(#[$meta:meta])* $name:ident, $tag:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Create an id from a 0-based index by storing index+1.
            pub fn from_index(index: u32) -> Self {
                match NonZeroU32::new(index.wrapping_add(1)) {
                    Some(v) => Self(v),
                    None => panic!(concat!($tag, " index overflow")),
                }
            }

            /// Recover the 0-based index.
            pub fn index(self) -> u32 {
                self.0.get() - 1
            }

            /// The 0-based index as a `usize`, for vector lookups.
            pub fn slot(self) -> usize {
                self.index() as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "({})"), self.index())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.index())
            }
        }
    };
}

typed_id!(
    /// A junction (node) where pipes meet and demand may be withdrawn.
    JunctionId,
    "JunctionId"
);
typed_id!(
    /// A pipe between two junctions.
    PipeId,
    "PipeId"
);
typed_id!(
    /// A closed loop of pipes corrected as one unit.
    LoopId,
    "LoopId"
);
