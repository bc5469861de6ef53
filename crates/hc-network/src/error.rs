//! Network-specific error types.

/// Network construction and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// A pipe refers to a junction that doesn't exist.
    UnknownJunction { pipe: String, junction: u32 },

    /// A pipe starts and ends at the same junction.
    SelfLoopPipe { pipe: String },

    /// Two entities of the same kind share a name.
    DuplicateName { kind: &'static str, name: String },

    /// A loop has no members.
    EmptyLoop { loop_name: String },

    /// A loop member refers to a pipe that doesn't exist.
    UnknownPipe { loop_name: String, pipe: u32 },

    /// A pipe is listed more than once in the same loop.
    RepeatedPipe { loop_name: String, pipe: String },

    /// Traversing the loop in its orientation does not return to the start.
    OpenLoop { loop_name: String, junction: String },

    /// The loop's pipes form more than one connected piece.
    DisconnectedLoop { loop_name: String },

    /// A pipe belongs to more than two loops.
    OverShared { pipe: String, loops: usize },

    /// Name not found in the lookup tables.
    NameNotFound { what: &'static str, name: String },
}

pub type NetworkResult<T> = Result<T, NetworkError>;

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::UnknownJunction { pipe, junction } => {
                write!(f, "Pipe {} refers to non-existent junction {}", pipe, junction)
            }
            NetworkError::SelfLoopPipe { pipe } => {
                write!(f, "Pipe {} starts and ends at the same junction", pipe)
            }
            NetworkError::DuplicateName { kind, name } => {
                write!(f, "Duplicate {} name {}", kind, name)
            }
            NetworkError::EmptyLoop { loop_name } => {
                write!(f, "Loop {} has no pipes", loop_name)
            }
            NetworkError::UnknownPipe { loop_name, pipe } => {
                write!(f, "Loop {} refers to non-existent pipe {}", loop_name, pipe)
            }
            NetworkError::RepeatedPipe { loop_name, pipe } => {
                write!(f, "Loop {} lists pipe {} more than once", loop_name, pipe)
            }
            NetworkError::OpenLoop { loop_name, junction } => {
                write!(
                    f,
                    "Loop {} is not closed: traversal is unbalanced at junction {}",
                    loop_name, junction
                )
            }
            NetworkError::DisconnectedLoop { loop_name } => {
                write!(f, "Loop {} is not a single connected path", loop_name)
            }
            NetworkError::OverShared { pipe, loops } => {
                write!(
                    f,
                    "Pipe {} belongs to {} loops (a pipe may be shared by at most 2)",
                    pipe, loops
                )
            }
            NetworkError::NameNotFound { what, name } => {
                write!(f, "{} {} not found", what, name)
            }
        }
    }
}

impl std::error::Error for NetworkError {}
