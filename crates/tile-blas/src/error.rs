//! Error types for tile algorithms.

use thiserror::Error;

/// Errors that can occur while decomposing or executing a tile algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileError {
    /// A prior operation sharing the same sequence already failed.
    #[error("Sequence already failed: a prior operation in this computation did not complete")]
    Sequence,

    /// An argument to a driver routine is invalid.
    ///
    /// `arg` is the 1-based position of the offending parameter.
    #[error("Illegal value of argument {arg} ({name}): {reason}")]
    InvalidArgument {
        /// Position of the argument in the driver signature.
        arg: usize,
        /// Name of the argument.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Tiled operands do not conform to each other.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A tile handle names a tile outside its matrix.
    #[error("Tile ({row}, {col}) is outside the {mt}x{nt} tile grid")]
    TileOutOfRange {
        /// Requested tile row.
        row: usize,
        /// Requested tile column.
        col: usize,
        /// Tile rows of the matrix.
        mt: usize,
        /// Tile columns of the matrix.
        nt: usize,
    },

    /// A task writes a tile it also reads.
    #[error("Tile {0} is both read and written by the same kernel")]
    AliasedOperands(String),

    /// Invalid tiling configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A tile kernel failed while executing.
    #[error("Kernel failure: {0}")]
    Kernel(String),
}

impl TileError {
    pub(crate) fn invalid_argument(arg: usize, name: &'static str, reason: impl Into<String>) -> Self {
        TileError::InvalidArgument {
            arg,
            name,
            reason: reason.into(),
        }
    }
}

/// Result type for tile operations.
pub type Result<T> = std::result::Result<T, TileError>;
