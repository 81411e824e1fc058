//! Operation flags and element types.
//!
//! The flags select which traversal and addressing case a tile algorithm
//! uses. They mirror the BLAS character arguments:
//!
//! | Flag | Values | BLAS |
//! |------|--------|------|
//! | [`Transpose`] | `NoTrans`, `Trans`, `ConjTrans` | `'N'`, `'T'`, `'C'` |
//! | [`Side`] | `Left`, `Right` | `'L'`, `'R'` |
//! | [`Uplo`] | `Upper`, `Lower` | `'U'`, `'L'` |
//! | [`Diag`] | `NonUnit`, `Unit` | `'N'`, `'U'` |
//!
//! Element types implement [`Scalar`]; `f32` and `f64` are provided.

mod scalar;

pub use scalar::Scalar;

/// Transpose mode of an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transpose {
    /// Use the operand as stored.
    NoTrans,
    /// Use the transpose of the operand.
    Trans,
    /// Use the conjugate transpose (same as `Trans` for real types).
    ConjTrans,
}

impl Transpose {
    /// True for `Trans` and `ConjTrans`.
    #[inline]
    pub fn is_trans(self) -> bool {
        !matches!(self, Transpose::NoTrans)
    }
}

/// Which side the triangular operand appears on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// `op(A) * B`
    Left,
    /// `B * op(A)`
    Right,
}

/// Which triangle of a triangular operand is referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Uplo {
    /// Upper triangle, including the diagonal.
    Upper,
    /// Lower triangle, including the diagonal.
    Lower,
}

/// Whether the triangular operand has an implicit unit diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diag {
    /// Diagonal entries are read from storage.
    NonUnit,
    /// Diagonal entries are assumed to be one and never read.
    Unit,
}
