//! Reference single-tile kernels.
//!
//! These are the numeric leaves of the tile algorithms: each call updates
//! exactly one output tile. They follow reference BLAS semantics on
//! column-major data with explicit leading dimensions:
//!
//! | Kernel | Operation |
//! |--------|-----------|
//! | [`gemm`] | `C = alpha * op(A) * op(B) + beta * C` |
//! | [`trmm`] | `B = alpha * op(A) * B` or `B = alpha * B * op(A)`, A triangular |
//!
//! A `beta` of zero overwrites `C` without reading it, so stale NaNs in an
//! output tile never leak into the result.

mod gemm;
mod trmm;

pub use gemm::gemm;
pub use trmm::trmm;

use crate::types::{Scalar, Transpose};

/// Element `(i, j)` of `op(X)` for a column-major `x` with leading dimension `ld`.
#[inline(always)]
fn op_elem<T: Scalar>(x: &[T], ld: usize, trans: Transpose, i: usize, j: usize) -> T {
    match trans {
        Transpose::NoTrans => x[i + j * ld],
        Transpose::Trans => x[j + i * ld],
        Transpose::ConjTrans => x[j + i * ld].conj(),
    }
}
