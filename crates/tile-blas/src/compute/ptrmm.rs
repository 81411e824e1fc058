use std::ops::Range;

use crate::core::{Request, Sequence, Tile, TiledMatrix};
use crate::dispatch::{TileDispatch, TileGemm, TileTrmm};
use crate::error::TileError;
use crate::types::{Diag, Scalar, Side, Transpose, Uplo};

/// Axis of B walked by the outer loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Tile rows of B (`Side::Left`).
    Rows,
    /// Tile columns of B (`Side::Right`).
    Cols,
}

/// Direction of the outer loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending tile index; trailing tiles lie after the current index.
    Forward,
    /// Descending tile index; trailing tiles lie before the current index.
    Backward,
}

/// Which off-diagonal tile of A pairs with outer index `i` and trailing index `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// `A(i, k)`
    Direct,
    /// `A(k, i)`
    Swapped,
}

/// Traversal strategy for one `(side, uplo, trans)` combination.
///
/// The outer loop visits B's tile rows (left) or tile columns (right). At
/// every outer index the diagonal tile of A is applied first, then the
/// trailing tiles are accumulated. Trailing tiles are always the ones the
/// outer loop has not reached yet, so they still hold their input values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrmmPlan {
    pub axis: Axis,
    pub direction: Direction,
    pub a_tile: Orientation,
}

impl TrmmPlan {
    /// Look up the plan for a flag combination.
    pub fn select(side: Side, uplo: Uplo, trans: Transpose) -> Self {
        use Axis::*;
        use Direction::*;
        use Orientation::*;

        let (axis, direction, a_tile) = match (side, uplo, trans.is_trans()) {
            (Side::Left, Uplo::Upper, false) => (Rows, Forward, Direct),
            (Side::Left, Uplo::Upper, true) => (Rows, Backward, Swapped),
            (Side::Left, Uplo::Lower, false) => (Rows, Backward, Direct),
            (Side::Left, Uplo::Lower, true) => (Rows, Forward, Swapped),
            (Side::Right, Uplo::Upper, false) => (Cols, Backward, Swapped),
            (Side::Right, Uplo::Upper, true) => (Cols, Forward, Direct),
            (Side::Right, Uplo::Lower, false) => (Cols, Forward, Swapped),
            (Side::Right, Uplo::Lower, true) => (Cols, Backward, Direct),
        };
        Self {
            axis,
            direction,
            a_tile,
        }
    }

    /// Outer indices in visiting order.
    pub fn outer(&self, count: usize) -> impl Iterator<Item = usize> {
        let forward = self.direction == Direction::Forward;
        (0..count).map(move |i| if forward { i } else { count - 1 - i })
    }

    /// Trailing indices for outer index `idx`, ascending.
    pub fn trailing(&self, idx: usize, count: usize) -> Range<usize> {
        match self.direction {
            Direction::Forward => idx + 1..count,
            Direction::Backward => 0..idx,
        }
    }

    /// `(m, n)` of the B tile for outer index `idx` and inner index `other`.
    #[inline]
    fn b_coords(&self, idx: usize, other: usize) -> (usize, usize) {
        match self.axis {
            Axis::Rows => (idx, other),
            Axis::Cols => (other, idx),
        }
    }

    /// Off-diagonal tile of A, its leading dimension and its extent along
    /// the contracted dimension.
    #[inline]
    fn a_operand<T>(&self, a: &TiledMatrix<T>, idx: usize, k: usize) -> (Tile<T>, usize, usize) {
        match self.a_tile {
            Orientation::Direct => (a.tile(idx, k), a.tile_mdim(idx), a.tile_ndim(k)),
            Orientation::Swapped => (a.tile(k, idx), a.tile_mdim(k), a.tile_mdim(k)),
        }
    }
}

/// Tile-level triangular matrix multiply, in place:
/// `B = alpha * op(A) * B` (left) or `B = alpha * B * op(A)` (right).
///
/// For every tile of B the diagonal tile of A is applied exactly once with
/// `alpha`, strictly before any trailing contribution is accumulated into
/// that tile with coefficient `1`.
///
/// If `sequence` has already failed, the failure is recorded on `request`
/// and nothing is submitted.
#[allow(clippy::too_many_arguments)]
pub fn ptrmm<T: Scalar, D: TileDispatch<T>>(
    side: Side,
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    alpha: T,
    a: &TiledMatrix<T>,
    b: &TiledMatrix<T>,
    dispatch: &mut D,
    sequence: &Sequence,
    request: &mut Request,
) {
    if sequence.is_failed() {
        request.fail(sequence, TileError::Sequence);
        return;
    }

    let plan = TrmmPlan::select(side, uplo, trans);
    let (outer_count, inner_count) = match plan.axis {
        Axis::Rows => (b.mt(), b.nt()),
        Axis::Cols => (b.nt(), b.mt()),
    };

    tracing::debug!(
        ?side,
        ?uplo,
        ?trans,
        ?diag,
        ?plan,
        mt = b.mt(),
        nt = b.nt(),
        "ptrmm"
    );

    let one = T::one();
    let mut submitted = 0usize;
    for idx in plan.outer(outer_count) {
        let lda = a.tile_mdim(idx);
        for other in 0..inner_count {
            let (m, n) = plan.b_coords(idx, other);
            let mm = b.tile_mdim(m);
            let nn = b.tile_ndim(n);
            let ldb = b.tile_mdim(m);

            dispatch.submit_trmm(TileTrmm {
                side,
                uplo,
                trans,
                diag,
                m: mm,
                n: nn,
                alpha,
                a: a.tile(idx, idx),
                lda,
                b: b.tile(m, n),
                ldb,
            });
            submitted += 1;

            for k in plan.trailing(idx, outer_count) {
                let (a_tile, ldak, kk) = plan.a_operand(a, idx, k);
                let task = match side {
                    Side::Left => TileGemm {
                        trans_a: trans,
                        trans_b: Transpose::NoTrans,
                        m: mm,
                        n: nn,
                        k: kk,
                        alpha,
                        a: a_tile,
                        lda: ldak,
                        b: b.tile(k, n),
                        ldb: b.tile_mdim(k),
                        beta: one,
                        c: b.tile(m, n),
                        ldc: ldb,
                    },
                    Side::Right => TileGemm {
                        trans_a: Transpose::NoTrans,
                        trans_b: trans,
                        m: mm,
                        n: nn,
                        k: kk,
                        alpha,
                        a: b.tile(m, k),
                        lda: ldb,
                        b: a_tile,
                        ldb: ldak,
                        beta: one,
                        c: b.tile(m, n),
                        ldc: ldb,
                    },
                };
                dispatch.submit_gemm(task);
                submitted += 1;
            }
        }
    }

    tracing::trace!(submitted, "ptrmm submitted");
}
