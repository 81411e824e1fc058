use crate::core::{Request, Sequence, Tile, TiledMatrix};
use crate::dispatch::{TileDispatch, TileGemm};
use crate::error::TileError;
use crate::types::{Scalar, Transpose};

/// Tile-level general matrix multiply: `C = alpha * op(A) * op(B) + beta * C`.
///
/// Emits, for every tile `C(m, n)`, one multiply-accumulate per tile of the
/// shared dimension in increasing `k`. The first carries `beta`, every later
/// one carries `1`, so `C(m, n)` is scaled exactly once and the partial
/// products are summed on top of it. When `alpha == 0` or the shared
/// dimension is empty, each `C(m, n)` instead receives a single submission
/// with an empty product term that only applies `beta`.
///
/// If `sequence` has already failed, the failure is recorded on `request`
/// and nothing is submitted.
#[allow(clippy::too_many_arguments)]
pub fn pgemm<T: Scalar, D: TileDispatch<T>>(
    trans_a: Transpose,
    trans_b: Transpose,
    alpha: T,
    a: &TiledMatrix<T>,
    b: &TiledMatrix<T>,
    beta: T,
    c: &TiledMatrix<T>,
    dispatch: &mut D,
    sequence: &Sequence,
    request: &mut Request,
) {
    if sequence.is_failed() {
        request.fail(sequence, TileError::Sequence);
        return;
    }

    let inner_k = if trans_a.is_trans() { a.m() } else { a.n() };
    let kt = if trans_a.is_trans() { a.mt() } else { a.nt() };
    let degenerate = alpha == T::zero() || inner_k == 0;

    tracing::debug!(
        ?trans_a,
        ?trans_b,
        mt = c.mt(),
        nt = c.nt(),
        kt,
        degenerate,
        "pgemm"
    );

    let mut submitted = 0usize;
    for m in 0..c.mt() {
        let mm = c.tile_mdim(m);
        let ldc = c.tile_mdim(m);
        for n in 0..c.nt() {
            let nn = c.tile_ndim(n);

            // alpha * op(A) * op(B) does not contribute; scale C.
            if degenerate {
                dispatch.submit_gemm(TileGemm {
                    trans_a,
                    trans_b,
                    m: mm,
                    n: nn,
                    k: 0,
                    alpha,
                    a: a.tile(0, 0),
                    lda: a.tile_mdim(0).max(1),
                    b: b.tile(0, 0),
                    ldb: b.tile_mdim(0).max(1),
                    beta,
                    c: c.tile(m, n),
                    ldc,
                });
                submitted += 1;
                continue;
            }

            for k in 0..kt {
                let (a_tile, lda, kk) = a_operand(trans_a, a, m, k);
                let (b_tile, ldb) = b_operand(trans_b, b, k, n);
                let zbeta = if k == 0 { beta } else { T::one() };
                dispatch.submit_gemm(TileGemm {
                    trans_a,
                    trans_b,
                    m: mm,
                    n: nn,
                    k: kk,
                    alpha,
                    a: a_tile,
                    lda,
                    b: b_tile,
                    ldb,
                    beta: zbeta,
                    c: c.tile(m, n),
                    ldc,
                });
                submitted += 1;
            }
        }
    }

    tracing::trace!(submitted, "pgemm submitted");
}

/// Tile of `op(A)` at `(m, k)`: the stored tile, its leading dimension and
/// its extent along the shared dimension.
#[inline]
fn a_operand<T>(trans: Transpose, a: &TiledMatrix<T>, m: usize, k: usize) -> (Tile<T>, usize, usize) {
    match trans {
        Transpose::NoTrans => (a.tile(m, k), a.tile_mdim(m), a.tile_ndim(k)),
        Transpose::Trans | Transpose::ConjTrans => (a.tile(k, m), a.tile_mdim(k), a.tile_mdim(k)),
    }
}

/// Tile of `op(B)` at `(k, n)` and its leading dimension.
#[inline]
fn b_operand<T>(trans: Transpose, b: &TiledMatrix<T>, k: usize, n: usize) -> (Tile<T>, usize) {
    match trans {
        Transpose::NoTrans => (b.tile(k, n), b.tile_mdim(k)),
        Transpose::Trans | Transpose::ConjTrans => (b.tile(n, k), b.tile_mdim(n)),
    }
}
