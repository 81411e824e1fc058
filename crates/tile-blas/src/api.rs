use crate::compute::{pgemm, ptrmm};
use crate::config::TileConfig;
use crate::core::{Request, Sequence, TileLayout, TiledMatrix};
use crate::dispatch::{TaskGraph, TileDispatch};
use crate::error::{Result, TileError};
use crate::types::{Diag, Scalar, Side, Transpose, Uplo};

/// General matrix multiply on column-major data:
/// `C = alpha * op(A) * op(B) + beta * C`.
///
/// `op(A)` is `m x k`, `op(B)` is `k x n`, `C` is `m x n`. The operands are
/// split into `config.nb` tiles, the tile algorithm is run on a task graph
/// and the result is written back into `c`.
///
/// # Example
///
/// ```
/// use tile_blas::{gemm, TileConfig, Transpose};
///
/// // A = [[1, 2], [3, 4]], B = I, both column-major
/// let a = vec![1.0f64, 3.0, 2.0, 4.0];
/// let b = vec![1.0f64, 0.0, 0.0, 1.0];
/// let mut c = vec![0.0f64; 4];
///
/// gemm(
///     Transpose::NoTrans, Transpose::NoTrans,
///     2, 2, 2,
///     1.0, &a, 2, &b, 2,
///     0.0, &mut c, 2,
///     &TileConfig::new(1, None),
/// ).unwrap();
/// assert_eq!(c, a);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn gemm<T: Scalar>(
    trans_a: Transpose,
    trans_b: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: T,
    a: &[T],
    lda: usize,
    b: &[T],
    ldb: usize,
    beta: T,
    c: &mut [T],
    ldc: usize,
    config: &TileConfig,
) -> Result<()> {
    let (am, an) = if trans_a.is_trans() { (k, m) } else { (m, k) };
    let (bm, bn) = if trans_b.is_trans() { (n, k) } else { (k, n) };

    check_ld(8, "lda", lda, am)?;
    check_ld(10, "ldb", ldb, bm)?;
    check_ld(13, "ldc", ldc, m)?;
    check_len(7, "A", a.len(), lda, am, an)?;
    check_len(9, "B", b.len(), ldb, bm, bn)?;
    check_len(12, "C", c.len(), ldc, m, n)?;

    // Quick return.
    if m == 0 || n == 0 || ((alpha == T::zero() || k == 0) && beta == T::one()) {
        return Ok(());
    }
    config.validate()?;

    tracing::debug!(m, n, k, nb = config.nb, "gemm");

    let nb = config.nb;
    let a = TiledMatrix::from_col_major(a, lda, TileLayout::square(am, an, nb))?;
    let b = TiledMatrix::from_col_major(b, ldb, TileLayout::square(bm, bn, nb))?;
    let c_tiles = TiledMatrix::from_col_major(c, ldc, TileLayout::square(m, n, nb))?;

    let sequence = Sequence::new();
    let mut request = Request::new();
    let mut graph = TaskGraph::new();
    pgemm(trans_a, trans_b, alpha, &a, &b, beta, &c_tiles, &mut graph, &sequence, &mut request);
    run(graph, config, &sequence)?;

    c_tiles.copy_to_col_major(c, ldc)
}

/// Triangular matrix multiply on column-major data, in place:
/// `B = alpha * op(A) * B` (left) or `B = alpha * B * op(A)` (right).
///
/// `B` is `m x n`; `A` is `m x m` for `Side::Left` and `n x n` for
/// `Side::Right`, of which only the `uplo` triangle is referenced.
#[allow(clippy::too_many_arguments)]
pub fn trmm<T: Scalar>(
    side: Side,
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    lda: usize,
    b: &mut [T],
    ldb: usize,
    config: &TileConfig,
) -> Result<()> {
    let na = match side {
        Side::Left => m,
        Side::Right => n,
    };

    check_ld(9, "lda", lda, na)?;
    check_ld(11, "ldb", ldb, m)?;
    check_len(8, "A", a.len(), lda, na, na)?;
    check_len(10, "B", b.len(), ldb, m, n)?;

    // Quick return.
    if m == 0 || n == 0 {
        return Ok(());
    }
    config.validate()?;

    tracing::debug!(?side, ?uplo, m, n, nb = config.nb, "trmm");

    let nb = config.nb;
    let a = TiledMatrix::from_col_major(a, lda, TileLayout::square(na, na, nb))?;
    let b_tiles = TiledMatrix::from_col_major(b, ldb, TileLayout::square(m, n, nb))?;

    let sequence = Sequence::new();
    let mut request = Request::new();
    let mut graph = TaskGraph::new();
    ptrmm(side, uplo, trans, diag, alpha, &a, &b_tiles, &mut graph, &sequence, &mut request);
    run(graph, config, &sequence)?;

    b_tiles.copy_to_col_major(b, ldb)
}

/// Tile GEMM on caller-owned tiled matrices.
///
/// Checks that the operands conform and share one square tile size, then
/// submits the tile kernels to `dispatch`. Any failure, including a failed
/// `sequence` on entry, is recorded on `request` and `sequence`; nothing is
/// returned. Call [`Sequence::status`] after the dispatched work completes.
#[allow(clippy::too_many_arguments)]
pub fn gemm_async<T: Scalar, D: TileDispatch<T>>(
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
    if let Err(err) = check_gemm(trans_a, trans_b, a, b, c) {
        request.fail(sequence, err);
        return;
    }
    pgemm(trans_a, trans_b, alpha, a, b, beta, c, dispatch, sequence, request);
}

/// Tile TRMM on caller-owned tiled matrices.
///
/// Failure handling follows [`gemm_async`].
#[allow(clippy::too_many_arguments)]
pub fn trmm_async<T: Scalar, D: TileDispatch<T>>(
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
    if let Err(err) = check_trmm(side, a, b) {
        request.fail(sequence, err);
        return;
    }
    ptrmm(side, uplo, trans, diag, alpha, a, b, dispatch, sequence, request);
}

fn run<T: Scalar>(graph: TaskGraph<T>, config: &TileConfig, sequence: &Sequence) -> Result<()> {
    #[cfg(feature = "parallel")]
    {
        if let Some(num_threads) = config.num_threads {
            let pool = crate::config::pool::get(num_threads)?;
            graph.execute_in(&pool, sequence);
            return sequence.status();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = config;

    graph.execute(sequence);
    sequence.status()
}

fn check_ld(arg: usize, name: &'static str, ld: usize, rows: usize) -> Result<()> {
    if ld < rows.max(1) {
        return Err(TileError::invalid_argument(
            arg,
            name,
            format!("{} is smaller than max(1, {})", ld, rows),
        ));
    }
    Ok(())
}

fn check_len(arg: usize, name: &'static str, len: usize, ld: usize, rows: usize, cols: usize) -> Result<()> {
    let needed = if rows == 0 || cols == 0 { 0 } else { ld * (cols - 1) + rows };
    if len < needed {
        return Err(TileError::invalid_argument(
            arg,
            name,
            format!("buffer holds {} elements, {} required", len, needed),
        ));
    }
    Ok(())
}

/// Common square tile size of all layouts.
fn common_tile_size(layouts: &[TileLayout]) -> Result<usize> {
    let nb = layouts.first().map_or(1, |l| l.nb);
    for layout in layouts {
        if layout.mb != nb || layout.nb != nb {
            return Err(TileError::DimensionMismatch(format!(
                "tiles must be square and uniform: expected {}x{}, found {}x{}",
                nb, nb, layout.mb, layout.nb
            )));
        }
    }
    Ok(nb)
}

fn check_gemm<T>(
    trans_a: Transpose,
    trans_b: Transpose,
    a: &TiledMatrix<T>,
    b: &TiledMatrix<T>,
    c: &TiledMatrix<T>,
) -> Result<()> {
    common_tile_size(&[a.layout(), b.layout(), c.layout()])?;

    let (am, ak) = if trans_a.is_trans() { (a.n(), a.m()) } else { (a.m(), a.n()) };
    let (bk, bn) = if trans_b.is_trans() { (b.n(), b.m()) } else { (b.m(), b.n()) };
    if am != c.m() || bn != c.n() || ak != bk {
        return Err(TileError::DimensionMismatch(format!(
            "op(A) is {}x{}, op(B) is {}x{}, C is {}x{}",
            am,
            ak,
            bk,
            bn,
            c.m(),
            c.n()
        )));
    }
    Ok(())
}

fn check_trmm<T>(side: Side, a: &TiledMatrix<T>, b: &TiledMatrix<T>) -> Result<()> {
    common_tile_size(&[a.layout(), b.layout()])?;

    if a.m() != a.n() {
        return Err(TileError::DimensionMismatch(format!(
            "triangular operand must be square, found {}x{}",
            a.m(),
            a.n()
        )));
    }
    let order = match side {
        Side::Left => b.m(),
        Side::Right => b.n(),
    };
    if a.m() != order {
        return Err(TileError::DimensionMismatch(format!(
            "A is {}x{} but B is {}x{} with side {:?}",
            a.m(),
            a.n(),
            b.m(),
            b.n(),
            side
        )));
    }
    Ok(())
}
