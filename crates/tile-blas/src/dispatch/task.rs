use crate::core::{Tile, TileId};
use crate::error::{Result, TileError};
use crate::kernels;
use crate::types::{Diag, Scalar, Side, Transpose, Uplo};

/// One tile multiply-accumulate: `c = alpha * op(a) * op(b) + beta * c`.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGemm<T> {
    pub trans_a: Transpose,
    pub trans_b: Transpose,
    pub m: usize,
    pub n: usize,
    pub k: usize,
    pub alpha: T,
    pub a: Tile<T>,
    pub lda: usize,
    pub b: Tile<T>,
    pub ldb: usize,
    /// Accumulation coefficient applied to `c`.
    pub beta: T,
    pub c: Tile<T>,
    pub ldc: usize,
}

/// One triangular tile multiply: `b = alpha * op(a) * b` or `b = alpha * b * op(a)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TileTrmm<T> {
    pub side: Side,
    pub uplo: Uplo,
    pub trans: Transpose,
    pub diag: Diag,
    pub m: usize,
    pub n: usize,
    pub alpha: T,
    pub a: Tile<T>,
    pub lda: usize,
    pub b: Tile<T>,
    pub ldb: usize,
}

/// A tile kernel invocation together with the tiles it reads and writes.
#[derive(Debug, Clone, PartialEq)]
pub enum TileTask<T> {
    Gemm(TileGemm<T>),
    Trmm(TileTrmm<T>),
}

impl<T: Scalar> TileTask<T> {
    /// Tiles read but not written. A multiply-accumulate with an empty
    /// product term reads neither input.
    pub fn reads(&self) -> Vec<TileId> {
        match self {
            TileTask::Gemm(g) if g.k == 0 => Vec::new(),
            TileTask::Gemm(g) => vec![g.a.id(), g.b.id()],
            TileTask::Trmm(t) => vec![t.a.id()],
        }
    }

    /// The tile updated in place; it is also read.
    pub fn writes(&self) -> TileId {
        match self {
            TileTask::Gemm(g) => g.c.id(),
            TileTask::Trmm(t) => t.b.id(),
        }
    }

    /// Short kernel name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            TileTask::Gemm(_) => "gemm",
            TileTask::Trmm(_) => "trmm",
        }
    }

    /// Run the kernel on the operand tiles.
    pub fn execute(&self) -> Result<()> {
        let target = self.writes();
        if self.reads().contains(&target) {
            return Err(TileError::AliasedOperands(target.to_string()));
        }

        match self {
            TileTask::Gemm(g) => {
                let mut c = g.c.write()?;
                if g.k == 0 {
                    kernels::gemm(
                        g.trans_a, g.trans_b, g.m, g.n, 0, g.alpha, &[], g.lda, &[], g.ldb,
                        g.beta, &mut c, g.ldc,
                    );
                    return Ok(());
                }
                let a = g.a.read()?;
                let b = g.b.read()?;
                kernels::gemm(
                    g.trans_a, g.trans_b, g.m, g.n, g.k, g.alpha, &a, g.lda, &b, g.ldb, g.beta,
                    &mut c, g.ldc,
                );
            }
            TileTask::Trmm(t) => {
                let a = t.a.read()?;
                let mut b = t.b.write()?;
                kernels::trmm(
                    t.side, t.uplo, t.trans, t.diag, t.m, t.n, t.alpha, &a, t.lda, &mut b, t.ldb,
                );
            }
        }
        Ok(())
    }
}
