//! Dense references and fixtures shared by the integration tests.

#![allow(dead_code)]

use tile_blas::{Diag, Side, Transpose, Uplo};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Small integers in `-3..=3`, so every product and sum in the tests is exact.
pub fn fill(seed: u64, len: usize) -> Vec<f64> {
    let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            ((state % 7) as i64 - 3) as f64
        })
        .collect()
}

fn op(x: &[f64], ld: usize, trans: Transpose, i: usize, j: usize) -> f64 {
    if trans.is_trans() {
        x[j + i * ld]
    } else {
        x[i + j * ld]
    }
}

/// `alpha * op(A) * op(B) + beta * C`, element by element.
#[allow(clippy::too_many_arguments)]
pub fn dense_gemm(
    trans_a: Transpose,
    trans_b: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: f64,
    a: &[f64],
    lda: usize,
    b: &[f64],
    ldb: usize,
    beta: f64,
    c: &[f64],
    ldc: usize,
) -> Vec<f64> {
    let mut out = c.to_vec();
    for j in 0..n {
        for i in 0..m {
            let mut sum = 0.0;
            for p in 0..k {
                sum += op(a, lda, trans_a, i, p) * op(b, ldb, trans_b, p, j);
            }
            let scaled = if beta == 0.0 { 0.0 } else { beta * c[i + j * ldc] };
            out[i + j * ldc] = alpha * sum + scaled;
        }
    }
    out
}

/// `alpha * op(T) * B` or `alpha * B * op(T)`, where `T` is the `uplo`
/// triangle of `A` with the diagonal replaced by ones for `Diag::Unit`.
#[allow(clippy::too_many_arguments)]
pub fn dense_trmm(
    side: Side,
    uplo: Uplo,
    trans: Transpose,
    diag: Diag,
    m: usize,
    n: usize,
    alpha: f64,
    a: &[f64],
    lda: usize,
    b: &[f64],
    ldb: usize,
) -> Vec<f64> {
    let tri = |i: usize, j: usize| -> f64 {
        if i == j {
            match diag {
                Diag::Unit => 1.0,
                Diag::NonUnit => a[i + j * lda],
            }
        } else if (uplo == Uplo::Upper && i < j) || (uplo == Uplo::Lower && i > j) {
            a[i + j * lda]
        } else {
            0.0
        }
    };
    let op_tri = |i: usize, j: usize| if trans.is_trans() { tri(j, i) } else { tri(i, j) };

    let mut out = b.to_vec();
    for j in 0..n {
        for i in 0..m {
            let sum: f64 = match side {
                Side::Left => (0..m).map(|p| op_tri(i, p) * b[p + j * ldb]).sum(),
                Side::Right => (0..n).map(|p| b[i + p * ldb] * op_tri(p, j)).sum(),
            };
            out[i + j * ldb] = alpha * sum;
        }
    }
    out
}

pub const SIDES: [Side; 2] = [Side::Left, Side::Right];
pub const UPLOS: [Uplo; 2] = [Uplo::Upper, Uplo::Lower];
pub const TRANSPOSES: [Transpose; 3] = [Transpose::NoTrans, Transpose::Trans, Transpose::ConjTrans];
pub const DIAGS: [Diag; 2] = [Diag::NonUnit, Diag::Unit];
