use super::op_elem;
use crate::types::{Scalar, Transpose};

/// General tile multiply-accumulate: `C = alpha * op(A) * op(B) + beta * C`.
///
/// `op(A)` is `m x k`, `op(B)` is `k x n` and `C` is `m x n`. When `k == 0`
/// or `alpha == 0` only the scaling of `C` by `beta` takes place and `A`,
/// `B` are never read.
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
) {
    if m == 0 || n == 0 {
        return;
    }
    debug_assert!(ldc >= m && c.len() >= ldc * (n - 1) + m);

    let zero = T::zero();
    let product = k > 0 && alpha != zero;

    for j in 0..n {
        for i in 0..m {
            let cij = &mut c[i + j * ldc];
            let scaled = if beta == zero { zero } else { beta * *cij };
            if !product {
                *cij = scaled;
                continue;
            }

            let mut sum = zero;
            for l in 0..k {
                sum = sum + op_elem(a, lda, trans_a, i, l) * op_elem(b, ldb, trans_b, l, j);
            }
            *cij = alpha * sum + scaled;
        }
    }
}
