use crate::types::{Diag, Scalar, Side, Transpose, Uplo};

/// Triangular tile multiply, in place.
///
/// - `Side::Left`:  `B = alpha * op(A) * B`, A is `m x m`
/// - `Side::Right`: `B = alpha * B * op(A)`, A is `n x n`
///
/// Only the `uplo` triangle of A is read. With `Diag::Unit` the diagonal is
/// taken to be one and is not read either.
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
) {
    if m == 0 || n == 0 {
        return;
    }
    debug_assert!(ldb >= m && b.len() >= ldb * (n - 1) + m);

    let zero = T::zero();
    if alpha == zero {
        for j in 0..n {
            b[j * ldb..j * ldb + m].fill(zero);
        }
        return;
    }

    let tri = Triangle { a, lda, uplo, diag, trans };
    let mut out = vec![zero; m * n];

    match side {
        Side::Left => {
            for j in 0..n {
                for i in 0..m {
                    let mut sum = zero;
                    for l in 0..m {
                        sum = sum + tri.op(i, l) * b[l + j * ldb];
                    }
                    out[i + j * m] = alpha * sum;
                }
            }
        }
        Side::Right => {
            for j in 0..n {
                for i in 0..m {
                    let mut sum = zero;
                    for l in 0..n {
                        sum = sum + b[i + l * ldb] * tri.op(l, j);
                    }
                    out[i + j * m] = alpha * sum;
                }
            }
        }
    }

    for j in 0..n {
        b[j * ldb..j * ldb + m].copy_from_slice(&out[j * m..(j + 1) * m]);
    }
}

struct Triangle<'a, T> {
    a: &'a [T],
    lda: usize,
    uplo: Uplo,
    diag: Diag,
    trans: Transpose,
}

impl<T: Scalar> Triangle<'_, T> {
    /// Element `(r, c)` of the stored triangle, zero outside it.
    #[inline(always)]
    fn get(&self, r: usize, c: usize) -> T {
        if r == c {
            return match self.diag {
                Diag::Unit => T::one(),
                Diag::NonUnit => self.a[r + c * self.lda],
            };
        }
        let inside = match self.uplo {
            Uplo::Upper => r < c,
            Uplo::Lower => r > c,
        };
        if inside {
            self.a[r + c * self.lda]
        } else {
            T::zero()
        }
    }

    /// Element `(r, c)` of `op(A)`.
    #[inline(always)]
    fn op(&self, r: usize, c: usize) -> T {
        match self.trans {
            Transpose::NoTrans => self.get(r, c),
            Transpose::Trans => self.get(c, r),
            Transpose::ConjTrans => self.get(c, r).conj(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Full 2x2 storage [[1, 2], [3, 4]]; the unused triangle must be ignored.
    const A: [f64; 4] = [1.0, 3.0, 2.0, 4.0];
    // B = [[1, 2], [3, 4]]
    const B: [f64; 4] = [1.0, 3.0, 2.0, 4.0];

    fn run(side: Side, uplo: Uplo, trans: Transpose, diag: Diag, alpha: f64) -> Vec<f64> {
        let mut b = B.to_vec();
        trmm(side, uplo, trans, diag, 2, 2, alpha, &A, 2, &mut b, 2);
        b
    }

    #[test]
    fn test_left_upper() {
        // U = [[1, 2], [0, 4]]; U * B = [[7, 10], [12, 16]]
        let b = run(Side::Left, Uplo::Upper, Transpose::NoTrans, Diag::NonUnit, 1.0);
        assert_eq!(b, vec![7.0, 12.0, 10.0, 16.0]);
    }

    #[test]
    fn test_left_lower_trans() {
        // L = [[1, 0], [3, 4]]; L^T = [[1, 3], [0, 4]]; L^T * B = [[10, 14], [12, 16]]
        let b = run(Side::Left, Uplo::Lower, Transpose::Trans, Diag::NonUnit, 1.0);
        assert_eq!(b, vec![10.0, 12.0, 14.0, 16.0]);
    }

    #[test]
    fn test_left_upper_unit() {
        // U = [[1, 2], [0, 1]]; 2 * U * B = 2 * [[7, 10], [3, 4]]
        let b = run(Side::Left, Uplo::Upper, Transpose::NoTrans, Diag::Unit, 2.0);
        assert_eq!(b, vec![14.0, 6.0, 20.0, 8.0]);
    }

    #[test]
    fn test_right_lower() {
        // L = [[1, 0], [3, 4]]; B * L = [[7, 8], [15, 16]]
        let b = run(Side::Right, Uplo::Lower, Transpose::NoTrans, Diag::NonUnit, 1.0);
        assert_eq!(b, vec![7.0, 15.0, 8.0, 16.0]);
    }

    #[test]
    fn test_right_upper_trans() {
        // U = [[1, 2], [0, 4]]; U^T = [[1, 0], [2, 4]]; B * U^T = [[5, 8], [11, 16]]
        let b = run(Side::Right, Uplo::Upper, Transpose::Trans, Diag::NonUnit, 1.0);
        assert_eq!(b, vec![5.0, 11.0, 8.0, 16.0]);
    }

    #[test]
    fn test_alpha_zero_clears() {
        let b = run(Side::Left, Uplo::Upper, Transpose::NoTrans, Diag::NonUnit, 0.0);
        assert_eq!(b, vec![0.0; 4]);
    }

    #[test]
    fn test_unit_diag_never_reads_diagonal() {
        let a = [f64::NAN, 0.0, 5.0, f64::NAN];
        let mut b = B.to_vec();
        trmm(Side::Left, Uplo::Upper, Transpose::NoTrans, Diag::Unit, 2, 2, 1.0, &a, 2, &mut b, 2);
        // [[1, 5], [0, 1]] * B = [[16, 22], [3, 4]]
        assert_eq!(b, vec![16.0, 3.0, 22.0, 4.0]);
    }

    #[test]
    fn test_rectangular_right() {
        // B is 1x2 = [1, 2]; U = [[1, 2], [0, 4]]; B * U = [1, 10]
        let mut b = vec![1.0, 2.0];
        trmm(Side::Right, Uplo::Upper, Transpose::NoTrans, Diag::NonUnit, 1, 2, 1.0, &A, 2, &mut b, 1);
        assert_eq!(b, vec![1.0, 10.0]);
    }
}
