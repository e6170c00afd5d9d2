//! Fixed-capacity dense matrix kernel.
//!
//! Every `Matrix` is a value type backed by a `[f32; MAX * MAX]` buffer with
//! runtime `(rows, cols)` within `MAX`. There is no allocation on any path —
//! the whole kernel is usable on a target with no heap. Operations whose
//! shapes don't line up return [`Status::InvalidInput`] instead of panicking
//! or producing a garbage result; `inverse` returns [`Status::Singular`] when
//! the best available pivot is too small to trust.

use crate::status::Status;

/// Largest row or column count any `Matrix` in this crate can hold. The
/// filter's state is 16-dimensional, so this is also the largest square
/// matrix the EKF itself ever builds (`P`, `Q`, `F`).
pub const MAX: usize = 16;

/// Pivot magnitude below which `inverse` reports the operand singular.
const SINGULAR_THRESHOLD: f32 = 1e-6;

/// A dense, row-major matrix with compile-time-bounded capacity `MAX×MAX`
/// and runtime dimensions `rows <= MAX`, `cols <= MAX`.
#[derive(Clone, Copy)]
pub struct Matrix {
    data: [f32; MAX * MAX],
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Zero-filled matrix of the given shape, clamped to `MAX`.
    pub fn create(rows: usize, cols: usize) -> Self {
        Self {
            data: [0.0; MAX * MAX],
            rows: rows.min(MAX),
            cols: cols.min(MAX),
        }
    }

    /// Alias for [`Matrix::create`] — zero-filled matrix of the given shape.
    pub fn zero(rows: usize, cols: usize) -> Self {
        Self::create(rows, cols)
    }

    /// `n×n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::create(n, n);
        for i in 0..m.rows {
            m.set(i, i, 1.0);
        }
        m
    }

    /// `n×n` matrix with `v` on every diagonal entry, zero elsewhere.
    pub fn diagonal(n: usize, v: f32) -> Self {
        let mut m = Self::create(n, n);
        for i in 0..m.rows {
            m.set(i, i, v);
        }
        m
    }

    /// `n×n` matrix with `values[i]` at `(i, i)`, zero elsewhere. Entries
    /// beyond `values.len()` are left at zero.
    pub fn diagonal_vector(n: usize, values: &[f32]) -> Self {
        let mut m = Self::create(n, n);
        for i in 0..m.rows.min(values.len()) {
            m.set(i, i, values[i]);
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, r: usize, c: usize) -> usize {
        r * self.cols + c
    }

    /// Bounds-checked read. Panics (via `debug_assert!`) only on the
    /// kernel's own programmer error, never on caller-supplied matrix
    /// shapes — callers never index with shapes they haven't validated
    /// against `rows()`/`cols()`.
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> f32 {
        debug_assert!(r < self.rows && c < self.cols, "matrix index out of bounds");
        self.data[self.index(r, c)]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, v: f32) {
        debug_assert!(r < self.rows && c < self.cols, "matrix index out of bounds");
        let idx = self.index(r, c);
        self.data[idx] = v;
    }

    /// Overwrite `self` with `src`'s contents. Fails if shapes differ.
    pub fn copy_from(&mut self, src: &Matrix) -> Status {
        if self.rows != src.rows || self.cols != src.cols {
            return Status::InvalidInput;
        }
        self.data = src.data;
        Status::Ok
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix, Status> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(Status::InvalidInput);
        }
        let mut r = Matrix::create(self.rows, self.cols);
        let n = self.rows * self.cols;
        for i in 0..n {
            r.data[i] = self.data[i] + other.data[i];
        }
        Ok(r)
    }

    pub fn sub(&self, other: &Matrix) -> Result<Matrix, Status> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(Status::InvalidInput);
        }
        let mut r = Matrix::create(self.rows, self.cols);
        let n = self.rows * self.cols;
        for i in 0..n {
            r.data[i] = self.data[i] - other.data[i];
        }
        Ok(r)
    }

    /// `self * other`, shape `(self.rows, other.cols)`. Fails if
    /// `self.cols != other.rows`.
    pub fn mul(&self, other: &Matrix) -> Result<Matrix, Status> {
        if self.cols != other.rows {
            return Err(Status::InvalidInput);
        }
        let mut r = Matrix::create(self.rows, other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut s = 0.0f32;
                for k in 0..self.cols {
                    s += self.get(i, k) * other.get(k, j);
                }
                r.set(i, j, s);
            }
        }
        Ok(r)
    }

    /// `self * other^T` — used throughout the EKF to avoid materializing
    /// the transpose separately (`F*P*F'`, `P*H'`, `H*P*H'`).
    pub fn mul_transpose(&self, other: &Matrix) -> Result<Matrix, Status> {
        if self.cols != other.cols {
            return Err(Status::InvalidInput);
        }
        let mut r = Matrix::create(self.rows, other.rows);
        for i in 0..self.rows {
            for j in 0..other.rows {
                let mut s = 0.0f32;
                for k in 0..self.cols {
                    s += self.get(i, k) * other.get(j, k);
                }
                r.set(i, j, s);
            }
        }
        Ok(r)
    }

    pub fn scale(&self, s: f32) -> Matrix {
        let mut r = Matrix::create(self.rows, self.cols);
        let n = self.rows * self.cols;
        for i in 0..n {
            r.data[i] = self.data[i] * s;
        }
        r
    }

    pub fn transpose(&self) -> Matrix {
        let mut t = Matrix::create(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                t.set(j, i, self.get(i, j));
            }
        }
        t
    }

    /// `½(self + self^T)` — cancels floating-point drift that breaks the
    /// symmetry a covariance matrix must have after repeated updates.
    pub fn symmetrize(&self) -> Matrix {
        let t = self.transpose();
        let mut r = Matrix::create(self.rows, self.cols);
        let n = self.rows * self.cols;
        for i in 0..n {
            r.data[i] = 0.5 * (self.data[i] + t.data[i]);
        }
        r
    }

    /// True if every off-diagonal pair agrees within `tol`. Square only.
    pub fn is_symmetric(&self, tol: f32) -> bool {
        if self.rows != self.cols {
            return false;
        }
        for i in 0..self.rows {
            for j in 0..self.cols {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Square matrix inverse via Gauss-Jordan elimination on an
    /// `n × 2n` augmented matrix, with partial pivoting (largest `|pivot|`
    /// in the active column). Fails with `Status::InvalidInput` if not
    /// square, `Status::Singular` if the best pivot falls below
    /// `SINGULAR_THRESHOLD`.
    pub fn inverse(&self) -> Result<Matrix, Status> {
        if self.rows != self.cols {
            return Err(Status::InvalidInput);
        }
        let n = self.rows;
        let width = 2 * n;
        let mut aug = [[0.0f32; 2 * MAX]; MAX];
        for i in 0..n {
            for j in 0..n {
                aug[i][j] = self.get(i, j);
            }
            aug[i][n + i] = 1.0;
        }

        for col in 0..n {
            let mut piv_row = col;
            let mut piv_val = aug[col][col].abs();
            for r in (col + 1)..n {
                let v = aug[r][col].abs();
                if v > piv_val {
                    piv_val = v;
                    piv_row = r;
                }
            }
            if piv_val < SINGULAR_THRESHOLD {
                return Err(Status::Singular);
            }
            if piv_row != col {
                aug.swap(piv_row, col);
            }

            let inv_pivot = aug[col][col].recip();
            for j in 0..width {
                aug[col][j] *= inv_pivot;
            }

            for r in 0..n {
                if r == col {
                    continue;
                }
                let factor = aug[r][col];
                if factor != 0.0 {
                    for j in 0..width {
                        aug[r][j] -= factor * aug[col][j];
                    }
                }
            }
        }

        let mut result = Matrix::create(n, n);
        for i in 0..n {
            for j in 0..n {
                result.set(i, j, aug[i][n + j]);
            }
        }
        Ok(result)
    }

    /// Overwrite row `r` from `values`. Fails if `r` or `values.len()`
    /// doesn't fit the matrix's shape.
    pub fn set_row(&mut self, r: usize, values: &[f32]) -> Status {
        if r >= self.rows || values.len() < self.cols {
            return Status::InvalidInput;
        }
        for c in 0..self.cols {
            self.set(r, c, values[c]);
        }
        Status::Ok
    }

    /// Copy row `r` into `out`. Fails if `r` or `out.len()` doesn't fit.
    pub fn get_row(&self, r: usize, out: &mut [f32]) -> Status {
        if r >= self.rows || out.len() < self.cols {
            return Status::InvalidInput;
        }
        for c in 0..self.cols {
            out[c] = self.get(r, c);
        }
        Status::Ok
    }

    /// Extract the `rows x cols` block starting at `(r0, c0)`. Fails if the
    /// requested block runs past either edge of `self`.
    pub fn submatrix(&self, r0: usize, c0: usize, rows: usize, cols: usize) -> Result<Matrix, Status> {
        if r0 + rows > self.rows || c0 + cols > self.cols {
            return Err(Status::InvalidInput);
        }
        let mut m = Matrix::create(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                m.set(i, j, self.get(r0 + i, c0 + j));
            }
        }
        Ok(m)
    }

    /// Overwrite column `c` from `values`. Fails if `c` or `values.len()`
    /// doesn't fit the matrix's shape.
    pub fn set_col(&mut self, c: usize, values: &[f32]) -> Status {
        if c >= self.cols || values.len() < self.rows {
            return Status::InvalidInput;
        }
        for r in 0..self.rows {
            self.set(r, c, values[r]);
        }
        Status::Ok
    }

    /// Copy column `c` into `out`. Fails if `c` or `out.len()` doesn't fit.
    pub fn get_col(&self, c: usize, out: &mut [f32]) -> Status {
        if c >= self.cols || out.len() < self.rows {
            return Status::InvalidInput;
        }
        for r in 0..self.rows {
            out[r] = self.get(r, c);
        }
        Status::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_is_multiplicative_unit() {
        let mut a = Matrix::create(3, 3);
        let mut v = 1.0;
        for i in 0..3 {
            for j in 0..3 {
                a.set(i, j, v);
                v += 1.0;
            }
        }
        let i3 = Matrix::identity(3);
        let r = a.mul(&i3).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(r.get(i, j), a.get(i, j), epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn mismatched_mul_fails() {
        let a = Matrix::create(2, 3);
        let b = Matrix::create(2, 3);
        assert_eq!(a.mul(&b), Err(Status::InvalidInput));
    }

    #[test]
    fn inverse_of_well_conditioned_matrix() {
        let mut a = Matrix::create(3, 3);
        a.set_row(0, &[4.0, 3.0, 0.0]);
        a.set_row(1, &[3.0, 4.0, -1.0]);
        a.set_row(2, &[0.0, -1.0, 4.0]);

        let inv = a.inverse().expect("should be invertible");
        let product = a.mul(&inv).unwrap();
        let id = Matrix::identity(3);
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(product.get(i, j), id.get(i, j), epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn singular_matrix_rejected() {
        let mut a = Matrix::create(2, 2);
        a.set_row(0, &[1.0, 2.0]);
        a.set_row(1, &[2.0, 4.0]);
        assert_eq!(a.inverse(), Err(Status::Singular));
    }

    #[test]
    fn submatrix_extracts_leading_block() {
        let mut a = Matrix::create(3, 3);
        a.set_row(0, &[1.0, 2.0, 3.0]);
        a.set_row(1, &[4.0, 5.0, 6.0]);
        a.set_row(2, &[7.0, 8.0, 9.0]);
        let b = a.submatrix(0, 0, 2, 2).unwrap();
        assert_relative_eq!(b.get(1, 1), 5.0, epsilon = 1e-6);
        assert_eq!(a.submatrix(2, 2, 2, 2), Err(Status::InvalidInput));
    }

    #[test]
    fn symmetrize_cancels_drift() {
        let mut a = Matrix::create(2, 2);
        a.set_row(0, &[1.0, 2.0001]);
        a.set_row(1, &[1.9999, 3.0]);
        let s = a.symmetrize();
        assert!(s.is_symmetric(1e-5));
    }
}
