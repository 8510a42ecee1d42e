//! Eigen decomposition of symmetric 3x3 matrices.
//!
//! The matrix is first reduced to tridiagonal form with Householder
//! reflections, then diagonalized by QL iterations with implicit shifts.
//! Computation runs in `f64`; results are returned as `f32`.
//!
//! Eigenvalues come out sorted in decreasing order. The matching unit
//! eigenvectors are the columns of [`EigenSolver::vectors`] and always
//! form a right-handed basis, so the matrix can be used directly as a
//! rotation.
//!
//! # Usage
//!
//! ```rust
//! use vx_math::{EigenSolver, Mat3};
//!
//! let m = Mat3::diagonal(1.0, 5.0, 3.0);
//! let eig = EigenSolver::new(&m);
//! assert!(eig.converged);
//! assert_eq!(eig.values, [5.0, 3.0, 1.0]);
//! ```

use crate::{Mat3, Vec3};

/// QL iteration cap per eigenvalue.
const MAX_ITERATIONS: usize = 32;

/// Eigenvalues and eigenvectors of a symmetric matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenSolver {
    /// Eigenvalues, largest first
    pub values: [f32; 3],
    /// Eigenvectors as columns, in the order of `values`
    pub vectors: Mat3,
    /// False when the QL iteration hit its limit
    pub converged: bool,
}

impl EigenSolver {
    /// Decomposes `m`, which must be symmetric (only the lower triangle is read).
    pub fn new(m: &Mat3) -> Self {
        let mut a = [[0.0f64; 3]; 3];
        for (i, row) in a.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = f64::from(if j <= i { m.m[i][j] } else { m.m[j][i] });
            }
        }
        let mut d = [0.0f64; 3];
        let mut e = [0.0f64; 3];
        tridiagonalize(&mut a, &mut d, &mut e);
        let converged = ql_implicit(&mut d, &mut e, &mut a);

        let mut order = [0usize, 1, 2];
        order.sort_by(|&x, &y| d[y].total_cmp(&d[x]));

        let col = |j: usize| Vec3::new(a[0][j] as f32, a[1][j] as f32, a[2][j] as f32);
        let mut vectors = Mat3::from_col_vecs(col(order[0]), col(order[1]), col(order[2]));
        if vectors.determinant() < 0.0 {
            vectors.set_col(2, -vectors.col(2));
        }

        Self {
            values: order.map(|i| d[i] as f32),
            vectors,
            converged,
        }
    }

    /// Eigenvector `i` (matching `values[i]`).
    #[inline]
    pub fn vector(&self, i: usize) -> Vec3 {
        self.vectors.col(i)
    }
}

/// Householder reduction to tridiagonal form.
///
/// On return `a` holds the accumulated orthogonal transform, `d` the
/// diagonal and `e[1..]` the sub-diagonal.
fn tridiagonalize(a: &mut [[f64; 3]; 3], d: &mut [f64; 3], e: &mut [f64; 3]) {
    const N: usize = 3;
    for i in (1..N).rev() {
        let l = i - 1;
        let mut h = 0.0;
        if l > 0 {
            let scale: f64 = (0..=l).map(|k| a[i][k].abs()).sum();
            if scale == 0.0 {
                e[i] = a[i][l];
            } else {
                for k in 0..=l {
                    a[i][k] /= scale;
                    h += a[i][k] * a[i][k];
                }
                let f = a[i][l];
                let g = if f >= 0.0 { -h.sqrt() } else { h.sqrt() };
                e[i] = scale * g;
                h -= f * g;
                a[i][l] = f - g;
                let mut f = 0.0;
                for j in 0..=l {
                    a[j][i] = a[i][j] / h;
                    let mut g = 0.0;
                    for k in 0..=j {
                        g += a[j][k] * a[i][k];
                    }
                    for k in j + 1..=l {
                        g += a[k][j] * a[i][k];
                    }
                    e[j] = g / h;
                    f += e[j] * a[i][j];
                }
                let hh = f / (h + h);
                for j in 0..=l {
                    let f = a[i][j];
                    let g = e[j] - hh * f;
                    e[j] = g;
                    for k in 0..=j {
                        a[j][k] -= f * e[k] + g * a[i][k];
                    }
                }
            }
        } else {
            e[i] = a[i][l];
        }
        d[i] = h;
    }

    d[0] = 0.0;
    e[0] = 0.0;
    for i in 0..N {
        if d[i] != 0.0 {
            for j in 0..i {
                let g: f64 = (0..i).map(|k| a[i][k] * a[k][j]).sum();
                for k in 0..i {
                    a[k][j] -= g * a[k][i];
                }
            }
        }
        d[i] = a[i][i];
        a[i][i] = 1.0;
        for j in 0..i {
            a[j][i] = 0.0;
            a[i][j] = 0.0;
        }
    }
}

/// QL iterations with implicit shifts on a tridiagonal matrix, rotating
/// the columns of `z` along. Returns false if any eigenvalue needed more
/// than [`MAX_ITERATIONS`].
fn ql_implicit(d: &mut [f64; 3], e: &mut [f64; 3], z: &mut [[f64; 3]; 3]) -> bool {
    const N: usize = 3;
    let mut converged = true;
    for i in 1..N {
        e[i - 1] = e[i];
    }
    e[N - 1] = 0.0;

    for l in 0..N {
        let mut iter = 0;
        loop {
            let mut m = l;
            while m < N - 1 {
                let dd = d[m].abs() + d[m + 1].abs();
                if e[m].abs() <= f64::EPSILON * dd {
                    break;
                }
                m += 1;
            }
            if m == l {
                break;
            }
            if iter == MAX_ITERATIONS {
                converged = false;
                break;
            }
            iter += 1;

            let mut g = (d[l + 1] - d[l]) / (2.0 * e[l]);
            let mut r = g.hypot(1.0);
            g = d[m] - d[l] + e[l] / (g + r.copysign(g));
            let (mut s, mut c, mut p) = (1.0, 1.0, 0.0);
            let mut underflow = false;

            for i in (l..m).rev() {
                let f = s * e[i];
                let b = c * e[i];
                r = f.hypot(g);
                e[i + 1] = r;
                if r == 0.0 {
                    d[i + 1] -= p;
                    e[m] = 0.0;
                    underflow = true;
                    break;
                }
                s = f / r;
                c = g / r;
                g = d[i + 1] - p;
                r = (d[i] - g) * s + 2.0 * c * b;
                p = s * r;
                d[i + 1] = g + p;
                g = c * r - b;
                for row in z.iter_mut() {
                    let f = row[i + 1];
                    row[i + 1] = s * row[i] + c * f;
                    row[i] = c * row[i] - s * f;
                }
            }
            if underflow {
                continue;
            }
            d[l] -= p;
            e[l] = g;
            e[m] = 0.0;
        }
    }
    converged
}
