// src/linalg.rs
//! Sparse Linear Solvers
//!
//! The stationary solver needs one linear solve per fixed-point step, with the
//! system matrix `I - Δ·Qᵗ`. Two solvers cover the shapes a generator takes:
//!
//! - **Thomas algorithm** for tridiagonal systems: every diffusion-built
//!   generator is tridiagonal, so the common large-n case solves in O(n)
//!   without ever forming a dense matrix.
//! - **BiCGSTAB** for general sparse systems, applied to the Jacobi-scaled
//!   system. `I - Δ·Qᵗ` is a column-diagonally-dominant M-matrix (the row sums
//!   of Q are zero), which keeps the Krylov iteration well behaved.

use crate::error::{CtmcError, CtmcResult};

/// Solve a tridiagonal system with the Thomas algorithm.
///
/// `sub[i]` is the entry at (i+1, i), `diag[i]` at (i, i), `sup[i]` at
/// (i, i+1). The matrix is consumed logically but not mutated; O(n) work and
/// two scratch vectors.
///
/// # Errors
///
/// Returns [`CtmcError::LinearSolveFailure`] if a pivot vanishes. This cannot
/// happen for the diagonally dominant systems produced by the stationary
/// solver, but the check keeps the routine safe for general use.
pub fn solve_tridiagonal(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    rhs: &[f64],
) -> CtmcResult<Vec<f64>> {
    let n = diag.len();
    assert!(rhs.len() == n && sub.len() + 1 == n.max(1) && sup.len() + 1 == n.max(1));
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    if diag[0] == 0.0 {
        return Err(CtmcError::LinearSolveFailure {
            iterations: 0,
            residual: f64::INFINITY,
        });
    }
    c_prime[0] = if n > 1 { sup[0] / diag[0] } else { 0.0 };
    d_prime[0] = rhs[0] / diag[0];

    for i in 1..n {
        let pivot = diag[i] - sub[i - 1] * c_prime[i - 1];
        if pivot == 0.0 {
            return Err(CtmcError::LinearSolveFailure {
                iterations: i,
                residual: f64::INFINITY,
            });
        }
        if i + 1 < n {
            c_prime[i] = sup[i] / pivot;
        }
        d_prime[i] = (rhs[i] - sub[i - 1] * d_prime[i - 1]) / pivot;
    }

    let mut x = d_prime;
    for i in (0..n - 1).rev() {
        x[i] -= c_prime[i] * x[i + 1];
    }
    Ok(x)
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn norm2(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// Solve `A·x = b` with unpreconditioned BiCGSTAB, where `A` is supplied as a
/// matrix-vector product closure (the matrix itself is never materialized).
///
/// The caller is expected to apply any diagonal scaling to the operator and
/// right-hand side beforehand. Convergence is declared when the residual
/// 2-norm drops below `tol * ||b||`.
///
/// # Errors
///
/// Returns [`CtmcError::LinearSolveFailure`] on breakdown (vanishing inner
/// products) or when `max_iter` is exhausted.
pub fn solve_bicgstab<F>(
    matvec: F,
    b: &[f64],
    x0: &[f64],
    tol: f64,
    max_iter: usize,
) -> CtmcResult<Vec<f64>>
where
    F: Fn(&[f64], &mut [f64]),
{
    let n = b.len();
    assert!(x0.len() == n);
    let b_norm = norm2(b);
    if b_norm == 0.0 {
        return Ok(vec![0.0; n]);
    }
    let threshold = tol * b_norm;

    let mut x = x0.to_vec();
    let mut ax = vec![0.0; n];
    matvec(&x, &mut ax);

    let mut r: Vec<f64> = b.iter().zip(&ax).map(|(bi, axi)| bi - axi).collect();
    if norm2(&r) <= threshold {
        return Ok(x);
    }
    let r_hat = r.clone();

    let mut rho = 1.0;
    let mut alpha = 1.0;
    let mut omega = 1.0;
    let mut v = vec![0.0; n];
    let mut p = vec![0.0; n];
    let mut s = vec![0.0; n];
    let mut t = vec![0.0; n];

    for iter in 0..max_iter {
        let rho_next = dot(&r_hat, &r);
        if rho_next.abs() < f64::MIN_POSITIVE {
            return Err(CtmcError::LinearSolveFailure {
                iterations: iter,
                residual: norm2(&r),
            });
        }
        let beta = (rho_next / rho) * (alpha / omega);
        for i in 0..n {
            p[i] = r[i] + beta * (p[i] - omega * v[i]);
        }
        matvec(&p, &mut v);

        let denom = dot(&r_hat, &v);
        if denom.abs() < f64::MIN_POSITIVE {
            return Err(CtmcError::LinearSolveFailure {
                iterations: iter,
                residual: norm2(&r),
            });
        }
        alpha = rho_next / denom;
        for i in 0..n {
            s[i] = r[i] - alpha * v[i];
        }
        if norm2(&s) <= threshold {
            for i in 0..n {
                x[i] += alpha * p[i];
            }
            return Ok(x);
        }

        matvec(&s, &mut t);
        let tt = dot(&t, &t);
        if tt < f64::MIN_POSITIVE {
            return Err(CtmcError::LinearSolveFailure {
                iterations: iter,
                residual: norm2(&s),
            });
        }
        omega = dot(&t, &s) / tt;
        for i in 0..n {
            x[i] += alpha * p[i] + omega * s[i];
            r[i] = s[i] - omega * t[i];
        }
        if norm2(&r) <= threshold {
            return Ok(x);
        }
        rho = rho_next;
    }

    Err(CtmcError::LinearSolveFailure {
        iterations: max_iter,
        residual: norm2(&r),
    })
}
