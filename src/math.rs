use ndarray::{Array1, ArrayBase, Data, Ix1, Ix2};
use num_complex::Complex;
use std::f64::consts::PI;

/// $e^{i\theta}$ for every $\theta$ in `x`, with $\theta=2\pi x$.
///
/// Reduced coordinates pair with lattice coordinates through $\bm a_i\cdot\bm b_j=2\pi\delta_{ij}$,
/// so `x` is the plain dot product of the two coordinate vectors.
#[inline(always)]
pub fn exp_2pi_i<S>(x: &ArrayBase<S, Ix1>) -> Array1<Complex<f64>>
where
    S: Data<Elem = f64>,
{
    x.mapv(|x| Complex::new(0.0, 2.0 * PI * x).exp())
}

/// Checks $A_{ij}=A_{ji}^*$ within `tol`.
pub fn is_hermitian<S>(A: &ArrayBase<S, Ix2>, tol: f64) -> bool
where
    S: Data<Elem = Complex<f64>>,
{
    if A.nrows() != A.ncols() {
        return false;
    }
    A.indexed_iter()
        .all(|((i, j), a)| (a - A[[j, i]].conj()).norm() <= tol)
}
