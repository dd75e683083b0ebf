//!这个模块是用来计算 wilson loop 所需要的交叠矩阵的.
//!
//! A string is a closed path through the Brillouin zone along one reciprocal axis. On each
//! sample point the Hamiltonian is diagonalized and the occupied eigenvectors are kept;
//! neighbouring occupied subspaces are then joined by the overlap matrix
//! $$M_{mn}^{(p)}=\sum_j u^*_{jm,\bm k_p}u_{jn,\bm k_{p+1}}e^{-2\pi i\Delta\bm k\cdot\bm\tau_j}.$$
//! The ordered product of the $M^{(p)}$ is the Wilson loop of the string.
use crate::config::OverlapConfig;
use crate::error::{Result, TbError};
use crate::hamiltonian::BlochHamiltonian;
use crate::kpoints::KString;
use crate::math::exp_2pi_i;
use log::{debug, trace};
use ndarray::*;
use ndarray_linalg::{Eigh, SVD, UPLO};
use num_complex::Complex;

/// The positions of the `nocc` lowest values of `eval`, in increasing position order.
///
/// Ties keep their original order. Returning the positions sorted (instead of by energy)
/// keeps the column order of the occupied subspace the same from one k-point to the next,
/// even where two occupied bands cross.
pub fn select_occupied<S>(eval: &ArrayBase<S, Ix1>, nocc: usize) -> Vec<usize>
where
    S: Data<Elem = f64>,
{
    let mut order: Vec<usize> = (0..eval.len()).collect();
    order.sort_by(|&a, &b| eval[[a]].total_cmp(&eval[[b]]));
    order.truncate(nocc);
    order.sort_unstable();
    order
}

/// Distance between the highest occupied and the lowest empty value of `eval`.
fn occupied_gap<S>(eval: &ArrayBase<S, Ix1>, nocc: usize) -> Option<f64>
where
    S: Data<Elem = f64>,
{
    if nocc == 0 || nocc >= eval.len() {
        return None;
    }
    let mut sorted = eval.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(sorted[nocc] - sorted[nocc - 1])
}

impl BlochHamiltonian {
    /// The occupied eigenvectors at `kvec`, one per column (`nsta` x `nelectron`).
    ///
    /// A failed eigen-solve is reported with the k-point it happened at.
    pub fn occupied_subspace<S: Data<Elem = f64>>(
        &self,
        kvec: &ArrayBase<S, Ix1>,
    ) -> Result<Array2<Complex<f64>>> {
        let hamk = self.gen_ham(kvec)?;
        let (eval, evec) = hamk
            .eigh(UPLO::Lower)
            .map_err(|source| TbError::EigenSolveFailedAt {
                k: [kvec[[0]], kvec[[1]], kvec[[2]]],
                source,
            })?;
        let occ = select_occupied(&eval, self.nelectron);
        Ok(evec.select(Axis(1), &occ))
    }

    /// The overlap matrices of the string along `direction` at the reduced coordinates
    /// `fixed` of the two other axes, sampled with resolution `n`.
    ///
    /// Returns `n - 1` matrices of size `nelectron` x `nelectron`, stacked along axis 0.
    /// The last one joins the last sample with the first.
    ///
    /// ```
    /// use ndarray::*;
    /// use tbstring::*;
    /// let mut model = Model::new();
    /// model.add_atom(&array![0.0], 1, &array![0.0, 0.0, 0.0]).unwrap();
    /// let ham = model.build().unwrap();
    /// let ovr = ham.overlap_matrices(2, &[0.5, 0.0], 6).unwrap();
    /// assert_eq!(ovr.dim(), (5, 1, 1));
    /// ```
    pub fn overlap_matrices(
        &self,
        direction: usize,
        fixed: &[f64],
        n: usize,
    ) -> Result<Array3<Complex<f64>>> {
        let string = KString::new(direction, fixed, n)?;
        self.overlap_matrices_with(&string, &OverlapConfig::default())
    }

    /// [`BlochHamiltonian::overlap_matrices`] for a prepared [`KString`], with the checks of
    /// `config`.
    pub fn overlap_matrices_with(
        &self,
        string: &KString,
        config: &OverlapConfig,
    ) -> Result<Array3<Complex<f64>>> {
        let nocc = self.nelectron;
        let nk = string.nk();
        let direction = string.direction();
        let fixed = string.fixed();
        debug!(
            "overlap matrices along {} at {:?}: {} points, {} occupied of {} states",
            direction,
            fixed,
            nk,
            nocc,
            self.nsta()
        );
        let kvec = string.k_points();
        let mut evecs = Vec::with_capacity(nk);
        for (sample, k) in kvec.outer_iter().enumerate() {
            let hamk = self.gen_ham(&k)?;
            let (eval, evec) = hamk
                .eigh(UPLO::Lower)
                .map_err(|source| TbError::EigenSolveFailed {
                    direction,
                    fixed,
                    sample,
                    source,
                })?;
            let gap = occupied_gap(&eval, nocc);
            trace!("sample {} at k={}: gap {:?}", sample, k, gap);
            if let (Some(min_gap), Some(gap)) = (config.min_gap, gap) {
                if gap < min_gap {
                    return Err(TbError::GapClosed {
                        direction,
                        fixed,
                        sample,
                        gap,
                    });
                }
            }
            let occ = select_occupied(&eval, nocc);
            evecs.push(evec.select(Axis(1), &occ));
        }

        //规范修正 exp(-2 pi i dk tau_j), 去掉布洛赫约定中轨道位置带来的相位
        let add_phase = exp_2pi_i(&self.orb_position.dot(&string.dk())).mapv(|x| x.conj());
        let add_phase = add_phase.insert_axis(Axis(1));
        let mut ovr = Array3::<Complex<f64>>::zeros((nk, nocc, nocc));
        for (pair, mut O) in ovr.outer_iter_mut().enumerate() {
            // the path is closed: the point after the last sample is the first sample
            let left = &evecs[pair];
            let right = &evecs[(pair + 1) % nk];
            let left = left.t().mapv(|x| x.conj());
            O.assign(&left.dot(&(right * &add_phase)));
        }

        if let Some(min_sv) = config.min_singular_value.filter(|_| nocc > 0) {
            for (pair, O) in ovr.outer_iter().enumerate() {
                let (_, sv, _) = O.to_owned().svd(false, false)?;
                let singular_value = sv.iter().copied().fold(f64::INFINITY, f64::min);
                if singular_value < min_sv {
                    return Err(TbError::IllConditionedOverlap {
                        direction,
                        fixed,
                        pair,
                        singular_value,
                    });
                }
            }
        }
        Ok(ovr)
    }
}
