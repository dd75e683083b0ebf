//! 这个 impl 是给 tight-binding 模型提供基础的函数: 添加原子和 hopping.
use crate::atom_struct::{Atom, Hopping, OrbIndex};
use crate::error::{Result, TbError};
use crate::generics::hop_use;
use crate::{DIM_R, HopPhase, Model};
use log::warn;
use ndarray::*;

impl Model {
    /// An empty model, without atoms or hoppings.
    pub fn new() -> Model {
        Model::default()
    }

    /// Adds an atom and returns its index.
    ///
    /// - onsite: the orbital energies, one per orbital
    ///
    /// - nelectron: the number of electrons the atom contributes
    ///
    /// - position: fractional coordinates, must have exactly 3 components
    ///
    /// Indices are handed out as 0, 1, 2, ... in call order and never change.
    pub fn add_atom<S, T>(
        &mut self,
        onsite: &ArrayBase<S, Ix1>,
        nelectron: usize,
        position: &ArrayBase<T, Ix1>,
    ) -> Result<usize>
    where
        S: Data<Elem = f64>,
        T: Data<Elem = f64>,
    {
        if position.len() != DIM_R {
            return Err(TbError::DimensionMismatch {
                context: "atom position",
                expected: DIM_R,
                found: position.len(),
            });
        }
        let position = [position[[0]], position[[1]], position[[2]]];
        self.atoms.push(Atom::new(position, onsite.to_owned(), nelectron));
        Ok(self.atoms.len() - 1)
    }

    /// Adds the hopping $\bra{i\bm 0}\hat H\ket{j\bm R}=$tmp.
    ///
    /// - tmp: the hopping amplitude, `f64` or `Complex<f64>`
    ///
    /// - orb_i, orb_j: `(atom, orbital)` of the two orbitals, `orb_i` sits in the home cell
    ///
    /// - R: the unit cell of `orb_j`, 3 integers
    ///
    /// Only this direction is stored, the Hermitian conjugate is added by [`Model::build`].
    pub fn add_hop<T, U>(
        &mut self,
        tmp: U,
        orb_i: OrbIndex,
        orb_j: OrbIndex,
        R: &ArrayBase<T, Ix1>,
    ) -> Result<()>
    where
        T: Data<Elem = isize>,
        U: hop_use,
    {
        self.add_hop_phase(tmp, orb_i, orb_j, R, 1.0)
    }

    /// Same as [`Model::add_hop`], but the stored amplitude is `tmp * phase`.
    pub fn add_hop_phase<T, U, P>(
        &mut self,
        tmp: U,
        orb_i: OrbIndex,
        orb_j: OrbIndex,
        R: &ArrayBase<T, Ix1>,
        phase: P,
    ) -> Result<()>
    where
        T: Data<Elem = isize>,
        U: hop_use,
        P: hop_use,
    {
        let R = lattice_vector(R)?;
        self.check_orb(orb_i)?;
        self.check_orb(orb_j)?;
        self.push_hop(Hopping {
            tmp: tmp.to_complex() * phase.to_complex(),
            orb_i,
            orb_j,
            R,
        });
        Ok(())
    }

    /// Adds one hopping for every combination of an orbital pair in `pairs` and a row of
    /// `R_list`, pair-major.
    ///
    /// The amplitude of the hopping on row `r` is `tmp` times the factor [`HopPhase`] gives
    /// to row `r`. This is the same as calling [`Model::add_hop_phase`] for each combination,
    /// except that the whole batch is checked first: on error nothing is added.
    pub fn add_hops<T, U>(
        &mut self,
        tmp: U,
        pairs: &[(OrbIndex, OrbIndex)],
        R_list: &ArrayBase<T, Ix2>,
        phase: &HopPhase,
    ) -> Result<()>
    where
        T: Data<Elem = isize>,
        U: hop_use,
    {
        if R_list.ncols() != DIM_R {
            return Err(TbError::DimensionMismatch {
                context: "lattice vector",
                expected: DIM_R,
                found: R_list.ncols(),
            });
        }
        let phases = phase.resolve(R_list.nrows())?;
        for &(orb_i, orb_j) in pairs {
            self.check_orb(orb_i)?;
            self.check_orb(orb_j)?;
        }
        let tmp = tmp.to_complex();
        for &(orb_i, orb_j) in pairs {
            for (R, ph) in R_list.outer_iter().zip(phases.iter()) {
                let R = lattice_vector(&R)?;
                self.push_hop(Hopping {
                    tmp: tmp * *ph,
                    orb_i,
                    orb_j,
                    R,
                });
            }
        }
        Ok(())
    }

    pub(crate) fn check_orb(&self, orb: OrbIndex) -> Result<()> {
        let (atom, orbital) = orb;
        let Some(a) = self.atoms.get(atom) else {
            return Err(TbError::AtomIndexOutOfRange {
                index: atom,
                natom: self.atoms.len(),
            });
        };
        if orbital >= a.norb() {
            return Err(TbError::OrbitalIndexOutOfRange {
                atom,
                orbital,
                norb: a.norb(),
            });
        }
        Ok(())
    }

    fn push_hop(&mut self, hop: Hopping) {
        if hop.is_self_hopping() {
            warn!(
                "hopping {} joins an orbital to itself, the diagonal gets twice its real part",
                hop
            );
        }
        self.hoppings.push(hop);
    }
}

fn lattice_vector<T: Data<Elem = isize>>(R: &ArrayBase<T, Ix1>) -> Result<[isize; 3]> {
    if R.len() != DIM_R {
        return Err(TbError::DimensionMismatch {
            context: "lattice vector",
            expected: DIM_R,
            found: R.len(),
        });
    }
    Ok([R[[0]], R[[1]], R[[2]]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::*;
    use num_complex::Complex;

    fn two_atom_model() -> Model {
        let mut model = Model::new();
        model
            .add_atom(&array![0.0, 1.0], 1, &array![0.0, 0.0, 0.0])
            .unwrap();
        model
            .add_atom(&array![0.5], 0, &array![0.5, 0.5, 0.0])
            .unwrap();
        model
    }

    #[test]
    fn add_atom_indices_increase() {
        let mut model = Model::new();
        for (n, norb) in [3usize, 1, 0, 2].iter().enumerate() {
            let onsite = Array1::<f64>::zeros(*norb);
            let index = model
                .add_atom(&onsite, n * 7, &array![0.1, 1.5, -2.0])
                .unwrap();
            assert_eq!(index, n);
        }
        assert_eq!(model.natom(), 4);
        assert_eq!(model.norb(), 6);
    }

    #[test]
    fn add_atom_rejects_bad_position() {
        let mut model = Model::new();
        let err = model
            .add_atom(&array![0.0], 1, &array![0.0, 0.0])
            .unwrap_err();
        assert!(matches!(
            err,
            TbError::DimensionMismatch {
                expected: 3,
                found: 2,
                ..
            }
        ));
        assert_eq!(model.natom(), 0);
    }

    #[test]
    fn add_hop_validates_indices() {
        let mut model = two_atom_model();
        let R = array![0, 0, 0];
        assert!(matches!(
            model.add_hop(1.0, (2, 0), (0, 0), &R),
            Err(TbError::AtomIndexOutOfRange { index: 2, natom: 2 })
        ));
        assert!(matches!(
            model.add_hop(1.0, (0, 0), (1, 1), &R),
            Err(TbError::OrbitalIndexOutOfRange {
                atom: 1,
                orbital: 1,
                norb: 1
            })
        ));
        assert!(matches!(
            model.add_hop(1.0, (0, 0), (1, 0), &array![0, 1]),
            Err(TbError::DimensionMismatch { found: 2, .. })
        ));
        assert_eq!(model.nhop(), 0);
        model.add_hop(1.0, (0, 1), (1, 0), &array![1, 0, -1]).unwrap();
        assert_eq!(model.hoppings()[0].R(), [1, 0, -1]);
    }

    #[test]
    fn add_hop_phase_multiplies_amplitude() {
        let mut model = two_atom_model();
        let li = Complex::new(0.0, 1.0);
        model
            .add_hop_phase(2.0, (0, 0), (1, 0), &array![0, 0, 1], li)
            .unwrap();
        assert_eq!(model.hoppings()[0].amplitude(), Complex::new(0.0, 2.0));
    }

    #[test]
    fn uniform_phase_equals_single_calls() {
        let R_list = array![[0, 0, 0], [1, 0, 0], [0, -1, 2]];
        let ph = Complex::new(0.0, -1.0);
        let mut batch = two_atom_model();
        batch
            .add_hops(0.3, &[((0, 0), (1, 0))], &R_list, &HopPhase::Uniform(ph))
            .unwrap();
        let mut single = two_atom_model();
        for R in R_list.outer_iter() {
            single.add_hop_phase(0.3, (0, 0), (1, 0), &R, ph).unwrap();
        }
        assert_eq!(batch, single);
    }

    #[test]
    fn per_vector_phase_pairs_index_for_index() {
        let R_list = array![[0, 0, 0], [1, 0, 0]];
        let phases = vec![Complex::new(1.0, 0.0), Complex::new(0.0, 1.0)];
        let pairs = [((0, 0), (1, 0)), ((0, 1), (0, 0))];
        let mut batch = two_atom_model();
        batch
            .add_hops(1.0, &pairs, &R_list, &HopPhase::PerVector(phases.clone()))
            .unwrap();
        let mut single = two_atom_model();
        for &(orb_i, orb_j) in pairs.iter() {
            for (R, ph) in R_list.outer_iter().zip(phases.iter()) {
                single.add_hop_phase(1.0, orb_i, orb_j, &R, *ph).unwrap();
            }
        }
        assert_eq!(batch, single);
        assert_eq!(batch.nhop(), 4);
    }

    #[test]
    fn single_phase_in_list_is_broadcast() {
        let R_list = array![[0, 0, 0], [1, 0, 0], [0, 1, 0]];
        let ph = Complex::new(-1.0, 0.0);
        let mut batch = two_atom_model();
        batch
            .add_hops(1.0, &[((0, 0), (1, 0))], &R_list, &HopPhase::PerVector(vec![ph]))
            .unwrap();
        assert!(batch.hoppings().iter().all(|h| h.amplitude() == ph));
    }

    #[test]
    fn batch_is_all_or_nothing() {
        let R_list = array![[0, 0, 0], [1, 0, 0], [0, 1, 0]];
        let mut model = two_atom_model();
        let err = model
            .add_hops(
                1.0,
                &[((0, 0), (1, 0))],
                &R_list,
                &HopPhase::PerVector(vec![Complex::new(1.0, 0.0); 2]),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            TbError::PhaseLengthMismatch {
                phases: 2,
                vectors: 3
            }
        ));
        let err = model
            .add_hops(
                1.0,
                &[((0, 0), (1, 0)), ((0, 0), (5, 0))],
                &R_list,
                &HopPhase::default(),
            )
            .unwrap_err();
        assert!(matches!(err, TbError::AtomIndexOutOfRange { index: 5, .. }));
        let err = model
            .add_hops(1.0, &[((0, 0), (1, 0))], &array![[0, 0]], &HopPhase::default())
            .unwrap_err();
        assert!(matches!(err, TbError::DimensionMismatch { found: 2, .. }));
        assert_eq!(model.nhop(), 0);
    }
}
