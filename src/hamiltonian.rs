//! The Bloch Hamiltonian of a [`Model`], built once and then only read.
use crate::error::{Result, TbError};
use crate::math::exp_2pi_i;
use crate::{DIM_R, Model};
use log::debug;
use ndarray::*;
use num_complex::Complex;

/// The Bloch Hamiltonian $H_{mn}(\bm k)$ of a model, together with everything the string
/// overlap engine needs from the model.
///
/// It is produced by [`Model::build`] and keeps its own copy of the data, so editing the
/// model afterwards does not affect it. It is immutable and `Send + Sync`, any number of
/// strings can be evaluated on it at the same time.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct BlochHamiltonian {
    /// Number of occupied states, the sum of the atoms' electrons.
    pub(crate) nelectron: usize,
    /// The orbital energies, in flat orbital order.
    pub(crate) onsite: Array1<f64>,
    /// For every flat orbital index, the fractional position of the atom owning it.
    pub(crate) orb_position: Array2<f64>,
    /// `orb_index[atom][orbital]` is the flat orbital index.
    pub(crate) orb_index: Vec<Vec<usize>>,
    /// Hopping amplitudes, same order as `hop_ind` and `hamR`.
    pub(crate) hop: Array1<Complex<f64>>,
    /// Flat `(i, j)` of every hopping.
    pub(crate) hop_ind: Vec<(usize, usize)>,
    /// The lattice vector of every hopping, one per row.
    pub(crate) hamR: Array2<isize>,
}

impl Model {
    /// Assembles the Bloch Hamiltonian.
    ///
    /// Orbitals are numbered atom by atom, in the order they were added. Every hopping is
    /// checked again against the atoms (a deserialized model may not have gone through
    /// [`Model::add_hop`]), and the model may not hold more electrons than states.
    ///
    /// Each call gives a new, independent [`BlochHamiltonian`].
    pub fn build(&self) -> Result<BlochHamiltonian> {
        let nsta = self.norb();
        let nelectron = self.nelectron();
        if nelectron > nsta {
            return Err(TbError::TooManyElectrons {
                electrons: nelectron,
                states: nsta,
            });
        }
        let mut orb_index = Vec::with_capacity(self.natom());
        let mut onsite = Array1::<f64>::zeros(nsta);
        let mut orb_position = Array2::<f64>::zeros((nsta, DIM_R));
        let mut count = 0;
        for atom in self.atoms.iter() {
            let norb = atom.norb();
            orb_index.push((count..count + norb).collect::<Vec<usize>>());
            onsite.slice_mut(s![count..count + norb]).assign(&atom.onsite());
            for mut row in orb_position
                .slice_mut(s![count..count + norb, ..])
                .outer_iter_mut()
            {
                row.assign(&atom.position());
            }
            count += norb;
        }

        let nhop = self.nhop();
        let mut hop = Array1::<Complex<f64>>::zeros(nhop);
        let mut hop_ind = Vec::with_capacity(nhop);
        let mut hamR = Array2::<isize>::zeros((nhop, DIM_R));
        for (n, hopping) in self.hoppings.iter().enumerate() {
            self.check_orb(hopping.orb_i)?;
            self.check_orb(hopping.orb_j)?;
            let (ai, oi) = hopping.orb_i;
            let (aj, oj) = hopping.orb_j;
            hop[[n]] = hopping.tmp;
            hop_ind.push((orb_index[ai][oi], orb_index[aj][oj]));
            hamR.row_mut(n).assign(&aview1(&hopping.R));
        }
        debug!(
            "built Bloch Hamiltonian: {} atoms, {} states, {} hoppings, {} electrons",
            self.natom(),
            nsta,
            nhop,
            nelectron
        );
        Ok(BlochHamiltonian {
            nelectron,
            onsite,
            orb_position,
            orb_index,
            hop,
            hop_ind,
            hamR,
        })
    }
}

impl BlochHamiltonian {
    /// Size of the Hamiltonian matrix.
    #[inline(always)]
    pub fn nsta(&self) -> usize {
        self.onsite.len()
    }
    /// Number of occupied states.
    #[inline(always)]
    pub fn nelectron(&self) -> usize {
        self.nelectron
    }
    pub fn onsite(&self) -> ArrayView1<'_, f64> {
        self.onsite.view()
    }
    /// `nsta` x 3, the fractional position of the atom owning each orbital.
    pub fn orb_position(&self) -> ArrayView2<'_, f64> {
        self.orb_position.view()
    }
    /// The flat index of orbital `orbital` of atom `atom`.
    pub fn orb_index(&self, atom: usize, orbital: usize) -> Option<usize> {
        self.orb_index.get(atom)?.get(orbital).copied()
    }

    #[allow(non_snake_case)]
    #[inline(always)]
    pub fn gen_ham<S: Data<Elem = f64>>(
        &self,
        kvec: &ArrayBase<S, Ix1>,
    ) -> Result<Array2<Complex<f64>>> {
        //!这个是做傅里叶变换, 将实空间的哈密顿量变换到倒空间的哈密顿量
        //!
        //!$$H_{ij}(\bm k)=\epsilon_i\delta_{ij}+\sum t\, e^{2\pi i\bm R\cdot\bm k}+\lt(t\, e^{2\pi i\bm R\cdot\bm k}\rt)^*$$
        //!
        //!where the first sum runs over the stored hoppings $i\to j$ and the second over
        //!$j\to i$. `kvec` is in reduced coordinates of the reciprocal lattice. No orbital
        //!position enters here, the positions only show up in the overlap gauge factor.
        if kvec.len() != DIM_R {
            return Err(TbError::DimensionMismatch {
                context: "k-vector",
                expected: DIM_R,
                found: kvec.len(),
            });
        }
        let Us = exp_2pi_i(&self.hamR.mapv(|x| x as f64).dot(kvec));
        let mut hamk = Array2::from_diag(&self.onsite.mapv(|x| Complex::new(x, 0.0)));
        for ((&(i, j), t), us) in self.hop_ind.iter().zip(self.hop.iter()).zip(Us.iter()) {
            let tmp = t * us;
            hamk[[i, j]] += tmp;
            hamk[[j, i]] += tmp.conj();
        }
        Ok(hamk)
    }
}
