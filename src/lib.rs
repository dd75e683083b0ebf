#![allow(non_snake_case, non_camel_case_types)]
//! This crate builds tight-binding models and turns them into the overlap matrices a
//! Wilson loop needs:
//!
//! 1: Register atoms (orbital energies, electrons, fractional position) and hoppings in a [`Model`]
//!
//! 2: [`Model::build`] the Bloch Hamiltonian $H_{mn}(\bm k)$ as an immutable [`BlochHamiltonian`]
//!
//! 3: Walk a closed string of k-points and get the occupied-subspace overlap matrices
//! $M_{mn}=\braket{u_{m,\bm k_p}}{u_{n,\bm k_{p+1}}}$, see [`BlochHamiltonian::overlap_matrices`]
//!
//! 4: Drive many strings across a plane with a [`StringEvaluator`]
//!
//! The reduction of the overlap matrices to Wannier charge centres is left to the caller.
//!
//! # Examples
//! ```
//! use ndarray::*;
//! use tbstring::*;
//! let mut model = Model::new();
//! let a = model.add_atom(&array![0.0, 0.0], 1, &array![0.0, 0.0, 0.0]).unwrap();
//! model.add_hop(1.0, (a, 0), (a, 1), &array![0, 0, 0]).unwrap();
//! let ham = model.build().unwrap();
//! let ovr = ham.overlap_matrices(0, &[0.0, 0.0], 11).unwrap();
//! assert_eq!(ovr.shape(), &[10, 1, 1]);
//! ```

#[cfg(any(feature = "intel-mkl-system", feature = "intel-mkl-static"))]
extern crate intel_mkl_src as _src;

#[cfg(any(feature = "openblas-system", feature = "openblas-static"))]
extern crate openblas_src as _src;

#[cfg(any(feature = "netlib-system", feature = "netlib-static"))]
extern crate netlib_src as _src;

pub mod atom_struct;
pub mod basis;
pub mod config;
pub mod error;
pub mod generics;
pub mod geometry;
pub mod hamiltonian;
pub mod kpoints;
pub mod math;
pub mod model_struct;
pub mod string_evaluator;

pub use crate::atom_struct::{Atom, Hopping, OrbIndex};
pub use crate::config::OverlapConfig;
pub use crate::error::{Result, TbError};
pub use crate::geometry::select_occupied;
pub use crate::hamiltonian::BlochHamiltonian;
pub use crate::kpoints::KString;
pub use crate::string_evaluator::StringEvaluator;

use num_complex::Complex;
use serde::{Deserialize, Serialize};

/// The real space dimension every model of this crate lives in.
pub const DIM_R: usize = 3;

/// The tight-binding model registry.
///
/// Atoms and hoppings are kept in insertion order, the order of the atoms defines the
/// flat orbital index used by the Hamiltonian: all orbitals of atom 0 first, then atom 1, ...
///
/// The model itself holds no derived state, call [`Model::build`] to get a Hamiltonian.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Model {
    /// The atoms, indexed by the value [`Model::add_atom`] returned.
    pub(crate) atoms: Vec<Atom>,
    /// The forward hoppings $\bra{i\bm 0}\hat H\ket{j\bm R}$.
    pub(crate) hoppings: Vec<Hopping>,
}

/// How the phase factors of a batch of hoppings are distributed over the lattice vectors.
#[derive(Debug, Clone, PartialEq)]
pub enum HopPhase {
    /// Every lattice vector gets the same factor.
    Uniform(Complex<f64>),
    /// One factor per lattice vector. A list of length 1 is applied to every vector.
    PerVector(Vec<Complex<f64>>),
}

impl Default for HopPhase {
    fn default() -> Self {
        HopPhase::Uniform(Complex::new(1.0, 0.0))
    }
}

impl HopPhase {
    /// One factor for each of the `nR` lattice vectors of a batch.
    pub(crate) fn resolve(&self, nR: usize) -> Result<Vec<Complex<f64>>> {
        match self {
            HopPhase::Uniform(c) => Ok(vec![*c; nR]),
            HopPhase::PerVector(list) if list.len() == 1 => Ok(vec![list[0]; nR]),
            HopPhase::PerVector(list) if list.len() == nR => Ok(list.clone()),
            HopPhase::PerVector(list) => Err(TbError::PhaseLengthMismatch {
                phases: list.len(),
                vectors: nR,
            }),
        }
    }
}
