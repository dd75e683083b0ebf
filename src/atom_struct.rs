use ndarray::{Array1, ArrayView1, aview1};
use num_complex::Complex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An orbital is addressed by `(atom index, orbital index within that atom)`.
pub type OrbIndex = (usize, usize);

/// An atom of the tight-binding model: its orbital energies, the number of electrons
/// it brings and its position in fractional coordinates of the lattice.
///
/// The position is not folded back into the unit cell. It is stored as a fixed array, so a
/// deserialized atom always has exactly three coordinates.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Atom {
    position: [f64; 3],
    onsite: Array1<f64>,
    nelectron: usize,
}

impl Atom {
    pub(crate) fn new(position: [f64; 3], onsite: Array1<f64>, nelectron: usize) -> Atom {
        Atom {
            position,
            onsite,
            nelectron,
        }
    }
    pub fn position(&self) -> ArrayView1<'_, f64> {
        aview1(&self.position)
    }
    /// The orbital energies, in orbital order.
    pub fn onsite(&self) -> ArrayView1<'_, f64> {
        self.onsite.view()
    }
    pub fn norb(&self) -> usize {
        self.onsite.len()
    }
    pub fn nelectron(&self) -> usize {
        self.nelectron
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Atom {{ position: {:?}, onsite: {}, nelectron: {} }}",
            self.position, self.onsite, self.nelectron
        )
    }
}

/// One stored hopping $\bra{i\bm 0}\hat H\ket{j\bm R}$.
///
/// Only this direction is kept, the Hermitian partner is added when the Bloch
/// Hamiltonian is assembled.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Hopping {
    pub(crate) tmp: Complex<f64>,
    pub(crate) orb_i: OrbIndex,
    pub(crate) orb_j: OrbIndex,
    pub(crate) R: [isize; 3],
}

#[allow(non_snake_case)]
impl Hopping {
    pub fn amplitude(&self) -> Complex<f64> {
        self.tmp
    }
    pub fn orb_i(&self) -> OrbIndex {
        self.orb_i
    }
    pub fn orb_j(&self) -> OrbIndex {
        self.orb_j
    }
    /// The unit cell of `orb_j` relative to the one of `orb_i`.
    pub fn R(&self) -> [isize; 3] {
        self.R
    }
    /// Whether this hopping joins an orbital to itself (in any cell).
    pub fn is_self_hopping(&self) -> bool {
        self.orb_i == self.orb_j
    }
}

impl fmt::Display for Hopping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hopping {{ {} : {:?} -> {:?} + {:?} }}",
            self.tmp, self.orb_i, self.orb_j, self.R
        )
    }
}
