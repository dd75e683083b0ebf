use crate::Atom;
use crate::Hopping;
use crate::Model;
use ndarray::*;

impl Model {
    #[inline(always)]
    pub fn atom_position(&self) -> Array2<f64> {
        let mut atom_position = Array2::zeros((self.natom(), crate::DIM_R));
        atom_position
            .outer_iter_mut()
            .zip(self.atoms.iter())
            .for_each(|(mut atom_p, atom)| {
                atom_p.assign(&atom.position());
            });
        atom_position
    }
    /// The number of orbitals of each atom.
    #[inline(always)]
    pub fn atom_list(&self) -> Vec<usize> {
        self.atoms.iter().map(|a| a.norb()).collect()
    }
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }
    pub fn hoppings(&self) -> &[Hopping] {
        &self.hoppings
    }
    #[inline(always)]
    pub fn natom(&self) -> usize {
        self.atoms.len()
    }
    /// Total number of orbitals, the size of the Bloch Hamiltonian.
    #[inline(always)]
    pub fn norb(&self) -> usize {
        self.atoms.iter().map(|a| a.norb()).sum()
    }
    #[inline(always)]
    pub fn nhop(&self) -> usize {
        self.hoppings.len()
    }
    /// Total number of electrons, i.e. the number of occupied bands.
    #[inline(always)]
    pub fn nelectron(&self) -> usize {
        self.atoms.iter().map(|a| a.nelectron()).sum()
    }
}
