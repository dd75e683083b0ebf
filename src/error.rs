//! src/error.rs
//! Error types for the model registry, the Bloch Hamiltonian and the string overlap engine.
//! Every fallible operation returns [`Result`], nothing in the library panics on bad input.

use ndarray_linalg::error::LinalgError;
use thiserror::Error;

/// The primary error type for all fallible operations in this library.
#[derive(Error, Debug)]
pub enum TbError {
    // --- Invalid Input and Arguments ---
    #[error("Dimension mismatch for '{context}': expected {expected}, got {found}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Atom index {index} is out of range, the model has {natom} atoms")]
    AtomIndexOutOfRange { index: usize, natom: usize },

    #[error("Orbital index {orbital} is out of range for atom {atom}, which has {norb} orbitals")]
    OrbitalIndexOutOfRange {
        atom: usize,
        orbital: usize,
        norb: usize,
    },

    #[error("Got {phases} phase factors for {vectors} lattice vectors, expected 1 or {vectors}")]
    PhaseLengthMismatch { phases: usize, vectors: usize },

    #[error("The provided direction index '{index}' is out of bounds for dimension '{dim}'")]
    InvalidDirectionIndex { index: usize, dim: usize },

    #[error("The {context} {value} is not a finite number")]
    NonFiniteCoordinate { context: &'static str, value: f64 },

    #[error("A string needs at least 2 points, but the resolution is {0}")]
    InvalidResolution(usize),

    #[error("The string direction and the plane axis are both {0}")]
    DegenerateStringPlane(usize),

    // --- Model Consistency ---
    #[error("The model holds {electrons} electrons but only {states} states")]
    TooManyElectrons { electrons: usize, states: usize },

    // --- Linear Algebra and Numerical Errors ---
    #[error(
        "Eigen-solve failed at sample {sample} of the string along {direction} at {fixed:?}"
    )]
    EigenSolveFailed {
        direction: usize,
        fixed: [f64; 2],
        sample: usize,
        #[source]
        source: LinalgError,
    },

    #[error(
        "Occupied/unoccupied gap {gap:e} at sample {sample} of the string along {direction} at {fixed:?} is below the threshold"
    )]
    GapClosed {
        direction: usize,
        fixed: [f64; 2],
        sample: usize,
        gap: f64,
    },

    #[error(
        "Overlap matrix {pair} of the string along {direction} at {fixed:?} is ill-conditioned, smallest singular value {singular_value:e}"
    )]
    IllConditionedOverlap {
        direction: usize,
        fixed: [f64; 2],
        pair: usize,
        singular_value: f64,
    },

    #[error("Eigen-solve failed at k = {k:?}")]
    EigenSolveFailedAt {
        k: [f64; 3],
        #[source]
        source: LinalgError,
    },

    #[error("Linear algebra operation failed")]
    Linalg(#[from] LinalgError),
}

/// A specialized `Result` type for this library's operations.
pub type Result<T> = std::result::Result<T, TbError>;
