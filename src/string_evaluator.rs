//! Strings on a plane of the Brillouin zone.
//!
//! A surface of strings is described by the axis the strings run along, one axis held at a
//! constant value (the plane), and the remaining free axis which labels the individual
//! strings. [`StringEvaluator`] turns the free coordinate into the two fixed coordinates
//! [`BlochHamiltonian::overlap_matrices`] expects.
use crate::DIM_R;
use crate::error::{Result, TbError};
use crate::hamiltonian::BlochHamiltonian;
use ndarray::Array3;
use num_complex::Complex;

#[derive(Debug, Clone, Copy)]
pub struct StringEvaluator<'a> {
    ham: &'a BlochHamiltonian,
    string_dir: usize,
    plane_dir: usize,
    plane_value: f64,
}

impl<'a> StringEvaluator<'a> {
    pub fn new(
        ham: &'a BlochHamiltonian,
        string_dir: usize,
        plane_dir: usize,
        plane_value: f64,
    ) -> Result<Self> {
        for index in [string_dir, plane_dir] {
            if index >= DIM_R {
                return Err(TbError::InvalidDirectionIndex { index, dim: DIM_R });
            }
        }
        if string_dir == plane_dir {
            return Err(TbError::DegenerateStringPlane(string_dir));
        }
        if !plane_value.is_finite() {
            return Err(TbError::NonFiniteCoordinate {
                context: "plane value",
                value: plane_value,
            });
        }
        Ok(StringEvaluator {
            ham,
            string_dir,
            plane_dir,
            plane_value,
        })
    }

    pub fn string_dir(&self) -> usize {
        self.string_dir
    }
    pub fn plane_dir(&self) -> usize {
        self.plane_dir
    }
    /// The axis that is neither the string nor the plane axis.
    pub fn free_dir(&self) -> usize {
        DIM_R - self.string_dir - self.plane_dir
    }

    /// The fixed coordinates of the string labelled `kx`, in increasing axis order.
    pub fn fixed_coords(&self, kx: f64) -> [f64; 2] {
        if self.plane_dir < self.free_dir() {
            [self.plane_value, kx]
        } else {
            [kx, self.plane_value]
        }
    }

    /// The overlap matrices of the string labelled `kx`, sampled with resolution `n`.
    pub fn overlap_matrices(&self, kx: f64, n: usize) -> Result<Array3<Complex<f64>>> {
        self.ham
            .overlap_matrices(self.string_dir, &self.fixed_coords(kx), n)
    }
}

impl BlochHamiltonian {
    /// A closure `(kx, n) -> overlap matrices` for the strings along `string_dir` on the
    /// plane where axis `plane_dir` equals `plane_value`.
    ///
    /// The closure borrows the Hamiltonian and may be shared between threads.
    ///
    /// ```
    /// use ndarray::*;
    /// use tbstring::*;
    /// let mut model = Model::new();
    /// model.add_atom(&array![0.0], 1, &array![0.0, 0.0, 0.0]).unwrap();
    /// let ham = model.build().unwrap();
    /// let f = ham.make_string_evaluator(2, 0, 0.5).unwrap();
    /// assert_eq!(f(0.25, 8).unwrap().dim(), (7, 1, 1));
    /// ```
    pub fn make_string_evaluator(
        &self,
        string_dir: usize,
        plane_dir: usize,
        plane_value: f64,
    ) -> Result<impl Fn(f64, usize) -> Result<Array3<Complex<f64>>> + Send + Sync + '_> {
        let evaluator = StringEvaluator::new(self, string_dir, plane_dir, plane_value)?;
        Ok(move |kx: f64, n: usize| evaluator.overlap_matrices(kx, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Model;
    use approx::assert_abs_diff_eq;
    use ndarray::*;

    fn test_ham() -> BlochHamiltonian {
        let mut model = Model::new();
        model
            .add_atom(&array![-1.0, 0.5], 1, &array![0.1, 0.2, 0.3])
            .unwrap();
        model
            .add_atom(&array![0.8], 0, &array![0.6, 0.4, 0.7])
            .unwrap();
        model.add_hop(0.4, (0, 0), (1, 0), &array![1, 0, 0]).unwrap();
        model.add_hop(0.3, (0, 1), (1, 0), &array![0, 1, 0]).unwrap();
        model.add_hop(0.2, (0, 0), (0, 1), &array![0, 0, 1]).unwrap();
        model.build().unwrap()
    }

    #[test]
    fn coordinate_order_for_every_axis_pair() {
        let ham = test_ham();
        let (kx, pv) = (0.125, 0.75);
        let cases = [
            (0, 1, [pv, kx]),
            (0, 2, [kx, pv]),
            (1, 0, [pv, kx]),
            (1, 2, [kx, pv]),
            (2, 0, [pv, kx]),
            (2, 1, [kx, pv]),
        ];
        for (string_dir, plane_dir, expect) in cases {
            let evaluator = StringEvaluator::new(&ham, string_dir, plane_dir, pv).unwrap();
            assert_eq!(
                evaluator.fixed_coords(kx),
                expect,
                "string {} plane {}",
                string_dir,
                plane_dir
            );
            let plane_first = DIM_R - string_dir > 2 * plane_dir;
            assert_eq!(plane_first, expect[0] == pv);
        }
    }

    #[test]
    fn evaluator_forwards_to_the_engine() {
        let ham = test_ham();
        let f = ham.make_string_evaluator(1, 2, 0.3).unwrap();
        let got = f(0.45, 9).unwrap();
        let expect = ham.overlap_matrices(1, &[0.45, 0.3], 9).unwrap();
        assert_abs_diff_eq!(got, expect, epsilon = 1e-14);

        let f = ham.make_string_evaluator(1, 0, 0.3).unwrap();
        let got = f(0.45, 9).unwrap();
        let expect = ham.overlap_matrices(1, &[0.3, 0.45], 9).unwrap();
        assert_abs_diff_eq!(got, expect, epsilon = 1e-14);
        assert!(matches!(f(0.45, 1), Err(TbError::InvalidResolution(1))));
    }

    #[test]
    fn invalid_axes() {
        let ham = test_ham();
        assert!(matches!(
            StringEvaluator::new(&ham, 3, 0, 0.0),
            Err(TbError::InvalidDirectionIndex { index: 3, .. })
        ));
        assert!(matches!(
            ham.make_string_evaluator(0, 5, 0.0),
            Err(TbError::InvalidDirectionIndex { index: 5, .. })
        ));
        assert!(matches!(
            ham.make_string_evaluator(1, 1, 0.0),
            Err(TbError::DegenerateStringPlane(1))
        ));
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let ham = test_ham();
        assert!(matches!(
            ham.make_string_evaluator(0, 1, f64::NAN),
            Err(TbError::NonFiniteCoordinate {
                context: "plane value",
                ..
            })
        ));
        let f = ham.make_string_evaluator(0, 1, 0.5).unwrap();
        assert!(matches!(
            f(f64::NEG_INFINITY, 6),
            Err(TbError::NonFiniteCoordinate {
                context: "fixed string coordinate",
                ..
            })
        ));
    }
}
