use crate::DIM_R;
use crate::error::{Result, TbError};
use ndarray::{Array1, Array2};

/// A closed string of k-points along one reciprocal axis.
///
/// The string runs over `direction` from 0 to 1 with the other two reduced coordinates held
/// at `fixed`, given in increasing axis order. It is sampled at `n - 1` points,
/// $k=0,\frac{1}{n-1},\cdots,\frac{n-2}{n-1}$; the point $k=1$ is the first one again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KString {
    direction: usize,
    fixed: [f64; 2],
    n: usize,
}

impl KString {
    pub fn new(direction: usize, fixed: &[f64], n: usize) -> Result<KString> {
        if direction >= DIM_R {
            return Err(TbError::InvalidDirectionIndex {
                index: direction,
                dim: DIM_R,
            });
        }
        let fixed: [f64; 2] = fixed.try_into().map_err(|_| TbError::DimensionMismatch {
            context: "fixed string coordinates",
            expected: DIM_R - 1,
            found: fixed.len(),
        })?;
        if let Some(&value) = fixed.iter().find(|x| !x.is_finite()) {
            return Err(TbError::NonFiniteCoordinate {
                context: "fixed string coordinate",
                value,
            });
        }
        if n < 2 {
            return Err(TbError::InvalidResolution(n));
        }
        Ok(KString {
            direction,
            fixed,
            n,
        })
    }
    pub fn direction(&self) -> usize {
        self.direction
    }
    pub fn fixed(&self) -> [f64; 2] {
        self.fixed
    }
    /// The resolution, one more than the number of distinct points.
    pub fn n(&self) -> usize {
        self.n
    }
    /// Number of distinct sample points, `n - 1`.
    pub fn nk(&self) -> usize {
        self.n - 1
    }
    /// The sample points, one per row.
    pub fn k_points(&self) -> Array2<f64> {
        let nk = self.nk();
        let mut kvec = Array2::<f64>::zeros((nk, DIM_R));
        for (i, mut k) in kvec.outer_iter_mut().enumerate() {
            let mut fixed = self.fixed.iter();
            for r in 0..DIM_R {
                k[[r]] = if r == self.direction {
                    (i as f64) / (nk as f64)
                } else {
                    fixed.next().copied().unwrap_or_default()
                };
            }
        }
        kvec
    }
    /// The step between two neighbouring points, only the `direction` component is non-zero.
    pub fn dk(&self) -> Array1<f64> {
        let mut dk = Array1::<f64>::zeros(DIM_R);
        dk[[self.direction]] = 1.0 / (self.nk() as f64);
        dk
    }
}
