//! Numerical safeguards of the string overlap engine.
use serde::{Deserialize, Serialize};

/// Optional checks applied while the overlap matrices of a string are computed.
///
/// Both checks are off by default. When one trips, the string fails with an error
/// that names the sample, so the caller can refine the string or give it up.
///
/// ```
/// use tbstring::OverlapConfig;
/// let config: OverlapConfig = serde_json::from_str(r#"{"min_gap": 1e-6}"#).unwrap();
/// assert_eq!(config.min_gap, Some(1e-6));
/// assert_eq!(config.min_singular_value, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OverlapConfig {
    /// Smallest allowed distance between the highest occupied and the lowest empty
    /// eigenvalue at a sample point.
    pub min_gap: Option<f64>,
    /// Smallest allowed singular value of an overlap matrix.
    pub min_singular_value: Option<f64>,
}

impl OverlapConfig {
    pub fn with_min_gap(mut self, min_gap: f64) -> Self {
        self.min_gap = Some(min_gap);
        self
    }
    pub fn with_min_singular_value(mut self, min_singular_value: f64) -> Self {
        self.min_singular_value = Some(min_singular_value);
        self
    }
}
