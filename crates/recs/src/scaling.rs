//! Numeric feature standardization
//!
//! Zero-mean, unit-variance scaling fitted per catalog load. A column with
//! no variance scales to all zeros rather than dividing by zero.

use crate::error::{RecsError, Result};
use ndarray::{Array1, Array2, Axis};

const VARIANCE_FLOOR: f32 = 1e-8;

/// Per-column standard scaler.
#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    mean: Option<Array1<f32>>,
    std: Option<Array1<f32>>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn column means and standard deviations (population form).
    pub fn fit(&mut self, x: &Array2<f32>) {
        let mean = x
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(x.ncols()));
        let variance = x.map_axis(Axis(0), |col| {
            let m = col.mean().unwrap_or(0.0);
            col.iter().map(|v| (v - m) * (v - m)).sum::<f32>() / col.len().max(1) as f32
        });
        self.std = Some(variance.mapv(f32::sqrt));
        self.mean = Some(mean);
    }

    /// Standardize `x` with the fitted statistics.
    pub fn transform(&self, x: &Array2<f32>) -> Result<Array2<f32>> {
        let (mean, std) = match (&self.mean, &self.std) {
            (Some(mean), Some(std)) => (mean, std),
            _ => {
                return Err(RecsError::NotFitted {
                    what: "standard scaler",
                })
            }
        };
        if x.ncols() != mean.len() {
            return Err(RecsError::DimensionMismatch {
                context: "standard scaler input columns",
                expected: mean.len(),
                actual: x.ncols(),
            });
        }

        let mut out = Array2::<f32>::zeros(x.dim());
        for j in 0..x.ncols() {
            let (m, s) = (mean[j], std[j]);
            for i in 0..x.nrows() {
                out[[i, j]] = if s > VARIANCE_FLOOR {
                    (x[[i, j]] - m) / s
                } else {
                    0.0
                };
            }
        }
        Ok(out)
    }

    /// Fit on `x` and standardize it in one pass.
    pub fn fit_transform(&mut self, x: &Array2<f32>) -> Result<Array2<f32>> {
        self.fit(x);
        self.transform(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn scaled_columns_have_zero_mean_unit_variance() {
        let x = array![[0.0, 10.0], [1.0, 20.0], [2.0, 30.0]];
        let scaled = StandardScaler::new().fit_transform(&x).expect("scale");

        for j in 0..2 {
            let col = scaled.column(j);
            let mean = col.mean().unwrap();
            let var = col.iter().map(|v| (v - mean) * (v - mean)).sum::<f32>() / 3.0;
            assert!(mean.abs() < 1e-5);
            assert!((var - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn constant_column_scales_to_zeros() {
        let x = array![[300.0], [300.0], [300.0]];
        let scaled = StandardScaler::new().fit_transform(&x).expect("scale");
        assert!(scaled.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn transform_before_fit_is_an_error() {
        let scaler = StandardScaler::new();
        let result = scaler.transform(&array![[1.0]]);
        assert!(matches!(result, Err(RecsError::NotFitted { .. })));
    }

    #[test]
    fn column_count_mismatch_is_an_error() {
        let mut scaler = StandardScaler::new();
        scaler.fit(&array![[1.0, 2.0], [3.0, 4.0]]);
        let result = scaler.transform(&array![[1.0], [2.0]]);
        assert!(matches!(result, Err(RecsError::DimensionMismatch { .. })));
    }
}
