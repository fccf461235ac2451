use linfilt_core::num_rs::{correlate, ConvolveMode};
use linfilt_core::{Error, Result};
use ndarray::ArrayView1;
use num_complex::Complex64;

use super::BackFilter;
use crate::polynomial::Polynomial;
use crate::signal::traits::FrequencyResponse;

/// Two-sided filter with `weight(-k) == weight(k)`, stored by its
/// non-negative lags `w0, w1, ..., wq`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SymmetricWeights"))]
pub struct SymmetricFilter {
    weights: Vec<f64>,
}

/// Unvalidated wire form, checked through [`SymmetricFilter::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SymmetricWeights {
    weights: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<SymmetricWeights> for SymmetricFilter {
    type Error = Error;

    fn try_from(raw: SymmetricWeights) -> Result<Self> {
        Self::new(raw.weights)
    }
}

impl SymmetricFilter {
    /// Filter with weights `w0, w1, ..., wq`. Trailing zeros are trimmed.
    ///
    /// # Errors
    /// [`Error::EmptyInput`] for no weights, [`Error::InvalidArg`] for a
    /// non-finite weight.
    pub fn new(mut weights: Vec<f64>) -> Result<Self> {
        if weights.is_empty() {
            return Err(Error::EmptyInput {
                arg: "weights".into(),
            });
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(Error::InvalidArg {
                arg: "weights".into(),
                reason: "weights must be finite".into(),
            });
        }
        while weights.len() > 1 && weights.last() == Some(&0.0) {
            weights.pop();
        }
        Ok(Self { weights })
    }

    /// `f(B) f(F)`: the autocorrelation of the causal filter's weights.
    pub fn from_filter(f: &BackFilter) -> Self {
        let w = ArrayView1::from(f.weights());
        let weights = match correlate(w, w, ConvolveMode::Full) {
            Ok(full) => full.iter().skip(f.degree()).copied().collect(),
            // a polynomial always has at least one coefficient
            Err(_) => vec![0.0],
        };
        Self { weights }
    }

    /// Weight at any signed lag.
    pub fn weight(&self, lag: isize) -> f64 {
        self.weights
            .get(lag.unsigned_abs())
            .copied()
            .unwrap_or(0.0)
    }

    /// Weights of the non-negative lags.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Largest lag with a non-zero weight.
    pub fn degree(&self) -> usize {
        self.weights.len() - 1
    }

    /// Every weight multiplied by `c`.
    pub fn scale(&self, c: f64) -> Self {
        Self {
            weights: self.weights.iter().map(|w| w * c).collect(),
        }
    }

    /// Coefficients `wq, ..., w1, w0, w1, ..., wq` as a polynomial of degree `2q`.
    ///
    /// This is `z^q` times the filter read as a Laurent polynomial; both
    /// share their roots off zero, unit roots included.
    pub fn to_laurent_polynomial(&self) -> Polynomial {
        let q = self.degree();
        Polynomial::new(
            (0..=2 * q)
                .map(|i| self.weights[i.abs_diff(q)])
                .collect(),
        )
    }
}

impl FrequencyResponse for SymmetricFilter {
    /// Real response `w0 + 2 sum wk cos(k omega)`.
    fn frequency_response(&self, omega: f64) -> Complex64 {
        let re = self
            .weights
            .iter()
            .enumerate()
            .skip(1)
            .fold(self.weights[0], |acc, (k, w)| acc + 2.0 * w * (k as f64 * omega).cos());
        Complex64::new(re, 0.0)
    }
}
