use core::fmt;
use core::marker::PhantomData;

use num_complex::Complex64;

use crate::polynomial::Polynomial;
use crate::signal::traits::FrequencyResponse;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Causal {}
    impl Sealed for super::Anticausal {}
}

/// Side of the lag axis a one-sided filter lives on.
pub trait Sidedness: sealed::Sealed + Copy + Default + fmt::Debug + PartialEq + Eq {
    /// The opposite side.
    type Mirror: Sidedness<Mirror = Self>;

    /// Sign of the exponent in `e^{sign i k omega}` for the coefficient of index `k`.
    const SIGN: f64;

    /// Lag of the coefficient of index `k`.
    fn lag(k: usize) -> isize;

    /// Coefficient index of `lag`, `None` on the other side.
    fn index(lag: isize) -> Option<usize>;
}

/// Lags `0, 1, 2, ...`: the filter is a polynomial in the backshift operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Causal;

/// Lags `0, -1, -2, ...`: the filter is a polynomial in the forward operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anticausal;

impl Sidedness for Causal {
    type Mirror = Anticausal;
    const SIGN: f64 = -1.0;

    fn lag(k: usize) -> isize {
        k as isize
    }

    fn index(lag: isize) -> Option<usize> {
        usize::try_from(lag).ok()
    }
}

impl Sidedness for Anticausal {
    type Mirror = Causal;
    const SIGN: f64 = 1.0;

    fn lag(k: usize) -> isize {
        -(k as isize)
    }

    fn index(lag: isize) -> Option<usize> {
        usize::try_from(-lag).ok()
    }
}

/// `e^{sign i omega}`, the point on the unit circle a one-sided filter is evaluated at.
pub(crate) fn unit_point<S: Sidedness>(omega: f64) -> Complex64 {
    Complex64::from_polar(1.0, S::SIGN * omega)
}

/// Finite one-sided filter: a polynomial whose `k`-th coefficient is the
/// weight at lag `S::lag(k)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FiniteFilter<S> {
    poly: Polynomial,
    side: PhantomData<S>,
}

/// Finite causal filter, `w0 + w1 B + ... + wq B^q`.
pub type BackFilter = FiniteFilter<Causal>;
/// Finite anticausal filter, `w0 + w1 F + ... + wq F^q`.
pub type ForeFilter = FiniteFilter<Anticausal>;

impl<S: Sidedness> FiniteFilter<S> {
    /// Wrap a polynomial.
    pub fn new(poly: Polynomial) -> Self {
        Self {
            poly,
            side: PhantomData,
        }
    }

    /// Identity filter.
    pub fn one() -> Self {
        Self::new(Polynomial::one())
    }

    /// Filter with the given weights, lag 0 first.
    pub fn from_coefficients(weights: &[f64]) -> Self {
        Self::new(Polynomial::from_slice(weights))
    }

    /// Underlying polynomial.
    pub fn polynomial(&self) -> &Polynomial {
        &self.poly
    }

    /// Weights, lag 0 first.
    pub fn weights(&self) -> &[f64] {
        self.poly.coefficients()
    }

    /// Weight at `lag`, zero outside the support.
    pub fn weight(&self, lag: isize) -> f64 {
        S::index(lag).map_or(0.0, |k| self.poly.get(k))
    }

    /// Number of non-zero lags besides 0.
    pub fn degree(&self) -> usize {
        self.poly.degree()
    }

    /// Smallest lag of the support.
    pub fn lower_bound(&self) -> isize {
        S::lag(0).min(S::lag(self.degree()))
    }

    /// Largest lag of the support.
    pub fn upper_bound(&self) -> isize {
        S::lag(0).max(S::lag(self.degree()))
    }

    /// Same coefficients read on the opposite side of lag 0.
    pub fn mirror(&self) -> FiniteFilter<S::Mirror> {
        FiniteFilter::new(self.poly.clone())
    }

    /// Composition of two filters on the same side.
    pub fn times(&self, other: &Self) -> Self {
        Self::new(self.poly.times(&other.poly))
    }

    /// Filter scaled to a unit weight at lag 0.
    pub fn normalized(&self) -> Self {
        Self::new(self.poly.normalized())
    }

    /// Sum of squared weights.
    pub fn sum_of_squares(&self) -> f64 {
        self.weights().iter().map(|w| w * w).sum()
    }
}

impl<S: Sidedness> FrequencyResponse for FiniteFilter<S> {
    fn frequency_response(&self, omega: f64) -> Complex64 {
        self.poly.evaluate_complex(unit_point::<S>(omega))
    }
}

impl<S: Sidedness> Default for FiniteFilter<S> {
    fn default() -> Self {
        Self::one()
    }
}

impl<S: Sidedness> From<Polynomial> for FiniteFilter<S> {
    fn from(poly: Polynomial) -> Self {
        Self::new(poly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn causal_weights_sit_on_positive_lags() {
        let f = BackFilter::from_coefficients(&[1.0, -0.5, 0.25]);
        assert_eq!(f.weight(0), 1.0);
        assert_eq!(f.weight(1), -0.5);
        assert_eq!(f.weight(2), 0.25);
        assert_eq!(f.weight(-1), 0.0);
        assert_eq!(f.weight(3), 0.0);
        assert_eq!((f.lower_bound(), f.upper_bound()), (0, 2));
    }

    #[test]
    fn mirror_reads_weights_at_negative_lags() {
        let f = BackFilter::from_coefficients(&[1.0, -0.5, 0.25]);
        let m: ForeFilter = f.mirror();
        assert_eq!(m.weights(), f.weights());
        assert_eq!(m.weight(-2), 0.25);
        assert_eq!(m.weight(2), 0.0);
        assert_eq!((m.lower_bound(), m.upper_bound()), (-2, 0));
        assert_eq!(m.mirror(), f);
    }

    #[test]
    fn frequency_responses_are_conjugate() {
        let f = BackFilter::from_coefficients(&[1.0, 0.5]);
        let w = 0.7;
        let h = f.frequency_response(w);
        let g = f.mirror().frequency_response(w);
        assert_abs_diff_eq!(h.re, 1.0 + 0.5 * w.cos(), epsilon = 1e-15);
        assert_abs_diff_eq!(h.im, -0.5 * w.sin(), epsilon = 1e-15);
        assert_abs_diff_eq!(g.im, -h.im, epsilon = 1e-15);
        // |f|^2 is the symmetric response w0 + 2 w1 cos
        assert_abs_diff_eq!((h * g).re, 1.25 + w.cos(), epsilon = 1e-14);
    }

    #[test]
    fn frequency_response_into_checks_lengths() {
        let f = BackFilter::from_coefficients(&[1.0, -1.0]);
        let mut out = vec![Complex64::new(0.0, 0.0); 2];
        f.frequency_response_into(&[0.0, core::f64::consts::PI], &mut out)
            .unwrap();
        assert_abs_diff_eq!(out[0].norm(), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(out[1].re, 2.0, epsilon = 1e-15);
        let mut short = vec![Complex64::new(0.0, 0.0); 1];
        assert!(f.frequency_response_into(&[0.0, 1.0], &mut short).is_err());
    }

    #[test]
    fn times_and_normalized() {
        let a = BackFilter::from_coefficients(&[2.0, 1.0]);
        let b = BackFilter::from_coefficients(&[1.0, -1.0]);
        assert_eq!(a.times(&b).weights(), &[2.0, -1.0, -1.0]);
        assert_eq!(a.normalized().weights(), &[1.0, 0.5]);
        assert_eq!(a.sum_of_squares(), 5.0);
    }
}
