use core::marker::PhantomData;

use num_complex::Complex64;

use super::linear::{unit_point, Anticausal, Causal, FiniteFilter, Sidedness};
use crate::kernel::{ExecInvariantViolation, Write1D};
use crate::linalg::PolynomialRoots;
use crate::polynomial::{Polynomial, RationalFunction, Simplifier};
use crate::signal::traits::FrequencyResponse;

/// One-sided filter given by a rational function of the lag operator.
///
/// The weight at lag `S::lag(k)` is the `k`-th power-series coefficient of
/// the rational function. The support is semi-infinite unless the
/// denominator is constant.
#[derive(Debug, Clone, PartialEq)]
pub struct RationalFilter<S> {
    rf: RationalFunction,
    side: PhantomData<S>,
}

/// Causal rational filter, `N(B) / D(B)`.
pub type RationalBackFilter = RationalFilter<Causal>;
/// Anticausal rational filter, `N(F) / D(F)`.
pub type RationalForeFilter = RationalFilter<Anticausal>;

impl<S: Sidedness> RationalFilter<S> {
    /// Wrap a rational function.
    pub fn new(rf: RationalFunction) -> Self {
        Self {
            rf,
            side: PhantomData,
        }
    }

    /// `num / den`.
    ///
    /// # Errors
    /// [`linfilt_core::Error::InvalidArg`] when the lag-0 weight of `den` is zero.
    pub fn from_filters(num: &FiniteFilter<S>, den: &FiniteFilter<S>) -> linfilt_core::Result<Self> {
        RationalFunction::new(num.polynomial().clone(), den.polynomial().clone()).map(Self::new)
    }

    /// Identity filter.
    pub fn one() -> Self {
        Self::new(RationalFunction::one())
    }

    /// Underlying rational function.
    pub fn rational_function(&self) -> &RationalFunction {
        &self.rf
    }

    /// Numerator as a finite filter.
    pub fn numerator(&self) -> FiniteFilter<S> {
        FiniteFilter::new(self.rf.numerator().clone())
    }

    /// Denominator as a finite filter, with unit lag-0 weight.
    pub fn denominator(&self) -> FiniteFilter<S> {
        FiniteFilter::new(self.rf.denominator().clone())
    }

    /// `true` when the support is finite.
    pub fn is_finite(&self) -> bool {
        self.rf.is_finite()
    }

    /// Weight at `lag`, zero on the other side of lag 0.
    pub fn weight(&self, lag: isize) -> f64 {
        S::index(lag).map_or(0.0, |k| self.rf.get(k))
    }

    /// First `n` weights, lag 0 first.
    pub fn weights(&self, n: usize) -> Vec<f64> {
        self.rf.coefficients(n)
    }

    /// Fill `out` with the first `out.len()` weights.
    pub fn weights_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<f64> + ?Sized,
    {
        let out = out.write_slice_mut().map_err(ExecInvariantViolation::from)?;
        let w = self.rf.coefficients(out.len());
        out.copy_from_slice(&w);
        Ok(())
    }

    /// Cache the first `n` weights.
    pub fn prepare(&mut self, n: usize) {
        self.rf.prepare(n);
    }

    /// The part of the filter beyond its first `n` weights, moved to lag 0.
    pub fn drop(&self, n: usize) -> Self {
        Self::new(self.rf.drop(n))
    }

    /// Same rational function read on the opposite side of lag 0.
    pub fn mirror(&self) -> RationalFilter<S::Mirror> {
        RationalFilter::new(self.rf.clone())
    }

    /// Composition with the default [`Simplifier`].
    pub fn times(&self, other: &Self) -> Self {
        Self::new(self.rf.times(&other.rf))
    }

    /// Composition; shared poles and zeros are cancelled by `simplifier`.
    pub fn times_with<R: PolynomialRoots>(&self, other: &Self, simplifier: &Simplifier<R>) -> Self {
        Self::new(self.rf.times_with(&other.rf, simplifier))
    }

    /// Smallest lag of the support, `None` when unbounded.
    pub fn lower_bound(&self) -> Option<isize> {
        match self.far_lag() {
            Some(far) => Some(far.min(0)),
            None => (S::lag(1) > 0).then_some(0),
        }
    }

    /// Largest lag of the support, `None` when unbounded.
    pub fn upper_bound(&self) -> Option<isize> {
        match self.far_lag() {
            Some(far) => Some(far.max(0)),
            None => (S::lag(1) < 0).then_some(0),
        }
    }

    /// `true` when [`RationalFilter::lower_bound`] is finite.
    pub fn has_lower_bound(&self) -> bool {
        self.lower_bound().is_some()
    }

    /// `true` when [`RationalFilter::upper_bound`] is finite.
    pub fn has_upper_bound(&self) -> bool {
        self.upper_bound().is_some()
    }

    fn far_lag(&self) -> Option<isize> {
        self.is_finite()
            .then(|| S::lag(self.rf.numerator().degree()))
    }
}

impl<S: Sidedness> FrequencyResponse for RationalFilter<S> {
    fn frequency_response(&self, omega: f64) -> Complex64 {
        self.rf.evaluate_complex(unit_point::<S>(omega))
    }
}

impl<S: Sidedness> Default for RationalFilter<S> {
    fn default() -> Self {
        Self::one()
    }
}

impl<S: Sidedness> From<FiniteFilter<S>> for RationalFilter<S> {
    fn from(f: FiniteFilter<S>) -> Self {
        Self::new(RationalFunction::from_polynomial(f.polynomial().clone()))
    }
}

impl<S: Sidedness> From<Polynomial> for RationalFilter<S> {
    fn from(p: Polynomial) -> Self {
        Self::new(RationalFunction::from_polynomial(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::filter::BackFilter;
    use approx::assert_abs_diff_eq;

    fn ar1(phi: f64) -> RationalBackFilter {
        RationalBackFilter::from_filters(
            &BackFilter::one(),
            &BackFilter::from_coefficients(&[1.0, -phi]),
        )
        .unwrap()
    }

    #[test]
    fn bounds_follow_sidedness() {
        let f = ar1(0.5);
        assert_eq!(f.lower_bound(), Some(0));
        assert_eq!(f.upper_bound(), None);
        assert!(f.has_lower_bound() && !f.has_upper_bound());

        let m = f.mirror();
        assert_eq!(m.lower_bound(), None);
        assert_eq!(m.upper_bound(), Some(0));

        let fin = RationalBackFilter::from(BackFilter::from_coefficients(&[1.0, 0.2, 0.1]));
        assert_eq!((fin.lower_bound(), fin.upper_bound()), (Some(0), Some(2)));
        let fin = fin.mirror();
        assert_eq!((fin.lower_bound(), fin.upper_bound()), (Some(-2), Some(0)));
    }

    #[test]
    fn weights_are_the_power_series() {
        let f = ar1(0.5);
        assert_eq!(f.weight(-1), 0.0);
        assert_abs_diff_eq!(f.weight(3), 0.125, epsilon = 1e-15);
        assert_abs_diff_eq!(f.mirror().weight(-3), 0.125, epsilon = 1e-15);
        let mut out = [0.0; 4];
        f.weights_into(&mut out).unwrap();
        assert_eq!(out.to_vec(), f.weights(4));
    }

    #[test]
    fn prepare_and_drop() {
        let mut f = ar1(0.8);
        f.prepare(16);
        assert_eq!(f.rational_function().prepared(), 16);
        let tail = f.drop(2);
        // 0.8^2 / (1 - 0.8 B)
        for k in 0..6 {
            assert_abs_diff_eq!(tail.weight(k), 0.8f64.powi(k as i32 + 2), epsilon = 1e-14);
        }
    }

    #[test]
    fn frequency_response_matches_geometric_sum() {
        let f = ar1(0.5);
        let w = 1.1;
        let h = f.frequency_response(w);
        let expected = Complex64::new(1.0, 0.0) / (Complex64::new(1.0, 0.0) - unit_point::<Causal>(w) * 0.5);
        assert_abs_diff_eq!(h.re, expected.re, epsilon = 1e-15);
        assert_abs_diff_eq!(h.im, expected.im, epsilon = 1e-15);
    }

    #[test]
    fn numerator_and_denominator_round_trip() {
        let num = BackFilter::from_coefficients(&[1.0, 0.4]);
        let den = BackFilter::from_coefficients(&[2.0, -1.0]);
        let f = RationalBackFilter::from_filters(&num, &den).unwrap();
        assert_eq!(f.denominator().weights(), &[1.0, -0.5]);
        assert_eq!(f.numerator().weights(), &[0.5, 0.2]);
        assert!(RationalBackFilter::from_filters(&num, &BackFilter::from_coefficients(&[0.0, 1.0])).is_err());
    }
}
