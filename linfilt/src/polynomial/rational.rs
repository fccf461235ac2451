use linfilt_core::{Error, Result};
use num_complex::Complex64;

use super::{Polynomial, Simplifier};
use crate::linalg::PolynomialRoots;

/// Ratio `N(z) / D(z)` of two polynomials, read as a power series around 0.
///
/// The denominator's constant term is normalized to 1 on construction (the
/// numerator is scaled by the same factor), so the series coefficients follow
/// the recurrence `h[k] = n[k] - sum_{j=1..} d[j] h[k-j]`.
///
/// A `RationalFunction` is a value: operations return new instances. The only
/// mutable state is the optional coefficient cache filled by
/// [`RationalFunction::prepare`].
#[derive(Debug, Clone)]
pub struct RationalFunction {
    num: Polynomial,
    den: Polynomial,
    cache: Vec<f64>,
}

impl RationalFunction {
    /// Build `num / den`, normalizing `den(0)` to 1.
    ///
    /// # Errors
    /// [`Error::InvalidArg`] when `den(0) == 0`: the ratio then has no power
    /// series expansion around 0.
    pub fn new(num: Polynomial, den: Polynomial) -> Result<Self> {
        let d0 = den.get(0);
        if d0 == 0.0 {
            return Err(Error::InvalidArg {
                arg: "denominator".into(),
                reason: "constant term must be non-zero".into(),
            });
        }
        Ok(Self::normalized(num, den, d0))
    }

    fn normalized(num: Polynomial, den: Polynomial, d0: f64) -> Self {
        let (num, den) = if d0 == 1.0 {
            (num, den)
        } else {
            (num.divide(d0), den.divide(d0))
        };
        Self {
            num,
            den,
            cache: Vec::new(),
        }
    }

    /// Polynomial `p` as a rational function with denominator 1.
    pub fn from_polynomial(p: Polynomial) -> Self {
        Self {
            num: p,
            den: Polynomial::one(),
            cache: Vec::new(),
        }
    }

    /// The constant function 1.
    pub fn one() -> Self {
        Self::from_polynomial(Polynomial::one())
    }

    /// Numerator polynomial.
    pub fn numerator(&self) -> &Polynomial {
        &self.num
    }

    /// Denominator polynomial, with constant term 1.
    pub fn denominator(&self) -> &Polynomial {
        &self.den
    }

    /// `true` when the denominator is constant, i.e. the expansion is finite.
    pub fn is_finite(&self) -> bool {
        self.den.degree() == 0
    }

    /// First `n` power-series coefficients.
    pub fn coefficients(&self, n: usize) -> Vec<f64> {
        if n <= self.cache.len() {
            return self.cache[..n].to_vec();
        }
        let d = self.den.coefficients();
        let d0 = d[0];
        let mut h = Vec::with_capacity(n);
        h.extend_from_slice(&self.cache);
        for k in h.len()..n {
            let mut v = self.num.get(k);
            for j in 1..d.len().min(k + 1) {
                v -= d[j] * h[k - j];
            }
            h.push(v / d0);
        }
        h
    }

    /// Power-series coefficient of `z^pos`.
    pub fn get(&self, pos: usize) -> f64 {
        match self.cache.get(pos) {
            Some(&v) => v,
            None => self.coefficients(pos + 1)[pos],
        }
    }

    /// Cache the first `n` coefficients for repeated [`RationalFunction::get`] calls.
    pub fn prepare(&mut self, n: usize) {
        if n > self.cache.len() {
            self.cache = self.coefficients(n);
        }
    }

    /// Number of cached coefficients.
    pub fn prepared(&self) -> usize {
        self.cache.len()
    }

    /// Remove the first `n` terms of the expansion.
    ///
    /// Returns `r` such that `self = h[0] + ... + h[n-1] z^(n-1) + z^n r`.
    pub fn drop(&self, n: usize) -> RationalFunction {
        if n == 0 {
            return self.clone();
        }
        let head = Polynomial::new(self.coefficients(n));
        let tail = self.num.minus(&self.den.times(&head)).shift_down(n);
        let cache = if self.cache.len() > n {
            self.cache[n..].to_vec()
        } else {
            Vec::new()
        };
        RationalFunction {
            num: tail,
            den: self.den.clone(),
            cache,
        }
    }

    /// Product of two rational functions, with the default [`Simplifier`].
    pub fn times(&self, other: &RationalFunction) -> RationalFunction {
        let simplifier: Simplifier = Simplifier::default();
        self.times_with(other, &simplifier)
    }

    /// Product of two rational functions.
    ///
    /// Each numerator is first simplified against the other operand's
    /// denominator, so shared poles and zeros cancel before the degrees grow.
    /// The result is renormalized to a denominator with constant term 1.
    pub fn times_with<S>(&self, other: &RationalFunction, simplifier: &Simplifier<S>) -> RationalFunction
    where
        S: PolynomialRoots,
    {
        let (mut ln, mut rd) = (self.num.clone(), other.den.clone());
        if let Some(s) = simplifier.simplify(&ln, &rd) {
            ln = s.left;
            rd = s.right;
        }
        let (mut rn, mut ld) = (other.num.clone(), self.den.clone());
        if let Some(s) = simplifier.simplify(&rn, &ld) {
            rn = s.left;
            ld = s.right;
        }
        let n = ln.times(&rn);
        let d = ld.times(&rd);
        let d0 = d.get(0);
        // denominators are zero-free at the origin, so are their factors
        Self::normalized(n, d, d0)
    }

    /// Evaluate `N(z) / D(z)`.
    pub fn evaluate_complex(&self, z: Complex64) -> Complex64 {
        self.num.evaluate_complex(z) / self.den.evaluate_complex(z)
    }
}

impl Default for RationalFunction {
    fn default() -> Self {
        Self::one()
    }
}

impl PartialEq for RationalFunction {
    fn eq(&self, other: &Self) -> bool {
        self.num == other.num && self.den == other.den
    }
}

impl From<Polynomial> for RationalFunction {
    fn from(p: Polynomial) -> Self {
        Self::from_polynomial(p)
    }
}
