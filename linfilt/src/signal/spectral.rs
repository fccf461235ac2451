//! Frequency response of symmetric filters as a polynomial in `cos(omega)`.

use linfilt_core::Result;
use num_complex::Complex64;

use crate::kernel::ExecInvariantViolation;
use crate::linalg::PolynomialRoots;
use crate::polynomial::Polynomial;
use crate::signal::filter::{BackFilter, SymmetricFilter};

/// Chebyshev polynomials `T0 ..= Tn`.
fn chebyshev(n: usize) -> Vec<Polynomial> {
    let mut t = vec![Polynomial::one()];
    if n == 0 {
        return t;
    }
    t.push(Polynomial::monomial(1, 1.0));
    let two_x = Polynomial::monomial(1, 2.0);
    for k in 2..=n {
        let next = two_x.times(&t[k - 1]).minus(&t[k - 2]);
        t.push(next);
    }
    t
}

/// Frequency response `S(omega) = w0 + 2 sum wk cos(k omega)` of a symmetric
/// filter, held as the polynomial `P` with `P(cos omega) = S(omega)`.
///
/// Since `cos(k omega) = Tk(cos omega)`, `P = w0 + 2 sum wk Tk`.
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricFrequencyResponse {
    p: Polynomial,
}

impl SymmetricFrequencyResponse {
    /// Response of `sf`.
    pub fn new(sf: &SymmetricFilter) -> Self {
        let t = chebyshev(sf.degree());
        let mut p = Polynomial::constant(sf.weight(0));
        for (k, tk) in t.iter().enumerate().skip(1) {
            p = p.plus(&tk.scale(2.0 * sf.weight(k as isize)));
        }
        Self { p }
    }

    /// Response of `f(B) f(F)`, i.e. the squared gain of `f`.
    pub fn from_filter(f: &BackFilter) -> Self {
        Self::new(&SymmetricFilter::from_filter(f))
    }

    /// Response given directly by its polynomial in `cos(omega)`.
    pub fn from_polynomial(p: Polynomial) -> Self {
        Self { p }
    }

    /// The polynomial `P` in `x = cos(omega)`.
    pub fn polynomial(&self) -> &Polynomial {
        &self.p
    }

    /// Degree of `P`, equal to the degree of the filter.
    pub fn degree(&self) -> usize {
        self.p.degree()
    }

    /// `S(omega)`.
    pub fn evaluate(&self, omega: f64) -> f64 {
        self.p.evaluate(omega.cos())
    }

    /// Mean of `S` over one period.
    ///
    /// Closed form `sum pj E[cos^j]` with `E[cos^j] = C(j, j/2) / 2^j` for even
    /// `j` and 0 for odd `j`; for a response built from weights this is `w0`.
    pub fn integral(&self) -> f64 {
        // central binomial coefficients are kept integral, so the moments are
        // exact dyadic fractions for moderate degrees
        let mut binom = 1.0;
        let mut sum = 0.0;
        for (j, pj) in self.p.coefficients().iter().enumerate().step_by(2) {
            sum += pj * (binom / f64::powi(2.0, j as i32));
            let k = (j / 2) as f64;
            binom = binom * ((j + 1) * (j + 2)) as f64 / ((k + 1.0) * (k + 1.0));
        }
        sum
    }

    /// Roots of `P`, `None` for a constant response.
    ///
    /// # Errors
    /// Propagates the solver's failure.
    pub fn roots<S>(&self, solver: &S) -> core::result::Result<Option<Vec<Complex64>>, ExecInvariantViolation>
    where
        S: PolynomialRoots + ?Sized,
    {
        if self.degree() == 0 {
            return Ok(None);
        }
        self.p.roots(solver).map(Some)
    }

    /// Quotient `self / other`, dropping the remainder.
    ///
    /// # Errors
    /// [`linfilt_core::Error::InvalidArg`] when `other` is identically zero.
    pub fn divide(&self, other: &SymmetricFrequencyResponse) -> Result<SymmetricFrequencyResponse> {
        let (q, _) = self.p.div_rem(&other.p)?;
        Ok(Self { p: q })
    }

    /// Symmetric filter with this response.
    ///
    /// # Errors
    /// [`linfilt_core::Error::InvalidArg`] when `P` has non-finite coefficients.
    pub fn to_symmetric_filter(&self) -> Result<SymmetricFilter> {
        let n = self.degree();
        let t = chebyshev(n);
        let mut rest = self.p.clone();
        let mut weights = vec![0.0; n + 1];
        for k in (1..=n).rev() {
            // leading coefficient of Tk is 2^(k-1)
            let a = rest.get(k) / f64::powi(2.0, k as i32 - 1);
            rest = rest.minus(&t[k].scale(a));
            weights[k] = a / 2.0;
        }
        weights[0] = rest.get(0);
        SymmetricFilter::new(weights)
    }
}

impl From<&SymmetricFilter> for SymmetricFrequencyResponse {
    fn from(sf: &SymmetricFilter) -> Self {
        Self::new(sf)
    }
}
