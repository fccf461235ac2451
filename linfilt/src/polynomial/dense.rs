use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use linfilt_core::num_rs::convolve_full;
use linfilt_core::{Error, Result};
use num_complex::Complex64;

use crate::kernel::ExecInvariantViolation;
use crate::linalg::PolynomialRoots;

/// Dense real polynomial `a0 + a1 z + ... + an z^n`.
///
/// Coefficients are stored in ascending order. Trailing zero coefficients are
/// trimmed on construction, so the leading coefficient is non-zero unless the
/// polynomial is the zero polynomial (a single `0.0` coefficient).
///
/// Polynomials are immutable values: every operation returns a new instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Build a polynomial from ascending coefficients.
    ///
    /// An empty vector yields the zero polynomial.
    pub fn new(mut coeffs: Vec<f64>) -> Self {
        while coeffs.len() > 1 && coeffs.last() == Some(&0.0) {
            coeffs.pop();
        }
        if coeffs.is_empty() {
            coeffs.push(0.0);
        }
        Self { coeffs }
    }

    /// Build a polynomial from an ascending coefficient slice.
    pub fn from_slice(coeffs: &[f64]) -> Self {
        Self::new(coeffs.to_vec())
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self { coeffs: vec![0.0] }
    }

    /// The constant polynomial `1`.
    pub fn one() -> Self {
        Self::constant(1.0)
    }

    /// The constant polynomial `c`.
    pub fn constant(c: f64) -> Self {
        Self { coeffs: vec![c] }
    }

    /// The monomial `c z^degree`.
    pub fn monomial(degree: usize, c: f64) -> Self {
        let mut coeffs = vec![0.0; degree + 1];
        coeffs[degree] = c;
        Self::new(coeffs)
    }

    /// Monic polynomial `prod (z - r_i)` built from its complex roots.
    ///
    /// The roots are expected to be closed under conjugation; the imaginary
    /// residue of the expansion is discarded.
    pub fn from_complex_roots(roots: &[Complex64]) -> Self {
        let mut c = vec![Complex64::new(1.0, 0.0)];
        for r in roots {
            let mut next = vec![Complex64::new(0.0, 0.0); c.len() + 1];
            for (k, &ck) in c.iter().enumerate() {
                next[k + 1] += ck;
                next[k] -= *r * ck;
            }
            c = next;
        }
        Self::new(c.into_iter().map(|z| z.re).collect())
    }

    /// Ascending coefficients.
    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    /// Degree of the polynomial (0 for constants, including zero).
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Coefficient of `z^i`; zero past the degree.
    pub fn get(&self, i: usize) -> f64 {
        self.coeffs.get(i).copied().unwrap_or(0.0)
    }

    /// Leading coefficient.
    pub fn leading(&self) -> f64 {
        self.coeffs[self.coeffs.len() - 1]
    }

    /// `true` for the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0] == 0.0
    }

    /// Largest absolute coefficient.
    pub fn max_abs(&self) -> f64 {
        self.coeffs.iter().fold(0.0, |m, c| m.max(c.abs()))
    }

    /// Evaluate at a real point (Horner).
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    /// Evaluate at a complex point (Horner).
    pub fn evaluate_complex(&self, z: Complex64) -> Complex64 {
        self.coeffs
            .iter()
            .rev()
            .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z + c)
    }

    /// Product of two polynomials.
    pub fn times(&self, other: &Polynomial) -> Polynomial {
        match convolve_full(&self.coeffs, &other.coeffs) {
            Ok(c) => Polynomial::new(c),
            // coefficient vectors are never empty
            Err(_) => Polynomial::zero(),
        }
    }

    /// Sum of two polynomials.
    pub fn plus(&self, other: &Polynomial) -> Polynomial {
        let n = self.coeffs.len().max(other.coeffs.len());
        Polynomial::new((0..n).map(|i| self.get(i) + other.get(i)).collect())
    }

    /// Difference of two polynomials.
    pub fn minus(&self, other: &Polynomial) -> Polynomial {
        let n = self.coeffs.len().max(other.coeffs.len());
        Polynomial::new((0..n).map(|i| self.get(i) - other.get(i)).collect())
    }

    /// Multiply every coefficient by `c`.
    pub fn scale(&self, c: f64) -> Polynomial {
        Polynomial::new(self.coeffs.iter().map(|a| a * c).collect())
    }

    /// Divide every coefficient by `d`.
    pub fn divide(&self, d: f64) -> Polynomial {
        Polynomial::new(self.coeffs.iter().map(|a| a / d).collect())
    }

    /// Rescale so that the constant term is 1.
    ///
    /// Polynomials with a zero constant term are returned unchanged.
    pub fn normalized(&self) -> Polynomial {
        let c0 = self.coeffs[0];
        if c0 == 0.0 || c0 == 1.0 {
            self.clone()
        } else {
            self.divide(c0)
        }
    }

    /// Euclidean division: `self = q * divisor + r` with `deg r < deg divisor`.
    ///
    /// # Errors
    /// [`Error::InvalidArg`] when `divisor` is the zero polynomial.
    pub fn div_rem(&self, divisor: &Polynomial) -> Result<(Polynomial, Polynomial)> {
        if divisor.is_zero() {
            return Err(Error::InvalidArg {
                arg: "divisor".into(),
                reason: "division by the zero polynomial".into(),
            });
        }
        let nd = divisor.degree();
        let n = self.degree();
        if n < nd {
            return Ok((Polynomial::zero(), self.clone()));
        }
        let lead = divisor.leading();
        let mut rem = self.coeffs.clone();
        let mut quot = vec![0.0; n - nd + 1];
        for k in (0..=(n - nd)).rev() {
            let q = rem[k + nd] / lead;
            quot[k] = q;
            for (j, d) in divisor.coeffs.iter().enumerate() {
                rem[k + j] -= q * d;
            }
            rem[k + nd] = 0.0;
        }
        rem.truncate(nd.max(1));
        Ok((Polynomial::new(quot), Polynomial::new(rem)))
    }

    /// Divide by `z^n`, dropping the `n` lowest coefficients.
    pub fn shift_down(&self, n: usize) -> Polynomial {
        if n >= self.coeffs.len() {
            Polynomial::zero()
        } else {
            Polynomial::new(self.coeffs[n..].to_vec())
        }
    }

    /// Complex roots computed by `solver`. Constant polynomials have no roots.
    ///
    /// # Errors
    /// Propagates the solver's failure.
    pub fn roots<S>(&self, solver: &S) -> core::result::Result<Vec<Complex64>, ExecInvariantViolation>
    where
        S: PolynomialRoots + ?Sized,
    {
        if self.degree() == 0 {
            return Ok(Vec::new());
        }
        solver.roots(self)
    }
}

impl Default for Polynomial {
    fn default() -> Self {
        Self::one()
    }
}

impl From<Vec<f64>> for Polynomial {
    fn from(coeffs: Vec<f64>) -> Self {
        Self::new(coeffs)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Self) -> Polynomial {
        self.times(rhs)
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Self) -> Polynomial {
        self.plus(rhs)
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: Self) -> Polynomial {
        self.minus(rhs)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.scale(-1.0)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (i, &c) in self.coeffs.iter().enumerate() {
            if c == 0.0 && !(first && i == self.degree()) {
                continue;
            }
            let mag = c.abs();
            if first {
                if c < 0.0 {
                    write!(f, "-")?;
                }
            } else {
                write!(f, " {} ", if c < 0.0 { '-' } else { '+' })?;
            }
            match i {
                0 => write!(f, "{mag}")?,
                1 if mag == 1.0 => write!(f, "z")?,
                1 => write!(f, "{mag} z")?,
                _ if mag == 1.0 => write!(f, "z^{i}")?,
                _ => write!(f, "{mag} z^{i}")?,
            }
            first = false;
        }
        Ok(())
    }
}
