use num_complex::Complex64;
use tracing::{debug, trace};

use super::{BackFilter, ForeFilter, SymmetricFilter};
use crate::kernel::{check_tolerance, ConfigError, ExecInvariantViolation, KernelLifecycle};
use crate::linalg::{CompanionRootSolver, PolynomialRoots};
use crate::polynomial::{Polynomial, UnitRootsConfig, UnitRootsSolver};
use crate::signal::spectral::SymmetricFrequencyResponse;
use crate::signal::traits::SymmetricFilterDecompose;

/// Constructor config for [`SymmetricDecomposer`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecomposerConfig {
    /// Largest cyclotomic order tried when stripping unit roots.
    pub period: usize,
    /// Squared distance under which two complex roots are conjugate partners.
    pub precision: f64,
    /// Distance under which two real roots are paired as a split double root.
    pub real_root_tolerance: f64,
    /// `|x^2 - 1|` below this is treated as exactly zero.
    pub zero_tolerance: f64,
    /// Relative remainder under which a cyclotomic factor is taken to divide the filter.
    pub unit_root_tolerance: f64,
}

impl Default for DecomposerConfig {
    fn default() -> Self {
        Self {
            period: 12,
            precision: 1e-4,
            real_root_tolerance: 1e-1,
            zero_tolerance: 1e-9,
            unit_root_tolerance: 1e-9,
        }
    }
}

impl DecomposerConfig {
    /// Set [`DecomposerConfig::period`].
    pub fn with_period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Set [`DecomposerConfig::precision`].
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    /// Set [`DecomposerConfig::real_root_tolerance`].
    pub fn with_real_root_tolerance(mut self, tolerance: f64) -> Self {
        self.real_root_tolerance = tolerance;
        self
    }

    /// Set [`DecomposerConfig::zero_tolerance`].
    pub fn with_zero_tolerance(mut self, tolerance: f64) -> Self {
        self.zero_tolerance = tolerance;
        self
    }

    /// Set [`DecomposerConfig::unit_root_tolerance`].
    pub fn with_unit_root_tolerance(mut self, tolerance: f64) -> Self {
        self.unit_root_tolerance = tolerance;
        self
    }
}

/// Reasons a symmetric filter could not be factorized.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecomposeError {
    /// The lag-0 weight is not positive.
    #[error("lag-0 weight must be positive, got {weight}")]
    NonPositiveVariance {
        /// Offending weight.
        weight: f64,
    },
    /// The frequency response integrates to a non-positive value.
    #[error("frequency response integral must be positive, got {integral}")]
    NonPositiveIntegral {
        /// Offending integral.
        integral: f64,
    },
    /// A real root inside `(-1, 1)` has no real partner within tolerance.
    #[error("real root {root} at index {index} has no partner")]
    UnpairedRealRoot {
        /// Position in the root list.
        index: usize,
        /// The root.
        root: f64,
    },
    /// A complex root has no conjugate within tolerance.
    #[error("complex root {re}{im:+}i at index {index} has no conjugate partner")]
    UnpairedComplexRoot {
        /// Position in the root list.
        index: usize,
        /// Real part.
        re: f64,
        /// Imaginary part.
        im: f64,
    },
    /// Some roots were left unpaired.
    #[error("only {used} of {total} roots were paired")]
    UnusedRoots {
        /// Paired roots.
        used: usize,
        /// All roots.
        total: usize,
    },
    /// The root solver failed.
    #[error("root solver failed: {0}")]
    RootSolver(#[from] ExecInvariantViolation),
    /// Polynomial algebra failed.
    #[error("polynomial algebra failed: {0}")]
    Algebra(#[from] linfilt_core::Error),
}

/// Outcome of a successful decomposition: `sf = factor * bf(B) * bf(F)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Factorization {
    bf: BackFilter,
    factor: f64,
}

impl Factorization {
    /// Causal factor, with unit lag-0 weight and roots on or outside the unit circle.
    pub fn bfilter(&self) -> &BackFilter {
        &self.bf
    }

    /// Anticausal factor, the mirror of [`Factorization::bfilter`].
    pub fn ffilter(&self) -> ForeFilter {
        self.bf.mirror()
    }

    /// Variance scale.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Causal factor and variance scale.
    pub fn into_parts(self) -> (BackFilter, f64) {
        (self.bf, self.factor)
    }
}

/// Spectral factorization of symmetric filters.
///
/// A symmetric filter `S` with non-negative frequency response is written
/// `S = v * f(B) f(F)` where `f` is causal, normalized to `f(0) = 1`, and has
/// every root on or outside the unit circle. Unit roots are split off first
/// by cyclotomic trial division; the remaining response, a polynomial in
/// `cos(omega)`, is factored root by root.
///
/// The decomposer holds configuration only and can be shared across threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetricDecomposer<S = CompanionRootSolver> {
    config: DecomposerConfig,
    unit_roots: UnitRootsSolver,
    solver: S,
}

impl Default for SymmetricDecomposer {
    fn default() -> Self {
        Self {
            config: DecomposerConfig::default(),
            unit_roots: UnitRootsSolver::default(),
            solver: CompanionRootSolver::default(),
        }
    }
}

impl KernelLifecycle for SymmetricDecomposer {
    type Config = DecomposerConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        check_tolerance("precision", config.precision)?;
        check_tolerance("real_root_tolerance", config.real_root_tolerance)?;
        check_tolerance("zero_tolerance", config.zero_tolerance)?;
        let unit_roots = UnitRootsSolver::try_new(UnitRootsConfig {
            period: config.period,
            tolerance: config.unit_root_tolerance,
        })?;
        Ok(Self {
            config,
            unit_roots,
            solver: CompanionRootSolver::default(),
        })
    }
}

impl<S: PolynomialRoots> SymmetricDecomposer<S> {
    /// Replace the root solver.
    pub fn with_solver<T: PolynomialRoots>(self, solver: T) -> SymmetricDecomposer<T> {
        SymmetricDecomposer {
            config: self.config,
            unit_roots: self.unit_roots,
            solver,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &DecomposerConfig {
        &self.config
    }

    /// Squared-distance threshold of complex root pairing.
    pub fn precision(&self) -> f64 {
        self.config.precision
    }

    /// Seasonal period bounding the unit roots looked for.
    pub fn period(&self) -> usize {
        self.config.period
    }

    /// Factor `sf` as `factor * bf(B) * bf(F)`.
    ///
    /// # Errors
    /// A [`DecomposeError`] naming the first condition that prevented the
    /// factorization. Nothing is returned on failure.
    #[tracing::instrument(level = "debug", skip_all, fields(degree = sf.degree()))]
    pub fn decompose(&self, sf: &SymmetricFilter) -> Result<Factorization, DecomposeError> {
        let w0 = sf.weight(0);
        if w0 <= 0.0 {
            debug!(weight = w0, "non-positive lag-0 weight");
            return Err(DecomposeError::NonPositiveVariance { weight: w0 });
        }
        let response = SymmetricFrequencyResponse::new(sf);
        let var = response.integral();
        if var <= 0.0 {
            debug!(integral = var, "non-positive frequency response integral");
            return Err(DecomposeError::NonPositiveIntegral { integral: var });
        }

        let (ur, residual) = self.split_unit_roots(sf, &response)?;

        let mut roots = residual.roots(&self.solver)?.unwrap_or_default();
        reflect_roots(&mut roots, &self.config)?;
        let stationary = BackFilter::new(Polynomial::from_complex_roots(&roots).normalized());

        let bf = ur.times(&stationary);
        let factor = var / bf.sum_of_squares();
        debug!(bf_degree = bf.degree(), factor, "factorized");
        Ok(Factorization { bf, factor })
    }

    /// Causal unit-root factor of `sf` and the response left once it is removed.
    fn split_unit_roots(
        &self,
        sf: &SymmetricFilter,
        response: &SymmetricFrequencyResponse,
    ) -> Result<(BackFilter, SymmetricFrequencyResponse), DecomposeError> {
        let Some(found) = self.unit_roots.factorize(&sf.to_laurent_polynomial()) else {
            return Ok((BackFilter::one(), response.clone()));
        };
        let Some(half) = found.unit_roots.sqrt() else {
            debug!("unit roots with odd multiplicity are left to root pairing");
            return Ok((BackFilter::one(), response.clone()));
        };
        let ur = BackFilter::new(half.to_polynomial());
        let residual = response.divide(&SymmetricFrequencyResponse::from_filter(&ur))?;
        Ok((ur, residual))
    }
}

impl<S: PolynomialRoots> SymmetricFilterDecompose for SymmetricDecomposer<S> {
    fn decompose(&self, sf: &SymmetricFilter) -> Result<Factorization, DecomposeError> {
        SymmetricDecomposer::decompose(self, sf)
    }
}

/// Map the roots `x` of a response polynomial in `cos(omega)` to the roots
/// `z` of the causal factor, `z + 1/z = 2x`, choosing `|z| >= 1`.
///
/// Roots are consumed in index order. Real roots inside `(-1, 1)` come from
/// double roots split by rounding and are merged with their nearest real
/// neighbour into a conjugate pair on the unit circle. Complex roots are
/// matched with their conjugate.
pub(crate) fn reflect_roots(r: &mut [Complex64], config: &DecomposerConfig) -> Result<(), DecomposeError> {
    let n = r.len();
    let mut used = vec![false; n];
    let mut nused = 0;
    for i in 0..n {
        if used[i] {
            continue;
        }
        if r[i].im == 0.0 {
            let x = r[i].re;
            let mut ro = x * x - 1.0;
            if ro.abs() < config.zero_tolerance {
                ro = 0.0;
            }
            if ro >= 0.0 {
                r[i] = Complex64::new(x + x.signum() * ro.sqrt(), 0.0);
                used[i] = true;
                nused += 1;
                trace!(index = i, root = r[i].re, "real root reflected");
                continue;
            }

            let best = (i + 1..n)
                .filter(|&j| !used[j] && r[j].im == 0.0)
                .map(|j| (j, (r[j].re - x).abs()))
                .filter(|&(_, d)| d < config.real_root_tolerance)
                .min_by(|a, b| a.1.total_cmp(&b.1));
            let Some((j, _)) = best else {
                debug!(index = i, root = x, "real root without partner");
                return Err(DecomposeError::UnpairedRealRoot { index: i, root: x });
            };
            let rr = x * r[j].re;
            let (re, im) = if rr < 0.0 {
                (0.0, 1.0)
            } else {
                let re = x.signum() * rr.sqrt();
                let ro = rr - 1.0;
                (re, if ro < 0.0 { (-ro).sqrt() } else { 0.0 })
            };
            r[i] = Complex64::new(re, im);
            r[j] = Complex64::new(re, -im);
            used[i] = true;
            used[j] = true;
            nused += 2;
            trace!(index = i, partner = j, re, im, "real double root merged");
        } else {
            let s = (r[i] * r[i] - 1.0).sqrt();
            let c0 = r[i] + s;
            let mut c1 = r[i] - s;
            if c1.norm_sqr() < c0.norm_sqr() {
                c1 = c0;
            }
            let conj = r[i].conj();
            let Some(j) = (i + 1..n).find(|&j| !used[j] && (conj - r[j]).norm_sqr() < config.precision)
            else {
                debug!(index = i, re = r[i].re, im = r[i].im, "complex root without conjugate");
                return Err(DecomposeError::UnpairedComplexRoot {
                    index: i,
                    re: r[i].re,
                    im: r[i].im,
                });
            };
            r[i] = c1;
            r[j] = c1.conj();
            used[i] = true;
            used[j] = true;
            nused += 2;
            trace!(index = i, partner = j, re = c1.re, im = c1.im, "complex pair reflected");
        }
    }
    if nused != n {
        debug!(used = nused, total = n, "unpaired roots left");
        return Err(DecomposeError::UnusedRoots { used: nused, total: n });
    }
    Ok(())
}
