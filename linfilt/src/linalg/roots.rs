use nalgebra::{DMatrix, Schur};
use num_complex::Complex64;

use super::{CompanionBuild1D, CompanionConfig, CompanionKernel};
use crate::kernel::{check_tolerance, ConfigError, ExecInvariantViolation, KernelLifecycle};
use crate::polynomial::Polynomial;

/// Polynomial root-finding capability.
///
/// Implementations return every complex root of the polynomial, repeated
/// according to multiplicity. Real roots must carry an exactly-zero imaginary
/// part; the spectral factorization tells real and complex roots apart that
/// way.
pub trait PolynomialRoots {
    /// Complex roots of `p`.
    fn roots(&self, p: &Polynomial) -> Result<Vec<Complex64>, ExecInvariantViolation>;
}

impl<R: PolynomialRoots + ?Sized> PolynomialRoots for &R {
    fn roots(&self, p: &Polynomial) -> Result<Vec<Complex64>, ExecInvariantViolation> {
        (**self).roots(p)
    }
}

/// Constructor config for [`CompanionRootSolver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootSolverConfig {
    /// Convergence threshold of the real Schur iteration.
    pub epsilon: f64,
    /// Iteration budget of the real Schur iteration.
    pub max_iterations: usize,
}

impl Default for RootSolverConfig {
    fn default() -> Self {
        Self {
            epsilon: f64::EPSILON,
            max_iterations: 10_000,
        }
    }
}

/// Root solver computing the eigenvalues of the companion matrix.
///
/// Zero roots (vanishing low-order coefficients) are split off exactly, linear
/// factors are solved in closed form, and the remaining monic polynomial goes
/// through the real Schur decomposition of its companion matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompanionRootSolver {
    epsilon: f64,
    max_iterations: usize,
}

impl Default for CompanionRootSolver {
    fn default() -> Self {
        let config = RootSolverConfig::default();
        Self {
            epsilon: config.epsilon,
            max_iterations: config.max_iterations,
        }
    }
}

impl KernelLifecycle for CompanionRootSolver {
    type Config = RootSolverConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        check_tolerance("epsilon", config.epsilon)?;
        if config.max_iterations == 0 {
            return Err(ConfigError::InvalidArgument {
                arg: "max_iterations",
                reason: "iteration budget must be greater than zero",
            });
        }
        Ok(Self {
            epsilon: config.epsilon,
            max_iterations: config.max_iterations,
        })
    }
}

impl PolynomialRoots for CompanionRootSolver {
    fn roots(&self, p: &Polynomial) -> Result<Vec<Complex64>, ExecInvariantViolation> {
        if p.is_zero() {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "the zero polynomial has no finite root set",
            });
        }
        let nzeros = p.coefficients().iter().take_while(|c| **c == 0.0).count();
        let mut roots = vec![Complex64::new(0.0, 0.0); nzeros];
        let reduced = p.shift_down(nzeros);
        match reduced.degree() {
            0 => return Ok(roots),
            1 => {
                roots.push(Complex64::new(-reduced.get(0) / reduced.get(1), 0.0));
                return Ok(roots);
            }
            _ => {}
        }

        let descending: Vec<f64> = reduced.coefficients().iter().rev().copied().collect();
        let kernel = CompanionKernel::try_new(CompanionConfig {
            expected_len: Some(descending.len()),
        })?;
        let companion: DMatrix<f64> = kernel.run(&descending)?;
        let schur = Schur::try_new(companion, self.epsilon, self.max_iterations).ok_or(
            ExecInvariantViolation::NoConvergence {
                iterations: self.max_iterations,
            },
        )?;
        roots.extend(schur.complex_eigenvalues().iter().copied());
        Ok(roots)
    }
}
