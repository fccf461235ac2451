use num_complex::Complex64;
use tracing::trace;

use super::Polynomial;
use crate::kernel::{check_tolerance, ConfigError, KernelLifecycle};
use crate::linalg::{CompanionRootSolver, PolynomialRoots};

/// Constructor config for [`Simplifier`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimplifierConfig {
    /// Squared distance under which two roots are considered equal.
    pub tolerance: f64,
}

impl Default for SimplifierConfig {
    fn default() -> Self {
        Self { tolerance: 1e-6 }
    }
}

/// Outcome of a successful [`Simplifier::simplify`].
#[derive(Debug, Clone, PartialEq)]
pub struct Simplified {
    /// Left polynomial with the common factor removed.
    pub left: Polynomial,
    /// Right polynomial with the common factor removed.
    pub right: Polynomial,
    /// Monic common factor.
    pub common: Polynomial,
}

/// Cancels the common factor of two polynomials.
///
/// The roots of both polynomials are paired greedily (nearest first) within
/// the configured squared-distance tolerance. The monic polynomial built from
/// the paired roots is then divided out of both operands, which keeps the
/// original scaling of each side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simplifier<S = CompanionRootSolver> {
    tolerance: f64,
    solver: S,
}

impl Default for Simplifier {
    fn default() -> Self {
        Self {
            tolerance: SimplifierConfig::default().tolerance,
            solver: CompanionRootSolver::default(),
        }
    }
}

impl KernelLifecycle for Simplifier {
    type Config = SimplifierConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        check_tolerance("tolerance", config.tolerance)?;
        Ok(Self {
            tolerance: config.tolerance,
            solver: CompanionRootSolver::default(),
        })
    }
}

impl<S> Simplifier<S>
where
    S: PolynomialRoots,
{
    /// Replace the root solver.
    pub fn with_solver<T: PolynomialRoots>(self, solver: T) -> Simplifier<T> {
        Simplifier {
            tolerance: self.tolerance,
            solver,
        }
    }

    /// Squared-distance tolerance used to pair roots.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Remove the common factor of `left` and `right`.
    ///
    /// Returns `None` when either side is constant, when the roots cannot be
    /// computed, or when no root is shared.
    pub fn simplify(&self, left: &Polynomial, right: &Polynomial) -> Option<Simplified> {
        if left.degree() == 0 || right.degree() == 0 {
            return None;
        }
        let lroots = left.roots(&self.solver).ok()?;
        let rroots = right.roots(&self.solver).ok()?;

        let mut used = vec![false; rroots.len()];
        let mut common: Vec<Complex64> = Vec::new();
        for a in &lroots {
            let best = rroots
                .iter()
                .enumerate()
                .filter(|(j, _)| !used[*j])
                .map(|(j, b)| (j, (a - b).norm_sqr()))
                .filter(|(_, d)| *d < self.tolerance)
                .min_by(|x, y| x.1.total_cmp(&y.1));
            if let Some((j, _)) = best {
                used[j] = true;
                common.push((a + rroots[j]) * 0.5);
            }
        }
        if common.is_empty() {
            return None;
        }

        let common = Polynomial::from_complex_roots(&common);
        let (l, _) = left.div_rem(&common).ok()?;
        let (r, _) = right.div_rem(&common).ok()?;
        trace!(degree = common.degree(), "cancelled common factor");
        Some(Simplified {
            left: l,
            right: r,
            common,
        })
    }
}
