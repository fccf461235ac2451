use std::collections::BTreeMap;

use tracing::debug;

use super::Polynomial;
use crate::kernel::{check_tolerance, ConfigError, KernelLifecycle};

/// The `n`-th cyclotomic polynomial `Φn`, whose roots are the primitive
/// `n`-th roots of unity.
///
/// Built from `z^n - 1 = prod_{d | n} Φd`. Coefficients are integers and are
/// rounded after each division. `cyclotomic(0)` is the constant 1.
pub fn cyclotomic(n: usize) -> Polynomial {
    if n == 0 {
        return Polynomial::one();
    }
    let mut p = Polynomial::monomial(n, 1.0).minus(&Polynomial::one());
    for d in (1..n).filter(|d| n % d == 0) {
        // Φd is monic, so the division cannot fail
        if let Ok((q, _)) = p.div_rem(&cyclotomic(d)) {
            p = q;
        }
    }
    Polynomial::new(p.coefficients().iter().map(|c| c.round()).collect())
}

/// Multiset of unit roots, stored as cyclotomic orders with multiplicities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitRoots {
    orders: BTreeMap<usize, usize>,
}

impl UnitRoots {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one copy of the roots of `Φorder`.
    pub fn add(&mut self, order: usize) {
        *self.orders.entry(order).or_insert(0) += 1;
    }

    /// Number of copies of `Φorder`.
    pub fn multiplicity(&self, order: usize) -> usize {
        self.orders.get(&order).copied().unwrap_or(0)
    }

    /// Orders present, ascending.
    pub fn orders(&self) -> impl Iterator<Item = usize> + '_ {
        self.orders.keys().copied()
    }

    /// `true` when no unit root is recorded.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Degree of [`UnitRoots::to_polynomial`].
    pub fn degree(&self) -> usize {
        self.orders
            .iter()
            .map(|(&d, &m)| cyclotomic(d).degree() * m)
            .sum()
    }

    /// Square root of the set: every multiplicity halved.
    ///
    /// `None` when some multiplicity is odd.
    pub fn sqrt(&self) -> Option<UnitRoots> {
        let mut orders = BTreeMap::new();
        for (&d, &m) in &self.orders {
            if m % 2 != 0 {
                return None;
            }
            orders.insert(d, m / 2);
        }
        Some(UnitRoots { orders })
    }

    /// `prod Φd^m`, scaled to a constant term of 1.
    ///
    /// For the divisors of 12 this is `1 - z^12`.
    pub fn to_polynomial(&self) -> Polynomial {
        let mut p = Polynomial::one();
        for (&d, &m) in &self.orders {
            let c = cyclotomic(d);
            for _ in 0..m {
                p = p.times(&c);
            }
        }
        p.normalized()
    }
}

/// Constructor config for [`UnitRootsSolver`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitRootsConfig {
    /// Largest cyclotomic order tried.
    pub period: usize,
    /// Remainder size, relative to the polynomial, accepted as an exact division.
    pub tolerance: f64,
}

impl Default for UnitRootsConfig {
    fn default() -> Self {
        Self {
            period: 12,
            tolerance: 1e-9,
        }
    }
}

/// Unit roots found by [`UnitRootsSolver::factorize`] and the cofactor left
/// once they are divided out.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitRootFactorization {
    /// Detected unit roots.
    pub unit_roots: UnitRoots,
    /// Input polynomial divided by `unit_roots`.
    pub remainder: Polynomial,
}

/// Strips unit roots from a polynomial by trial division with cyclotomic
/// polynomials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitRootsSolver {
    period: usize,
    tolerance: f64,
}

impl Default for UnitRootsSolver {
    fn default() -> Self {
        let config = UnitRootsConfig::default();
        Self {
            period: config.period,
            tolerance: config.tolerance,
        }
    }
}

impl KernelLifecycle for UnitRootsSolver {
    type Config = UnitRootsConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if config.period == 0 {
            return Err(ConfigError::InvalidArgument {
                arg: "period",
                reason: "period must be greater than zero",
            });
        }
        check_tolerance("tolerance", config.tolerance)?;
        Ok(Self {
            period: config.period,
            tolerance: config.tolerance,
        })
    }
}

impl UnitRootsSolver {
    /// Largest cyclotomic order tried.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Detect the unit roots of `p`.
    ///
    /// Orders are tried from `period` down to 1; each `Φd` is divided out as
    /// long as the remainder stays below `tolerance` relative to `p`.
    pub fn factorize(&self, p: &Polynomial) -> Option<UnitRootFactorization> {
        if p.degree() == 0 {
            return None;
        }
        let scale = p.max_abs();
        let mut unit_roots = UnitRoots::new();
        let mut cur = p.clone();
        for d in (1..=self.period).rev() {
            let c = cyclotomic(d);
            while cur.degree() >= c.degree() {
                let Ok((q, r)) = cur.div_rem(&c) else {
                    break;
                };
                if r.max_abs() > self.tolerance * scale {
                    break;
                }
                unit_roots.add(d);
                cur = q;
            }
        }
        if unit_roots.is_empty() {
            return None;
        }
        debug!(
            orders = ?unit_roots.orders().collect::<Vec<_>>(),
            degree = unit_roots.degree(),
            "unit roots detected"
        );
        Some(UnitRootFactorization {
            unit_roots,
            remainder: cur,
        })
    }
}
