//! One-sided, rational and symmetric linear filters, and the spectral
//! factorization of symmetric filters into causal factors.

mod decompose;
mod linear;
mod rational;
mod symmetric;

pub use decompose::*;
pub use linear::{Anticausal, BackFilter, Causal, FiniteFilter, ForeFilter, Sidedness};
pub use rational::*;
pub use symmetric::*;

/// Factor `sf` as `factor * bf(B) * bf(F)` with the default configuration.
///
/// Convenience over [`SymmetricDecomposer::default`]; see
/// [`SymmetricDecomposer::decompose`].
///
/// ```
/// use linfilt::signal::filter::{decompose, BackFilter, SymmetricFilter};
///
/// let f = BackFilter::from_coefficients(&[1.0, -0.4]);
/// let sf = SymmetricFilter::from_filter(&f).scale(2.0);
/// let fact = decompose(&sf).unwrap();
/// assert!((fact.bfilter().weight(1) + 0.4).abs() < 1e-9);
/// assert!((fact.factor() - 2.0).abs() < 1e-9);
/// ```
pub fn decompose(sf: &SymmetricFilter) -> Result<Factorization, DecomposeError> {
    let decomposer: SymmetricDecomposer = SymmetricDecomposer::default();
    decomposer.decompose(sf)
}
