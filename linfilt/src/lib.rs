//! Rational and symmetric linear filters for time-series signal extraction.
//!
//! The centrepiece is the spectral factorization of a symmetric filter
//! ([`signal::filter::SymmetricDecomposer`]): a two-sided filter with a
//! non-negative frequency response is written as a variance times a causal,
//! minimum-phase filter times its mirror image. It is built from
//!
//! - [`polynomial`]: real polynomials, rational functions with power-series
//!   expansion and pole/zero cancellation, and cyclotomic unit roots,
//! - [`linalg`]: companion matrices and the polynomial root solver,
//! - [`signal`]: one-sided and symmetric filters and their frequency responses,
//! - [`kernel`]: constructor validation and the error types shared by kernels.
//!
//! ```
//! use linfilt::kernel::KernelLifecycle;
//! use linfilt::signal::filter::{BackFilter, DecomposerConfig, SymmetricDecomposer, SymmetricFilter};
//!
//! let f = BackFilter::from_coefficients(&[1.0, -0.5, 0.2]);
//! let sf = SymmetricFilter::from_filter(&f);
//! let decomposer: SymmetricDecomposer =
//!     SymmetricDecomposer::try_new(DecomposerConfig::default()).unwrap();
//! let fact = decomposer.decompose(&sf).unwrap();
//! for (a, b) in fact.bfilter().weights().iter().zip(f.weights()) {
//!     assert!((a - b).abs() < 1e-9);
//! }
//! ```

#![deny(missing_docs)]

pub mod kernel;
pub mod linalg;
pub mod polynomial;
pub mod signal;

pub use linfilt_core::{Error, Result};
