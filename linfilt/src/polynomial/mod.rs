//! Real polynomials, rational functions and unit-root factorization.

mod dense;
mod rational;
mod simplify;
mod unit_roots;

pub use dense::*;
pub use rational::*;
pub use simplify::*;
pub use unit_roots::*;
