//! Numpy-flavoured 1D array primitives.

mod convolve;
mod correlate;

pub use convolve::*;
pub use correlate::*;
