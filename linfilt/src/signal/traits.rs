//! Trait interfaces for filter capabilities.

use num_complex::Complex64;

use crate::kernel::{ExecInvariantViolation, Read1D, Write1D};
use crate::signal::filter::{DecomposeError, Factorization, SymmetricFilter};

/// Frequency-response capability of a linear filter.
pub trait FrequencyResponse {
    /// Response at angular frequency `omega` (radians per sample).
    fn frequency_response(&self, omega: f64) -> Complex64;

    /// Evaluate the response on a frequency grid into a caller-provided buffer.
    fn frequency_response_into<I, O>(&self, omegas: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<f64> + ?Sized,
        O: Write1D<Complex64> + ?Sized,
    {
        let omegas = omegas.read_slice().map_err(ExecInvariantViolation::from)?;
        let out = out.write_slice_mut().map_err(ExecInvariantViolation::from)?;
        if out.len() != omegas.len() {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: omegas.len(),
                got: out.len(),
            });
        }
        for (dst, &w) in out.iter_mut().zip(omegas) {
            *dst = self.frequency_response(w);
        }
        Ok(())
    }
}

/// Spectral factorization of a symmetric filter.
pub trait SymmetricFilterDecompose {
    /// Factor `sf` as `factor * bf(B) * bf(F)` with `bf` causal and minimum phase.
    fn decompose(&self, sf: &SymmetricFilter) -> Result<Factorization, DecomposeError>;
}
