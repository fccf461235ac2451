use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D};
use ::core::ops::{Div, Neg};
use nalgebra::{allocator::Allocator, *};
use num_traits::{One, Zero};

/// 1D companion-matrix construction capability.
pub trait CompanionBuild1D<T> {
    /// Output matrix type.
    type Output;

    /// Build companion matrix from polynomial coefficients.
    fn run<I>(&self, input: &I) -> Result<Self::Output, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized;
}

/// Constructor config for [`CompanionKernel`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompanionConfig {
    /// Optional expected coefficient length.
    pub expected_len: Option<usize>,
}

/// Companion-matrix kernel.
///
/// Coefficients are read highest power first, as in `scipy.linalg.companion`:
/// `[a0, a1, ..., an]` describes `a0 z^n + a1 z^(n-1) + ... + an`. The
/// eigenvalues of the resulting matrix are the roots of the polynomial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompanionKernel {
    expected_len: Option<usize>,
}

impl KernelLifecycle for CompanionKernel {
    type Config = CompanionConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if let Some(expected_len) = config.expected_len {
            if expected_len < 2 {
                return Err(ConfigError::InvalidArgument {
                    arg: "expected_len",
                    reason: "companion requires at least 2 coefficients",
                });
            }
        }
        Ok(Self {
            expected_len: config.expected_len,
        })
    }
}

impl<T> CompanionBuild1D<T> for CompanionKernel
where
    T: Scalar + One + Zero + Div<Output = T> + Neg<Output = T> + Copy + PartialEq,
    DefaultAllocator: Allocator<Dyn, Dyn>,
{
    type Output = OMatrix<T, Dyn, Dyn>;

    fn run<I>(&self, input: &I) -> Result<Self::Output, ExecInvariantViolation>
    where
        I: Read1D<T> + ?Sized,
    {
        let coeffs = input.read_slice().map_err(ExecInvariantViolation::from)?;
        if coeffs.len() < 2 {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "companion requires at least 2 coefficients",
            });
        }
        if let Some(expected_len) = self.expected_len {
            if coeffs.len() != expected_len {
                return Err(ExecInvariantViolation::LengthMismatch {
                    arg: "coeffs",
                    expected: expected_len,
                    got: coeffs.len(),
                });
            }
        }
        if coeffs[0] == T::zero() {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "leading coefficient must be non-zero",
            });
        }
        Ok(companion_from_slice(coeffs))
    }
}

fn companion_from_slice<T>(coeffs: &[T]) -> OMatrix<T, Dyn, Dyn>
where
    T: Scalar + One + Zero + Div<Output = T> + Neg<Output = T> + Copy,
    DefaultAllocator: Allocator<Dyn, Dyn>,
{
    let m = coeffs.len();
    let a0 = coeffs[0];
    let mut matrix = OMatrix::<T, Dyn, Dyn>::zeros(m - 1, m - 1);
    for (i, ai) in coeffs.iter().skip(1).enumerate() {
        matrix[(0, i)] = -*ai / a0;
    }
    for i in 0..(m - 2) {
        matrix[(i + 1, i)] = T::one();
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scipy_example_dyn() {
        let data = [1.0f64, -10.0, 31.0, -30.0];
        let kernel = CompanionKernel::try_new(CompanionConfig::default()).expect("kernel");
        let matrix: DMatrix<f64> = kernel.run(&data).expect("companion");

        let expected = matrix!(
            10., -31.,  30.;
            1.,   0.,   0.;
            0.,   1.,   0.;
        );

        assert_eq!(expected, matrix);
    }

    #[test]
    fn companion_kernel_validates_config_and_input() {
        let bad_len = CompanionKernel::try_new(CompanionConfig {
            expected_len: Some(1),
        })
        .expect_err("short expected_len should fail");
        assert_eq!(
            bad_len,
            ConfigError::InvalidArgument {
                arg: "expected_len",
                reason: "companion requires at least 2 coefficients",
            }
        );

        let kernel = CompanionKernel::try_new(CompanionConfig {
            expected_len: Some(3),
        })
        .expect("kernel should initialize");
        let mismatch: Result<DMatrix<f64>, _> = kernel.run(&[1.0, 2.0]);
        assert!(matches!(
            mismatch,
            Err(ExecInvariantViolation::LengthMismatch { expected: 3, got: 2, .. })
        ));
        let zero_lead: Result<DMatrix<f64>, _> = kernel.run(&[0.0, 2.0, 1.0]);
        assert!(matches!(
            zero_lead,
            Err(ExecInvariantViolation::InvalidState { .. })
        ));
    }

    #[test]
    fn linear_polynomial_gives_one_by_one_matrix() {
        let kernel = CompanionKernel::default();
        let matrix: DMatrix<f64> = kernel.run(&[2.0, -1.0]).expect("companion");
        assert_eq!(matrix.shape(), (1, 1));
        assert_eq!(matrix[(0, 0)], 0.5);
    }
}
