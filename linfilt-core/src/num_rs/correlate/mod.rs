use super::ConvolveMode;
use crate::{Error, Result};
use ndarray::{Array1, ArrayView1};

/// Cross-correlation of two real one-dimensional sequences, numpy style.
///
/// `correlate(a, v)[k]` in [`ConvolveMode::Full`] is `sum_n a[n + k - (M - 1)] * v[n]`,
/// so the zero-lag term sits at index `M - 1`. The autocorrelation of a
/// causal filter's coefficients gives the weights of the symmetric filter
/// `f ⊗ mirror(f)`.
///
/// # Errors
/// [`Error::EmptyInput`] when either input is empty.
///
/// # Examples
/// ```
/// use ndarray::array;
/// use linfilt_core::num_rs::{ConvolveMode, correlate};
///
/// let a = array![1., 0.5];
/// let result = correlate((&a).into(), (&a).into(), ConvolveMode::Full).unwrap();
/// assert_eq!(result, array![0.5, 1.25, 0.5]);
/// ```
pub fn correlate<T>(a: ArrayView1<T>, v: ArrayView1<T>, mode: ConvolveMode) -> Result<Array1<T>>
where
    T: num_traits::NumAssign + core::marker::Copy,
{
    if v.is_empty() {
        return Err(Error::EmptyInput { arg: "v".into() });
    }
    let reversed = v.slice(ndarray::s![..;-1]).to_owned();
    super::convolve(a, reversed.view(), mode)
}
