mod ndarray_conv_binds;

use crate::{Error, Result};
use ndarray::{Array1, ArrayView1};
use ndarray_conv::{ConvExt, PaddingMode};

/// Convolution mode determines behavior near edges and output size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvolveMode {
    /// Full convolution, output size is `in1.len() + in2.len() - 1`
    #[default]
    Full,
    /// Valid convolution, output size is `max(in1.len(), in2.len()) - min(in1.len(), in2.len()) + 1`
    Valid,
    /// Same convolution, output size is `max(in1.len(), in2.len())`
    Same,
}

/// Best effort parallel behaviour with numpy's convolve method. The longer input is taken as
/// the signal and the shorter one as the convolution kernel.
///
/// Returns the discrete, linear convolution of two one-dimensional sequences.
/// Polynomial products are full convolutions of the coefficient sequences, so
/// this is the primitive behind every polynomial multiplication in `linfilt`.
///
/// # Parameters
/// * `a` : (N,) [[array_like]]([ndarray::Array1])
///   Signal to be (linearly) convolved.
/// * `v` : (M,) [[array_like]]([ndarray::Array1])
///   Second one-dimensional input array.
/// * `mode` : [ConvolveMode]
///   [ConvolveMode::Full]:
///   By default, mode is 'full'.  This returns the convolution at each point of overlap, with an
///   output shape of (N+M-1,).
///
///   [ConvolveMode::Same]:
///   Mode 'same' returns output of length ``max(M, N)``.  Boundary effects are still visible.
///
///   [ConvolveMode::Valid]:
///   Mode 'valid' returns output of length ``max(M, N) - min(M, N) + 1``.  The convolution
///   product is only given for points where the signals overlap completely.
///
/// # Errors
/// [`Error::EmptyInput`] when either input is empty, [`Error::Conv`] when the convolution
/// backend rejects the inputs.
///
/// # Examples
/// ```
/// use ndarray::array;
/// use linfilt_core::num_rs::{ConvolveMode, convolve};
///
/// let a = array![1., 2., 3.];
/// let v = array![0., 1., 0.5];
///
/// let expected = array![0., 1., 2.5, 4., 1.5];
/// let result = convolve((&a).into(), (&v).into(), ConvolveMode::Full).unwrap();
/// assert_eq!(result, expected);
/// ```
pub fn convolve<T>(a: ArrayView1<T>, v: ArrayView1<T>, mode: ConvolveMode) -> Result<Array1<T>>
where
    T: num_traits::NumAssign + core::marker::Copy,
{
    if a.is_empty() {
        return Err(Error::EmptyInput { arg: "a".into() });
    }
    if v.is_empty() {
        return Err(Error::EmptyInput { arg: "v".into() });
    }
    let (a, v) = (a.reborrow(), v.reborrow());
    let (signal, kernel) = if v.len() > a.len() { (v, a) } else { (a, v) };
    signal
        .conv(&kernel, mode.into(), PaddingMode::Zeros)
        .map_err(|e| Error::Conv {
            reason: e.to_string(),
        })
}

/// Full convolution of two coefficient slices.
///
/// Slice-level shorthand for [`convolve`] in [`ConvolveMode::Full`].
pub fn convolve_full<T>(a: &[T], v: &[T]) -> Result<Vec<T>>
where
    T: num_traits::NumAssign + core::marker::Copy,
{
    convolve(
        ArrayView1::from(a),
        ArrayView1::from(v),
        ConvolveMode::Full,
    )
    .map(|out| out.to_vec())
}
