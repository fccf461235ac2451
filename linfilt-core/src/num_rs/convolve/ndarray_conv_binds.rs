use super::ConvolveMode;
use ndarray_conv::ConvMode;

impl<const N: usize> From<ConvolveMode> for ConvMode<N> {
    fn from(mode: ConvolveMode) -> Self {
        match mode {
            ConvolveMode::Full => ConvMode::Full,
            ConvolveMode::Valid => ConvMode::Valid,
            ConvolveMode::Same => ConvMode::Same,
        }
    }
}
