//! Linear-algebra helpers: companion matrices and polynomial roots.

mod companion;
mod roots;

pub use companion::*;
pub use roots::*;
