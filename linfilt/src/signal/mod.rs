//! Linear filters and their frequency responses.

pub mod filter;
pub mod spectral;
pub mod traits;
