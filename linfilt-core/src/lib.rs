//! Core types shared by the `linfilt` crates.
//!
//! Holds the crate-wide [`Error`] type and the small numeric array primitives
//! ([`num_rs::convolve`], [`num_rs::correlate`]) that the polynomial and filter
//! algebra is built on.

#![deny(missing_docs)]

pub mod num_rs;

/// Errors raised by the numeric primitives and the polynomial algebra.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Argument passed into a function was invalid.
    #[error("invalid argument `{arg}`: {reason}")]
    InvalidArg {
        /// The invalid arg.
        arg: String,
        /// Explaining why arg is invalid.
        reason: String,
    },
    /// A required input was empty.
    #[error("input `{arg}` is empty")]
    EmptyInput {
        /// Name of the empty input.
        arg: String,
    },
    /// The convolution backend failed.
    #[error("convolution failed: {reason}")]
    Conv {
        /// Backend error message.
        reason: String,
    },
}

/// Result alias for fallible `linfilt` primitives.
pub type Result<T> = core::result::Result<T, Error>;
