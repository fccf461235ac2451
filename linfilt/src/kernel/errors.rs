/// Validation errors raised at kernel construction or adapter binding time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A configuration argument value is invalid.
    #[error("invalid argument `{arg}`: {reason}")]
    InvalidArgument {
        /// Name of the argument.
        arg: &'static str,
        /// Human readable reason.
        reason: &'static str,
    },
    /// A contiguous 1D slice view could not be obtained.
    #[error("argument `{arg}` is not contiguous in memory")]
    NonContiguous {
        /// Name of the argument that is non-contiguous.
        arg: &'static str,
    },
}

/// Runtime execution invariant violations for checked kernel entrypoints.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecInvariantViolation {
    /// An execution precondition was violated.
    #[error("execution invariant violation: {reason}")]
    InvalidState {
        /// Human readable reason.
        reason: &'static str,
    },
    /// Input length mismatched the expected runtime shape.
    #[error("execution length mismatch on `{arg}`: expected {expected}, got {got}")]
    LengthMismatch {
        /// Name of the argument.
        arg: &'static str,
        /// Required length.
        expected: usize,
        /// Received length.
        got: usize,
    },
    /// An iterative numerical routine did not converge.
    #[error("no convergence after {iterations} iterations")]
    NoConvergence {
        /// Iteration budget that was exhausted.
        iterations: usize,
    },
    /// Adapter binding/configuration failure.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_messages() {
        assert_eq!(
            ConfigError::InvalidArgument {
                arg: "period",
                reason: "period must be at least 1",
            }
            .to_string(),
            "invalid argument `period`: period must be at least 1"
        );
    }

    #[test]
    fn exec_error_wraps_config_error() {
        let err: ExecInvariantViolation = ConfigError::NonContiguous { arg: "array" }.into();
        assert_eq!(err.to_string(), "argument `array` is not contiguous in memory");
        assert!(matches!(err, ExecInvariantViolation::Config(_)));
    }

    #[test]
    fn errors_are_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<ConfigError>();
        assert_impl::<ExecInvariantViolation>();
    }
}
