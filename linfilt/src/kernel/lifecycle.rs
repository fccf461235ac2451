use super::ConfigError;

/// Constructor validation lifecycle shared by kernel structs.
pub trait KernelLifecycle: Sized {
    /// Kernel config type.
    type Config;

    /// Construct a validated kernel from config.
    fn try_new(config: Self::Config) -> Result<Self, ConfigError>;
}

/// Check that a tolerance is finite and strictly positive.
pub(crate) fn check_tolerance(arg: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidArgument {
            arg,
            reason: "tolerance must be finite and > 0",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{check_tolerance, ConfigError, KernelLifecycle};

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct DummyConfig {
        epsilon: f64,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct DummyKernel {
        epsilon: f64,
    }

    impl KernelLifecycle for DummyKernel {
        type Config = DummyConfig;

        fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
            check_tolerance("epsilon", config.epsilon)?;
            Ok(Self {
                epsilon: config.epsilon,
            })
        }
    }

    #[test]
    fn lifecycle_constructor_accepts_valid_config() {
        let kernel = DummyKernel::try_new(DummyConfig { epsilon: 1e-4 }).expect("valid config");
        assert_eq!(kernel.epsilon, 1e-4);
    }

    #[test]
    fn lifecycle_constructor_rejects_invalid_config() {
        for epsilon in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = DummyKernel::try_new(DummyConfig { epsilon }).expect_err("invalid config");
            assert_eq!(
                err,
                ConfigError::InvalidArgument {
                    arg: "epsilon",
                    reason: "tolerance must be finite and > 0",
                }
            );
        }
    }
}
