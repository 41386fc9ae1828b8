//! Runtime configuration.

/// Runtime configuration options.
#[derive(Clone, Copy, Debug)]
pub struct VmConfig {
    /// Fractional digits kept by `Vm::divide`.
    pub division_scale: u32,
    /// Reject odd-length initializer lists in `Vm::make_instance`.
    /// When off, a trailing key is bound to `Value::UNDEFINED`.
    pub strict_initargs: bool,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            division_scale: 20,
            strict_initargs: true,
        }
    }
}
