use serde::{Deserialize, Serialize};

/// Default tolerance for floating-point scalar comparison.
///
/// Chosen so that values differing only past the ninth decimal place compare
/// equal while anything coarser (e.g. `1.0` vs `1.1`) does not.
pub const DEFAULT_FLOAT_EPSILON: f64 = 1e-9;

/// Configuration for one deep comparison
///
/// Immutable for the duration of a call. A fresh `CompareOptions` carries the
/// defaults; the builder methods adjust individual knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareOptions {
    /// Tolerance used when comparing floating-point scalars instead of exact
    /// bit equality. Applies whenever either side of a numeric pair is
    /// floating-point.
    pub float_epsilon: f64,

    /// Bypass a type's own shallow-equality operation (`Reflect::native_eq`)
    /// and force field-by-field structural comparison.
    pub ignore_native_equality: bool,

    /// Render the first mismatch into a path-qualified difference record.
    /// When unset the engine skips the rendering work and `deep_compare`
    /// reports the verdict alone.
    pub collect_difference: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            float_epsilon: DEFAULT_FLOAT_EPSILON,
            ignore_native_equality: false,
            collect_difference: false,
        }
    }
}

impl CompareOptions {
    /// Create options with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the floating-point tolerance
    pub fn with_float_epsilon(mut self, epsilon: f64) -> Self {
        self.float_epsilon = epsilon;
        self
    }

    /// Distrust native equality and always compare structurally
    pub fn ignoring_native_equality(mut self) -> Self {
        self.ignore_native_equality = true;
        self
    }

    /// Record the first point of divergence when the verdict is unequal
    pub fn collecting_difference(mut self) -> Self {
        self.collect_difference = true;
        self
    }
}
