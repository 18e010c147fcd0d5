use siba_core::ports::EntropyPort;

/// `Math.random()` — uniform in `[0, 1)`, not cryptographic.
pub struct MathRandom;

impl MathRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MathRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropyPort for MathRandom {
    fn next_unit(&self) -> f64 {
        js_sys::Math::random()
    }
}
