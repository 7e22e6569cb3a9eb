//! Transforms applied to control values before injection.

/// Linear mapping from the normalized [0, 1] range.
///
/// A reversed range (`min > max`) is valid and inverts the control.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scale {
    pub min: f32,
    pub max: f32,
}

impl Default for Scale {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl Scale {
    #[must_use]
    pub fn apply(&self, x: f32) -> f32 {
        self.min + x * (self.max - self.min)
    }
}

/// When an analog channel's value gets injected into the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogPolicy {
    /// Inject the current value every poll tick.
    Always,
    /// Inject only when the scaled value moved further than the given
    /// threshold since the last injection.
    OnChange(f32),
}
