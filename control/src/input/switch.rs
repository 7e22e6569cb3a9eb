//! Debounced switch tracking its state over time.

use crate::config::ConfigError;

/// Minimum time between two shift-register advances.
pub const MIN_SAMPLE_INTERVAL_MS: u32 = 1;

/// The register is kept in a u32.
pub const MAX_DEBOUNCE_WIDTH: u32 = 32;

/// Electrical orientation of the switch.
///
/// Momentary switches wired against a pull-up read low when pressed,
/// those are `Inverted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    Normal,
    Inverted,
}

/// Use this to hold a switch's state over time.
///
/// Raw levels are shifted into an N-bit register, advancing at most
/// once per [`MIN_SAMPLE_INTERVAL_MS`]. The switch counts as pressed
/// only once the register saturates to all ones and as released only
/// once it saturates to all zeros, which rejects contact bounce with a
/// latency bounded by `N * MIN_SAMPLE_INTERVAL_MS`. Patterns in between
/// retain the previous logical state.
///
/// Edges fire on the exact tick the register reaches either saturation
/// pattern and are valid only until the next [`Switch::sample`] call.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Switch {
    polarity: Polarity,
    mask: u32,
    register: u32,
    raw: bool,
    pressed: bool,
    rising: bool,
    falling: bool,
    last_sample_ms: Option<u32>,
    pressed_since_ms: u32,
}

impl Switch {
    /// # Errors
    ///
    /// A zero-width register could never saturate, such configuration
    /// is rejected. Widths above [`MAX_DEBOUNCE_WIDTH`] are clamped to
    /// it instead.
    pub fn new(polarity: Polarity, debounce_width: u32) -> Result<Self, ConfigError> {
        if debounce_width == 0 {
            return Err(ConfigError::ZeroDebounceWidth);
        }
        let width = debounce_width.min(MAX_DEBOUNCE_WIDTH);
        let mask = if width == 32 {
            u32::MAX
        } else {
            (1 << width) - 1
        };
        Ok(Self {
            polarity,
            mask,
            register: 0,
            raw: false,
            pressed: false,
            rising: false,
            falling: false,
            last_sample_ms: None,
            pressed_since_ms: 0,
        })
    }

    /// Feed one raw reading into the debouncer.
    ///
    /// The register advances only when at least one sampling interval
    /// elapsed since the previous advance, calls in between clear the
    /// edge flags and do nothing else.
    pub fn sample(&mut self, raw_level: bool, now_ms: u32) {
        self.rising = false;
        self.falling = false;

        let corrected = match self.polarity {
            Polarity::Normal => raw_level,
            Polarity::Inverted => !raw_level,
        };
        self.raw = corrected;

        if let Some(last) = self.last_sample_ms {
            if now_ms.wrapping_sub(last) < MIN_SAMPLE_INTERVAL_MS {
                return;
            }
        }
        self.last_sample_ms = Some(now_ms);

        let previous = self.register;
        self.register = ((previous << 1) | u32::from(corrected)) & self.mask;

        if self.register == self.mask && previous != self.mask {
            self.pressed = true;
            self.rising = true;
            self.pressed_since_ms = now_ms;
        } else if self.register == 0 && previous != 0 {
            self.pressed = false;
            self.falling = true;
        }
    }

    #[must_use]
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    #[must_use]
    pub fn rising_edge(&self) -> bool {
        self.rising
    }

    #[must_use]
    pub fn falling_edge(&self) -> bool {
        self.falling
    }

    /// The last polarity-corrected raw level, before any debouncing.
    #[must_use]
    pub fn raw_state(&self) -> bool {
        self.raw
    }

    /// Milliseconds since the press got recognized, 0 while released.
    #[must_use]
    pub fn time_held_ms(&self, now_ms: u32) -> u32 {
        if self.pressed {
            now_ms.wrapping_sub(self.pressed_since_ms)
        } else {
            0
        }
    }
}
