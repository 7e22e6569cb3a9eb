//! Static configuration of the control loop.

use crate::binding::{AnalogPolicy, Scale};
use crate::input::knob::{DEFAULT_ALPHA, DEFAULT_FULL_SCALE};
use crate::input::switch::Polarity;

/// Configuration the control loop must not start with.
///
/// Everything else gets normalized to documented defaults, these are
/// structural and fail construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    ZeroDebounceWidth,
    TooManyDigitalChannels,
    TooManyAnalogChannels,
}

/// One digital channel wired to a named engine receiver.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitalChannelConfig<'a> {
    pub channel: u8,
    pub receiver_name: &'a str,
    pub polarity: Polarity,
}

/// One analog channel wired to a named engine receiver.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogChannelConfig<'a> {
    pub channel: u8,
    pub receiver_name: &'a str,
    pub scale: Scale,
    pub policy: AnalogPolicy,
}

/// Everything the poller needs to know, loaded once at startup.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config<'a> {
    /// Period the executive is expected to tick the poller with.
    pub poll_interval_ms: u32,
    /// Debounce register width shared by all switches.
    pub debounce_width: u32,
    /// Raw readings averaged per analog update.
    pub oversample_count: u32,
    /// Exponential smoothing weight, (0, 1].
    pub alpha: f32,
    /// Poll ticks between two analog updates.
    pub update_interval: u32,
    /// Full-scale raw value of the converter.
    pub full_scale: u16,
    pub digital: &'a [DigitalChannelConfig<'a>],
    pub analog: &'a [AnalogChannelConfig<'a>],
}

impl Default for Config<'_> {
    fn default() -> Self {
        Self {
            poll_interval_ms: 10,
            debounce_width: 8,
            oversample_count: 1,
            alpha: DEFAULT_ALPHA,
            update_interval: 100,
            full_scale: DEFAULT_FULL_SCALE,
            digital: &[],
            analog: &[],
        }
    }
}
