//! Oversampled, exponentially smoothed analog channel.

/// Default smoothing weight of a new reading.
pub const DEFAULT_ALPHA: f32 = 0.1;

/// Full scale of a 12-bit converter.
pub const DEFAULT_FULL_SCALE: u16 = 4095;

/// What one poll tick did to the knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// Between update boundaries, no reading was drawn.
    Idle,
    /// The smoothed value got recomputed.
    Updated,
    /// A hardware read failed on the boundary, the value is stale.
    Failed,
}

/// Use this to stabilize a noisy analog channel over time.
///
/// Every `update_interval` ticks the knob draws `oversample_count` raw
/// readings, averages them, normalizes to [0, 1] against the
/// converter's full scale, and blends the result into its running value
/// with exponential weight alpha. Oversampling cuts the noise variance
/// by the square root of the count, while the decoupled update interval
/// keeps the polling cadence fast enough for debouncing without paying
/// for the multi-sample read on every tick.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Knob {
    oversample_count: u32,
    alpha: f32,
    update_interval: u32,
    full_scale: f32,
    counter: u32,
    value: f32,
}

impl Knob {
    /// Out-of-range parameters are normalized rather than rejected, a
    /// misconfigured knob must not take down the whole control loop:
    /// zero `oversample_count` and `update_interval` become 1, alpha
    /// outside (0, 1] becomes [`DEFAULT_ALPHA`], zero `full_scale`
    /// becomes [`DEFAULT_FULL_SCALE`].
    #[must_use]
    pub fn new(oversample_count: u32, alpha: f32, update_interval: u32, full_scale: u16) -> Self {
        let alpha = if alpha > 0.0 && alpha <= 1.0 {
            alpha
        } else {
            DEFAULT_ALPHA
        };
        let full_scale = if full_scale == 0 {
            DEFAULT_FULL_SCALE
        } else {
            full_scale
        };
        Self {
            oversample_count: oversample_count.max(1),
            alpha,
            update_interval: update_interval.max(1),
            full_scale: f32::from(full_scale),
            counter: 0,
            value: 0.0,
        }
    }

    /// Advance the knob by one poll tick.
    ///
    /// Raw readings are drawn from `sample_fn` only on update
    /// boundaries. A reading of `None` marks a failed hardware read and
    /// aborts the whole update, leaving the value stale for this
    /// interval.
    pub fn tick(&mut self, mut sample_fn: impl FnMut() -> Option<u16>) -> Tick {
        self.counter += 1;
        if self.counter < self.update_interval {
            return Tick::Idle;
        }
        self.counter = 0;

        let mut sum = 0.0;
        for _ in 0..self.oversample_count {
            match sample_fn() {
                Some(raw) => sum += f32::from(raw),
                None => return Tick::Failed,
            }
        }
        let mean = sum / self.oversample_count as f32;
        let normalized = (mean / self.full_scale).clamp(0.0, 1.0);

        self.value = self.alpha * normalized + (1.0 - self.alpha) * self.value;
        Tick::Updated
    }

    /// The running smoothed value, always within [0, 1].
    ///
    /// Constant between update boundaries, no extrapolation.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }
}
