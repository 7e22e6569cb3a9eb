//! Conversion of engine samples to the transport's fixed-point format.

/// Quantize a floating-point sample to signed 16-bit.
///
/// The sample is clamped to [-1.0, 1.0] before scaling, so overdriven
/// engine output saturates instead of wrapping around. Scaling is
/// symmetric by 32767 and rounds to the nearest integer. NaN maps
/// to 0, infinities clamp like any other out-of-range value.
#[must_use]
pub fn quantize(sample: f32) -> i16 {
    if sample.is_nan() {
        return 0;
    }
    let clamped = sample.clamp(-1.0, 1.0);
    libm::roundf(clamped * 32767.0) as i16
}
