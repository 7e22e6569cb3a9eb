//! Boundary towards the audio synthesis engine.

use crate::receiver::ReceiverId;

/// Opaque synthesis engine producing audio blocks on demand.
///
/// The engine is driven from two independent loops. The render loop
/// calls [`AudioEngine::render`] continuously, while the control loop
/// calls [`AudioEngine::inject`] at its own pace. Implementations must
/// apply each injected value atomically per receiver and make it
/// visible to rendering no later than the first `render` call after the
/// injection. Same-cycle visibility is not required.
pub trait AudioEngine {
    /// Render up to `frames` frames of planar output.
    ///
    /// `output` is laid out channel after channel,
    /// `[ch0 * frames, ch1 * frames, ..]`. The return value is the
    /// number of leading frames of each channel lane that carry valid
    /// samples; on a partial block the lanes remain spaced by the
    /// requested `frames`. Zero or a negative value means the engine
    /// is not ready and the buffer content must be ignored.
    fn render(&mut self, output: &mut [f32], frames: usize) -> i32;

    /// Set the control value of a named receiver.
    fn inject(&mut self, receiver: ReceiverId, value: f32);

    /// Number of output channels the engine produces.
    fn channels(&self) -> usize;
}
