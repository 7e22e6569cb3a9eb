//! Conversion of planar engine blocks into interleaved output frames.

use crate::quantizer::quantize;

/// Quantize a planar f32 block into an interleaved i16 frame.
///
/// `planar` holds `engine_channels` lanes of `channel_stride` samples
/// each, lane after lane. The first `frames` samples of every lane are
/// converted; `frames` may fall short of the stride when the engine
/// delivered a partial block, the lanes stay spaced by the stride
/// regardless. `frame` receives `frames * output_channels` interleaved
/// samples. When the engine produces fewer channels than the output
/// expects, the last engine channel is replicated into the remaining
/// output channels, so a mono engine feeds both sides of a stereo
/// device with identical samples.
pub fn interleave(
    planar: &[f32],
    frames: usize,
    channel_stride: usize,
    engine_channels: usize,
    frame: &mut [i16],
    output_channels: usize,
) {
    debug_assert!(engine_channels > 0);
    debug_assert!(frames <= channel_stride);
    debug_assert!(planar.len() >= (engine_channels - 1) * channel_stride + frames);
    debug_assert!(frame.len() >= frames * output_channels);

    for i in 0..frames {
        for channel in 0..output_channels {
            let source = channel.min(engine_channels - 1);
            frame[i * output_channels + channel] =
                quantize(planar[source * channel_stride + i]);
        }
    }
}
