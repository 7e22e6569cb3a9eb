//! Boundary towards the audio output device.

/// Failure reported by the output transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// The sink cannot accept more data right now. Retryable, although
    /// the render loop prefers dropping the stale frame and rendering a
    /// fresh one over retrying.
    Busy,
    /// The sink is gone. The frame was lost and the transport is not
    /// expected to recover on its own.
    Fatal,
}

/// Opaque sink accepting interleaved fixed-point frames.
///
/// `write` may block for the duration of the transfer, bounded by the
/// underlying driver. It must never block indefinitely.
pub trait OutputTransport {
    /// Write one block of interleaved i16 frames.
    ///
    /// Returns the number of samples accepted.
    fn write(&mut self, frame: &[i16]) -> Result<usize, TransportError>;
}
