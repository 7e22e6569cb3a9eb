//! Real-time loop moving blocks from the engine to the transport.

use crate::engine::AudioEngine;
use crate::frame::interleave;
use crate::transport::OutputTransport;

/// Upper bound on frames per block, sized for the scratch buffers.
pub const MAX_BLOCK_LENGTH: usize = 256;

/// Output devices are mono or stereo.
pub const MAX_OUTPUT_CHANNELS: usize = 2;

/// Static configuration of the render loop.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Frames requested from the engine per cycle. It must respect the
    /// engine's own constraints, strict single-sample engines use
    /// literally 1.
    pub block_length: usize,
    /// Channels of the output device, 1 or 2.
    pub output_channels: usize,
}

/// Configuration the render loop must not start with.
///
/// Running with a broken audio path is unacceptable, so unlike the
/// control path these are not normalized away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    BlockLength,
    OutputChannels,
}

/// Outcome of one render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cycle {
    /// A full block was rendered and accepted by the transport.
    Written,
    /// The engine had nothing to offer, no transport call was made.
    NotReady,
    /// The transport refused the frame. The frame is gone, the next
    /// cycle renders fresh audio instead of retrying stale samples.
    Dropped,
}

/// The real-time heart of the bridge.
///
/// Each cycle pulls exactly one block from the engine, clamps and
/// quantizes it, and hands it to the transport. The loop blocks only
/// inside the transport write. Steady-state failures degrade to a
/// brief gap and a bumped counter, they never escape the loop.
///
/// The engine is not owned here. It is borrowed per call, so the
/// executive can share it with the control loop under its own
/// resource-locking scheme.
#[derive(Debug)]
pub struct RenderLoop<T> {
    transport: T,
    block_length: usize,
    output_channels: usize,
    planar: [f32; MAX_BLOCK_LENGTH * MAX_OUTPUT_CHANNELS],
    frame: [i16; MAX_BLOCK_LENGTH * MAX_OUTPUT_CHANNELS],
    dropped_blocks: u32,
    not_ready_cycles: u32,
}

impl<T: OutputTransport> RenderLoop<T> {
    /// # Errors
    ///
    /// Fails fast when the block length or channel count is outside the
    /// supported range.
    pub fn new(config: Config, transport: T) -> Result<Self, ConfigError> {
        if config.block_length == 0 || config.block_length > MAX_BLOCK_LENGTH {
            return Err(ConfigError::BlockLength);
        }
        if config.output_channels == 0 || config.output_channels > MAX_OUTPUT_CHANNELS {
            return Err(ConfigError::OutputChannels);
        }
        Ok(Self {
            transport,
            block_length: config.block_length,
            output_channels: config.output_channels,
            planar: [0.0; MAX_BLOCK_LENGTH * MAX_OUTPUT_CHANNELS],
            frame: [0; MAX_BLOCK_LENGTH * MAX_OUTPUT_CHANNELS],
            dropped_blocks: 0,
            not_ready_cycles: 0,
        })
    }

    /// Execute a single render+transport cycle.
    pub fn run_once(&mut self, engine: &mut impl AudioEngine) -> Cycle {
        let engine_channels = engine.channels().min(MAX_OUTPUT_CHANNELS);
        if engine_channels == 0 {
            self.not_ready_cycles = self.not_ready_cycles.saturating_add(1);
            return Cycle::NotReady;
        }

        let planar = &mut self.planar[..self.block_length * engine_channels];
        let rendered = engine.render(planar, self.block_length);
        if rendered <= 0 {
            self.not_ready_cycles = self.not_ready_cycles.saturating_add(1);
            return Cycle::NotReady;
        }
        let frames = (rendered as usize).min(self.block_length);

        let frame = &mut self.frame[..frames * self.output_channels];
        interleave(
            planar,
            frames,
            self.block_length,
            engine_channels,
            frame,
            self.output_channels,
        );

        match self.transport.write(frame) {
            Ok(_) => Cycle::Written,
            Err(_) => {
                self.dropped_blocks = self.dropped_blocks.saturating_add(1);
                Cycle::Dropped
            }
        }
    }

    /// Drive the loop forever.
    ///
    /// `idle` is invoked after every cycle that produced no output,
    /// giving the executive a chance to yield the processor briefly
    /// before the next attempt.
    pub fn run(&mut self, engine: &mut impl AudioEngine, mut idle: impl FnMut()) -> ! {
        loop {
            match self.run_once(engine) {
                Cycle::Written => (),
                Cycle::NotReady | Cycle::Dropped => idle(),
            }
        }
    }

    /// Blocks lost to transport backpressure or failure since startup.
    #[must_use]
    pub fn dropped_blocks(&self) -> u32 {
        self.dropped_blocks
    }

    /// Cycles the engine reported itself not ready since startup.
    #[must_use]
    pub fn not_ready_cycles(&self) -> u32 {
        self.not_ready_cycles
    }
}
