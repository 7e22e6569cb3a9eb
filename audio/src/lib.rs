//! Real-time audio path of the control-to-audio bridge.
//!
//! This crate covers everything between the synthesis engine and the
//! output device: it pulls fixed-size blocks of floating-point samples
//! from the engine, converts them to the transport's interleaved
//! fixed-point format, and pushes them out, degrading to a brief gap
//! rather than stalling when either side misbehaves.
//!
//! The engine and the transport are opaque collaborators entering
//! through traits, so the whole path can be exercised on a host without
//! any hardware:
//!
//! ```text
//!   [ AudioEngine ] --(planar f32 block)--> [ RenderLoop ]
//!                                                |
//!                                  (clamp, quantize, interleave)
//!                                                |
//!                                                V
//!                                       [ OutputTransport ]
//! ```

#![allow(clippy::items_after_statements)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]

pub mod engine;
pub mod frame;
pub mod quantizer;
pub mod receiver;
pub mod render;
pub mod transport;
