//! Control path of the bridge, turning raw hardware inputs into named
//! engine values.
//!
//! The crate is meant to be driven by a periodic task of the hosting
//! executive, running at a slower pace and lower priority than the
//! audio path. Each tick it reads all configured switches and knobs,
//! stabilizes them, and forwards changes into the engine:
//!
//! ```text
//!   [ read_digital ]   [ read_analog ]      (ControlHardware)
//!          |                  |
//!          V                  V
//!     [ Switch ]          [ Knob ]          (debounce, smoothen)
//!          |                  |
//!          +------ [ Poller ] +
//!                      |
//!                  (inject)
//!                      V
//!               [ AudioEngine ]
//! ```
//!
//! Nothing here touches hardware or spawns tasks. The clock, the
//! drivers, and the engine all enter through arguments, so every piece
//! runs deterministically on a host.

#![allow(clippy::items_after_statements)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]

#[cfg(test)]
#[macro_use]
extern crate approx;

pub mod binding;
pub mod config;
pub mod hardware;
pub mod input;
pub mod poller;

mod log;
