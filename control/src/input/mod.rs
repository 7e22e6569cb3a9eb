//! Abstractions of physical input peripherals.

pub mod knob;
pub mod switch;
