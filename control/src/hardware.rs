//! Boundary towards hardware input drivers.

/// Control-path reads of digital and analog channels.
///
/// Reads are expected to complete in bounded, short time. A driver
/// whose read could stall must wrap it with a timeout behind this
/// boundary, one stuck channel must not starve the others.
pub trait ControlHardware {
    /// Current raw level of a digital channel.
    fn read_digital(&mut self, channel: u8) -> bool;

    /// One raw conversion of an analog channel.
    ///
    /// `None` marks a transient failure or timeout. The poller treats
    /// it as "no change" for this tick rather than propagating it.
    fn read_analog(&mut self, channel: u8) -> Option<u16>;
}
