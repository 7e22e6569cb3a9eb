//! Periodic task feeding control changes into the audio engine.

#[allow(unused_imports)]
use micromath::F32Ext;

use heapless::Vec;

use mostek_audio::engine::AudioEngine;
use mostek_audio::receiver::ReceiverId;

use crate::binding::{AnalogPolicy, Scale};
use crate::config::{Config, ConfigError};
use crate::hardware::ControlHardware;
use crate::input::knob::{Knob, Tick};
use crate::input::switch::Switch;
use crate::log;

/// A single converter exposes 8 channels, there is no point in
/// allowing larger tables.
pub const MAX_DIGITAL_CHANNELS: usize = 8;
pub const MAX_ANALOG_CHANNELS: usize = 8;

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct DigitalSlot {
    channel: u8,
    receiver: ReceiverId,
    switch: Switch,
}

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct AnalogSlot {
    channel: u8,
    receiver: ReceiverId,
    knob: Knob,
    scale: Scale,
    policy: AnalogPolicy,
    last_injected: Option<f32>,
}

/// Reads all configured inputs and forwards changes to the engine.
///
/// The poller holds no hardware and spawns nothing. The hosting
/// executive ticks it on a fixed period, passing in the clock, the
/// drivers, and the engine. On shutdown the executive must stop
/// ticking before tearing the engine down, the poller itself keeps no
/// reference to it.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Poller {
    poll_interval_ms: u32,
    digital: Vec<DigitalSlot, MAX_DIGITAL_CHANNELS>,
    analog: Vec<AnalogSlot, MAX_ANALOG_CHANNELS>,
}

impl Poller {
    /// Resolve receiver names and build all input abstractions.
    ///
    /// Receiver identifiers are hashed here, once, so ticking never
    /// touches a string.
    ///
    /// # Errors
    ///
    /// Fails on structural problems, a zero debounce width or more
    /// channels than the tables can hold. Value-range problems are
    /// normalized to defaults inside the respective input instead.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let mut digital = Vec::new();
        for channel_config in config.digital {
            let slot = DigitalSlot {
                channel: channel_config.channel,
                receiver: ReceiverId::from_name(channel_config.receiver_name),
                switch: Switch::new(channel_config.polarity, config.debounce_width)?,
            };
            digital
                .push(slot)
                .map_err(|_| ConfigError::TooManyDigitalChannels)?;
        }

        let mut analog = Vec::new();
        for channel_config in config.analog {
            let slot = AnalogSlot {
                channel: channel_config.channel,
                receiver: ReceiverId::from_name(channel_config.receiver_name),
                knob: Knob::new(
                    config.oversample_count,
                    config.alpha,
                    config.update_interval,
                    config.full_scale,
                ),
                scale: channel_config.scale,
                policy: channel_config.policy,
                last_injected: None,
            };
            analog
                .push(slot)
                .map_err(|_| ConfigError::TooManyAnalogChannels)?;
        }

        log::info!(
            "Control poller ready: digital={:?} analog={:?}",
            digital.len(),
            analog.len()
        );

        Ok(Self {
            poll_interval_ms: config.poll_interval_ms,
            digital,
            analog,
        })
    }

    /// Period the executive is expected to schedule [`Poller::tick`] with.
    #[must_use]
    pub fn poll_interval_ms(&self) -> u32 {
        self.poll_interval_ms
    }

    /// Run one poll cycle.
    ///
    /// Recognized switch edges inject 1.0/0.0, analog channels inject
    /// their scaled value per their policy. A failed hardware read
    /// skips the injection for that channel this tick, stale control
    /// beats a stalled poll loop.
    pub fn tick(
        &mut self,
        now_ms: u32,
        hardware: &mut impl ControlHardware,
        engine: &mut impl AudioEngine,
    ) {
        for slot in &mut self.digital {
            let raw = hardware.read_digital(slot.channel);
            slot.switch.sample(raw, now_ms);
            if slot.switch.rising_edge() {
                engine.inject(slot.receiver, 1.0);
            } else if slot.switch.falling_edge() {
                engine.inject(slot.receiver, 0.0);
            }
        }

        for slot in &mut self.analog {
            let channel = slot.channel;
            let tick = slot.knob.tick(|| hardware.read_analog(channel));
            if tick == Tick::Failed {
                continue;
            }
            let scaled = slot.scale.apply(slot.knob.value());

            match slot.policy {
                AnalogPolicy::Always => engine.inject(slot.receiver, scaled),
                AnalogPolicy::OnChange(threshold) => {
                    if tick != Tick::Updated {
                        continue;
                    }
                    let moved = slot
                        .last_injected
                        .map_or(true, |last| (scaled - last).abs() > threshold);
                    if moved {
                        engine.inject(slot.receiver, scaled);
                        slot.last_injected = Some(scaled);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnalogChannelConfig, DigitalChannelConfig};
    use crate::input::switch::Polarity;

    struct FakeHardware {
        digital: [bool; 8],
        analog: [Option<u16>; 8],
    }

    impl Default for FakeHardware {
        fn default() -> Self {
            Self {
                digital: [false; 8],
                analog: [Some(0); 8],
            }
        }
    }

    impl ControlHardware for FakeHardware {
        fn read_digital(&mut self, channel: u8) -> bool {
            self.digital[channel as usize]
        }

        fn read_analog(&mut self, channel: u8) -> Option<u16> {
            self.analog[channel as usize]
        }
    }

    #[derive(Default)]
    struct RecordingEngine {
        injected: std::vec::Vec<(ReceiverId, f32)>,
    }

    impl AudioEngine for RecordingEngine {
        fn render(&mut self, _output: &mut [f32], _frames: usize) -> i32 {
            0
        }

        fn inject(&mut self, receiver: ReceiverId, value: f32) {
            self.injected.push((receiver, value));
        }

        fn channels(&self) -> usize {
            1
        }
    }

    const GATE: DigitalChannelConfig<'static> = DigitalChannelConfig {
        channel: 0,
        receiver_name: "gate",
        polarity: Polarity::Normal,
    };

    const CUTOFF: AnalogChannelConfig<'static> = AnalogChannelConfig {
        channel: 0,
        receiver_name: "cutoff",
        scale: Scale {
            min: 0.0,
            max: 100.0,
        },
        policy: AnalogPolicy::OnChange(0.5),
    };

    fn tick_many(
        poller: &mut Poller,
        hardware: &mut FakeHardware,
        engine: &mut RecordingEngine,
        start_ms: u32,
        count: u32,
    ) -> u32 {
        for i in 0..count {
            poller.tick(start_ms + i, hardware, engine);
        }
        start_ms + count
    }

    #[test]
    fn when_a_switch_is_pressed_and_released_it_injects_each_edge_once() {
        let gate_id = ReceiverId::from_name("gate");
        let config = Config {
            debounce_width: 4,
            digital: &[GATE],
            ..Config::default()
        };
        let mut poller = Poller::new(&config).unwrap();
        let mut hardware = FakeHardware::default();
        let mut engine = RecordingEngine::default();

        hardware.digital[0] = true;
        let now_ms = tick_many(&mut poller, &mut hardware, &mut engine, 0, 8);
        assert_eq!(engine.injected, [(gate_id, 1.0)]);

        hardware.digital[0] = false;
        tick_many(&mut poller, &mut hardware, &mut engine, now_ms, 8);
        assert_eq!(engine.injected, [(gate_id, 1.0), (gate_id, 0.0)]);
    }

    #[test]
    fn when_the_value_moves_within_the_threshold_nothing_is_injected() {
        let config = Config {
            oversample_count: 1,
            alpha: 1.0,
            update_interval: 1,
            analog: &[CUTOFF],
            ..Config::default()
        };
        let mut poller = Poller::new(&config).unwrap();
        let mut hardware = FakeHardware::default();
        let mut engine = RecordingEngine::default();

        hardware.analog[0] = Some(2048);
        poller.tick(0, &mut hardware, &mut engine);
        assert_eq!(engine.injected.len(), 1);

        // Noise below the 0.5 threshold on the scaled value.
        hardware.analog[0] = Some(2049);
        poller.tick(1, &mut hardware, &mut engine);
        assert_eq!(engine.injected.len(), 1);

        hardware.analog[0] = Some(3000);
        poller.tick(2, &mut hardware, &mut engine);
        assert_eq!(engine.injected.len(), 2);
    }

    #[test]
    fn when_the_policy_is_always_every_tick_injects() {
        let config = Config {
            update_interval: 4,
            analog: &[AnalogChannelConfig {
                policy: AnalogPolicy::Always,
                ..CUTOFF
            }],
            ..Config::default()
        };
        let mut poller = Poller::new(&config).unwrap();
        let mut hardware = FakeHardware::default();
        let mut engine = RecordingEngine::default();

        tick_many(&mut poller, &mut hardware, &mut engine, 0, 10);
        assert_eq!(engine.injected.len(), 10);
    }

    #[test]
    fn when_an_analog_read_fails_the_tick_injects_nothing_and_keeps_the_value() {
        let cutoff_id = ReceiverId::from_name("cutoff");
        let config = Config {
            alpha: 1.0,
            update_interval: 1,
            analog: &[CUTOFF],
            ..Config::default()
        };
        let mut poller = Poller::new(&config).unwrap();
        let mut hardware = FakeHardware::default();
        let mut engine = RecordingEngine::default();

        hardware.analog[0] = Some(4095);
        poller.tick(0, &mut hardware, &mut engine);
        assert_eq!(engine.injected, [(cutoff_id, 100.0)]);

        hardware.analog[0] = None;
        poller.tick(1, &mut hardware, &mut engine);
        assert_eq!(engine.injected.len(), 1);

        // The channel recovers with the old value intact.
        hardware.analog[0] = Some(4095);
        poller.tick(2, &mut hardware, &mut engine);
        assert_eq!(engine.injected.len(), 1);
    }

    #[test]
    fn when_a_read_fails_under_the_always_policy_that_tick_injects_nothing() {
        let config = Config {
            alpha: 1.0,
            update_interval: 1,
            analog: &[AnalogChannelConfig {
                policy: AnalogPolicy::Always,
                ..CUTOFF
            }],
            ..Config::default()
        };
        let mut poller = Poller::new(&config).unwrap();
        let mut hardware = FakeHardware::default();
        let mut engine = RecordingEngine::default();

        hardware.analog[0] = Some(4095);
        poller.tick(0, &mut hardware, &mut engine);
        assert_eq!(engine.injected.len(), 1);

        hardware.analog[0] = None;
        poller.tick(1, &mut hardware, &mut engine);
        assert_eq!(engine.injected.len(), 1);

        hardware.analog[0] = Some(4095);
        poller.tick(2, &mut hardware, &mut engine);
        assert_eq!(engine.injected.len(), 2);
    }

    #[test]
    fn when_the_scale_is_set_injected_values_are_mapped_through_it() {
        let config = Config {
            alpha: 1.0,
            update_interval: 1,
            analog: &[CUTOFF],
            ..Config::default()
        };
        let mut poller = Poller::new(&config).unwrap();
        let mut hardware = FakeHardware::default();
        let mut engine = RecordingEngine::default();

        hardware.analog[0] = Some(4095);
        poller.tick(0, &mut hardware, &mut engine);

        let (_, value) = engine.injected[0];
        assert_relative_eq!(value, 100.0);
    }

    #[test]
    fn when_more_channels_than_the_table_holds_construction_fails() {
        let analog = [CUTOFF; MAX_ANALOG_CHANNELS + 1];
        let config = Config {
            analog: &analog,
            ..Config::default()
        };
        assert_eq!(
            Poller::new(&config).unwrap_err(),
            ConfigError::TooManyAnalogChannels
        );
    }

    #[test]
    fn when_debounce_width_is_zero_construction_fails() {
        let config = Config {
            debounce_width: 0,
            digital: &[GATE],
            ..Config::default()
        };
        assert_eq!(
            Poller::new(&config).unwrap_err(),
            ConfigError::ZeroDebounceWidth
        );
    }
}
