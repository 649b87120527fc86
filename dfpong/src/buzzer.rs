//! Square-wave feedback tone for the current movement.
//!
//! The pin toggles every 5 ms while moving up (~100 Hz) and every 15 ms while moving down (~33 Hz), and is held
//! low when there's no movement. The tone is local feedback and does not depend on the link state.
use dfpong_types::Movement;
use embedded_hal::digital::OutputPin;

use crate::clock::{Clock, interval_elapsed};
use crate::config::BuzzerConfig;
use crate::driver::gpio::OutputController;

pub struct Buzzer<P: OutputPin, C: Clock> {
    pin: OutputController<P>,
    clock: C,
    config: BuzzerConfig,
    // Shared by both tones, switching tone does not restart the period
    last_toggle_ms: u32,
}

impl<P: OutputPin, C: Clock> Buzzer<P, C> {
    /// The pin is driven low immediately
    pub fn new(pin: P, clock: C, config: BuzzerConfig) -> Self {
        Self {
            pin: OutputController::new(pin, false),
            clock,
            config,
            last_toggle_ms: 0,
        }
    }

    /// Drive the tone for `movement`, call once per main loop tick
    pub fn update(&mut self, movement: Movement) {
        let interval = match movement {
            Movement::Up => self.config.up_toggle_interval_ms,
            Movement::Down => self.config.down_toggle_interval_ms,
            Movement::None => {
                self.pin.deactivate();
                return;
            }
        };

        let now = self.clock.now_ms();
        if interval_elapsed(now, self.last_toggle_ms, interval) {
            self.last_toggle_ms = now;
            self.pin.toggle();
        }
    }

    /// Whether the pin is currently driven high
    pub fn is_high(&self) -> bool {
        self.pin.is_active()
    }
}
