use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::clock::interval_elapsed;
use crate::driver::gpio::OutputController;

/// Status LED of the link.
///
/// Blinks while the link is not ready, lit solid once the handshake completed.
pub struct StatusLed<P: OutputPin> {
    pin: OutputController<P>,
    blink_interval_ms: u32,
    last_toggle_ms: u32,
}

impl<P: OutputPin> StatusLed<P> {
    pub fn new(pin: P, low_active: bool, blink_interval_ms: u32) -> Self {
        Self {
            pin: OutputController::new(pin, low_active),
            blink_interval_ms,
            last_toggle_ms: 0,
        }
    }

    /// Refresh the LED for the current link readiness
    pub fn update(&mut self, ready: bool, now_ms: u32) {
        if ready {
            self.pin.activate();
        } else if interval_elapsed(now_ms, self.last_toggle_ms, self.blink_interval_ms) {
            self.last_toggle_ms = now_ms;
            self.pin.toggle();
        }
    }

    /// Light the LED, the next blink toggle is a full interval away
    pub fn on(&mut self, now_ms: u32) {
        self.last_toggle_ms = now_ms;
        self.pin.activate();
    }

    pub fn off(&mut self) {
        self.pin.deactivate();
    }

    pub fn is_lit(&self) -> bool {
        self.pin.is_active()
    }

    /// Blink forever, used once the BLE stack could not be started
    pub fn fatal_blink<D: DelayNs>(&mut self, delay: &mut D, interval_ms: u32) -> ! {
        loop {
            self.pin.activate();
            delay.delay_ms(interval_ms);
            self.pin.deactivate();
            delay.delay_ms(interval_ms);
        }
    }
}
