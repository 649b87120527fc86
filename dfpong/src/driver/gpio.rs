use embedded_hal::digital::OutputPin;

/// The gpio driver is a wrapper for the embedded-hal digital output pin trait.
/// It wraps the low-active and high-active pins, and remembers the level it last drove so that
/// toggling works on pins that cannot be read back.
///
/// Pin errors are dropped. A failed activation leaves the remembered level unchanged, while deactivation always
/// clears it.
pub struct OutputController<P: OutputPin> {
    pin: P,
    low_active: bool,
    active: bool,
}

impl<P: OutputPin> OutputController<P> {
    /// Create a new OutputController instance, the pin is driven inactive immediately
    pub fn new(pin: P, low_active: bool) -> Self {
        let mut controller = Self {
            pin,
            low_active,
            active: false,
        };
        controller.deactivate();
        controller
    }

    /// Activate the GPIO pin
    pub fn activate(&mut self) {
        self.set_active(true);
    }

    /// Deactivate the GPIO pin, the pin counts as inactive afterwards even if the write failed
    pub fn deactivate(&mut self) {
        self.set_active(false);
        self.active = false;
    }

    /// Drive the pin to the given logical state
    pub fn set_active(&mut self, active: bool) {
        let result = if active != self.low_active {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if result.is_ok() {
            self.active = active;
        }
    }

    /// Toggle the GPIO pin state, returns the new logical state
    pub fn toggle(&mut self) -> bool {
        self.set_active(!self.active);
        self.active
    }

    /// Logical state last driven onto the pin
    pub fn is_active(&self) -> bool {
        self.active
    }
}
