//! Main loop of the controller.
//!
//! Every tick samples the movement input once and hands the same value to the link and the buzzer, in this
//! order:
//!
//! 1. run the radio event pump and refresh the status LED
//! 2. offer the movement to the central
//! 3. drive the buzzer
//!
//! # Usage
//!
//! ```rust,ignore
//! let config = ControllerConfig::default();
//! let controller = Controller::setup(radio, led_pin, buzzer_pin, EmbassyClock, &mut Delay, &config);
//! dfpong::run(controller, || read_paddle()).await
//! ```

use dfpong_types::Movement;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::ble::{LinkController, Radio};
use crate::buzzer::Buzzer;
use crate::clock::Clock;
use crate::config::ControllerConfig;
use crate::state::LinkState;

/// Source of the movement intent, e.g. two buttons or a joystick axis
pub trait MovementInput {
    /// Sample the input once
    fn sample(&mut self) -> Movement;
}

impl<F: FnMut() -> Movement> MovementInput for F {
    fn sample(&mut self) -> Movement {
        self()
    }
}

/// The link and the buzzer, driven together once per tick
pub struct Controller<R: Radio, L: OutputPin, B: OutputPin, C: Clock> {
    link: LinkController<R, L, C>,
    buzzer: Buzzer<B, C>,
}

impl<R: Radio, L: OutputPin, B: OutputPin, C: Clock + Clone> Controller<R, L, B, C> {
    /// Start the link and the buzzer.
    ///
    /// Never returns if the BLE stack cannot be started, see [`LinkController::setup`].
    pub fn setup<D: DelayNs>(
        radio: R,
        led_pin: L,
        buzzer_pin: B,
        clock: C,
        delay: &mut D,
        config: &ControllerConfig,
    ) -> Self {
        let link = LinkController::setup(
            radio,
            led_pin,
            clock.clone(),
            delay,
            config.device_name,
            config.device_number,
            config.link,
        );
        let buzzer = Buzzer::new(buzzer_pin, clock, config.buzzer);
        Self::new(link, buzzer)
    }
}

impl<R: Radio, L: OutputPin, B: OutputPin, C: Clock> Controller<R, L, B, C> {
    pub fn new(link: LinkController<R, L, C>, buzzer: Buzzer<B, C>) -> Self {
        Self { link, buzzer }
    }

    /// Run one iteration of the main loop with an already sampled movement
    pub fn tick(&mut self, movement: Movement) {
        self.link.update();
        self.link.send_movement(movement);
        self.buzzer.update(movement);
    }

    pub fn state(&self) -> LinkState {
        self.link.state()
    }

    pub fn link(&self) -> &LinkController<R, L, C> {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut LinkController<R, L, C> {
        &mut self.link
    }

    pub fn buzzer(&self) -> &Buzzer<B, C> {
        &self.buzzer
    }
}

/// Run the controller forever.
///
/// The loop yields to the executor after every tick, other tasks keep running while no sleep is involved.
pub async fn run<R, L, B, C, I>(mut controller: Controller<R, L, B, C>, mut input: I) -> !
where
    R: Radio,
    L: OutputPin,
    B: OutputPin,
    C: Clock,
    I: MovementInput,
{
    info!("Controller main loop started");
    loop {
        let movement = input.sample();
        controller.tick(movement);
        embassy_futures::yield_now().await;
    }
}
