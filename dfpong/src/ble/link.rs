use dfpong_types::protocol::MANUFACTURER_DATA;
use dfpong_types::{DeviceNumber, Movement, MovementValue, ServiceIdentity, generate_identity};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use super::led::StatusLed;
use super::session::Session;
use super::{CharacteristicProps, GapConfig, LinkError, Radio, RadioEvent};
use crate::clock::Clock;
use crate::config::LinkConfig;
use crate::state::LinkState;

/// Owns the radio and the status LED, runs the handshake and paces the notifications.
pub struct LinkController<R: Radio, P: OutputPin, C: Clock> {
    radio: R,
    led: StatusLed<P>,
    clock: C,
    config: LinkConfig,
    device_name: &'static str,
    identity: ServiceIdentity,
    started: bool,
    session: Session,
    // Last state written to the log
    reported_state: LinkState,
}

impl<R: Radio, P: OutputPin, C: Clock> LinkController<R, P, C> {
    /// Create the link controller, the service identity is derived from `device_number` here.
    ///
    /// Nothing is sent to the radio until [`LinkController::start`] is called.
    pub fn new(
        radio: R,
        led_pin: P,
        clock: C,
        device_name: &'static str,
        device_number: DeviceNumber,
        config: LinkConfig,
    ) -> Self {
        Self {
            radio,
            led: StatusLed::new(led_pin, false, config.led_blink_interval_ms),
            clock,
            config,
            device_name,
            identity: generate_identity(device_number),
            started: false,
            session: Session::default(),
            reported_state: LinkState::Init,
        }
    }

    /// Create and start the link controller.
    ///
    /// If the BLE stack cannot be started, the status LED blinks fast forever and this never returns.
    pub fn setup<D: DelayNs>(
        radio: R,
        led_pin: P,
        clock: C,
        delay: &mut D,
        device_name: &'static str,
        device_number: DeviceNumber,
        config: LinkConfig,
    ) -> Self {
        let mut link = Self::new(radio, led_pin, clock, device_name, device_number, config);
        if let Err(e) = link.start(delay) {
            error!("BLE setup failed: {:?}, halting", e);
            let interval = link.config.fatal_blink_interval_ms;
            link.led.fatal_blink(delay, interval);
        }
        link
    }

    /// Bring up the BLE stack, register the movement service and start advertising
    pub fn start<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), LinkError> {
        info!(
            "Device {}: service {}, characteristic {}",
            self.identity.device().get(),
            self.identity.service_str(),
            self.identity.characteristic_str()
        );

        self.begin_radio(delay)?;

        // Clear whatever survived a warm reset
        self.radio.disconnect();
        delay.delay_ms(self.config.settle_delay_ms);
        self.radio.stop_advertising();
        delay.delay_ms(self.config.settle_delay_ms);

        let gap = GapConfig {
            local_name: self.device_name,
            advertised_service: self.identity.service(),
            manufacturer_data: &MANUFACTURER_DATA,
            advertising_interval: self.config.advertising_interval(),
            connection_interval_min: self.config.connection_interval_min(),
            connection_interval_max: self.config.connection_interval_max(),
            pairable: false,
        };
        self.radio.configure(&gap).map_err(|e| {
            #[cfg(feature = "defmt")]
            let e = defmt::Debug2Format(&e);
            error!("Failed to configure GAP: {:?}", e);
            LinkError::Configure
        })?;

        self.radio
            .register_service(&self.identity, CharacteristicProps::MOVEMENT)
            .map_err(|e| {
                #[cfg(feature = "defmt")]
                let e = defmt::Debug2Format(&e);
                error!("Failed to register movement service: {:?}", e);
                LinkError::RegisterService
            })?;

        if let Err(e) = self.radio.write_value(MovementValue::None.as_byte()) {
            #[cfg(feature = "defmt")]
            let e = defmt::Debug2Format(&e);
            warn!("Failed to write initial movement value: {:?}", e);
        }
        delay.delay_ms(self.config.settle_delay_ms);
        self.started = true;

        self.radio.advertise().map_err(|e| {
            #[cfg(feature = "defmt")]
            let e = defmt::Debug2Format(&e);
            error!("Failed to start advertising: {:?}", e);
            LinkError::Advertise
        })?;
        self.led.off();

        info!("BLE advertising as {}", self.device_name);
        Ok(())
    }

    fn begin_radio<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), LinkError> {
        let attempts = self.config.init_attempts;
        for attempt in 1..=attempts {
            match self.radio.begin() {
                Ok(()) => {
                    debug!("BLE stack started on attempt {}", attempt);
                    return Ok(());
                }
                Err(e) => {
                    #[cfg(feature = "defmt")]
                    let e = defmt::Debug2Format(&e);
                    warn!("BLE stack start attempt {}/{} failed: {:?}", attempt, attempts, e);
                }
            }
            delay.delay_ms(self.config.init_retry_delay_ms);
        }
        Err(LinkError::RadioInit { attempts })
    }

    /// Run the radio event pump once, then refresh the status LED
    pub fn update(&mut self) {
        let now = self.clock.now_ms();
        let Self {
            radio,
            led,
            identity,
            session,
            ..
        } = self;
        radio.poll(|event| handle_event(event, now, identity, session, led));

        let state = self.state();
        if state != self.reported_state {
            info!("Link state: {:?} -> {:?}", self.reported_state, state);
            self.reported_state = state;
        }

        self.led.update(state.is_ready(), now);
    }

    /// Offer the current movement to the central.
    ///
    /// Does nothing unless a central is connected and subscribed. Before the handshake the sentinel is sent in
    /// place of the movement. A failed write leaves the change pending, it's retried on the next call.
    pub fn send_movement(&mut self, movement: Movement) {
        if !self.radio.is_connected() || !self.radio.is_subscribed() {
            return;
        }

        let now = self.clock.now_ms();
        let Some(value) = self
            .session
            .next_transmit(movement.into(), now, self.config.min_notification_interval_ms)
        else {
            return;
        };

        match self.radio.write_value(value.as_byte()) {
            Ok(()) => {
                if value.is_handshake() && !self.session.sentinel_sent() {
                    info!("Handshake sentinel sent, waiting for the host");
                }
                self.session.on_transmitted(value, now);
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                let e = defmt::Debug2Format(&e);
                debug!("Notification of {:?} failed, retrying: {:?}", value, e);
            }
        }
    }

    /// Whether movement values reach the host
    pub fn ready(&self) -> bool {
        self.state().is_ready()
    }

    pub fn state(&self) -> LinkState {
        if !self.started {
            LinkState::Init
        } else if !self.radio.is_connected() {
            LinkState::Advertising
        } else if !self.radio.is_subscribed() {
            LinkState::ConnectedUnsubscribed
        } else if self.session.handshake_complete() {
            LinkState::Ready
        } else if self.session.sentinel_sent() {
            LinkState::Handshaking
        } else {
            LinkState::ConnectedSubscribed
        }
    }

    pub fn identity(&self) -> &ServiceIdentity {
        &self.identity
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn led(&self) -> &StatusLed<P> {
        &self.led
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }
}

fn handle_event<P: OutputPin>(
    event: RadioEvent,
    now_ms: u32,
    identity: &ServiceIdentity,
    session: &mut Session,
    led: &mut StatusLed<P>,
) {
    match event {
        RadioEvent::Connected { address } => {
            info!("Connected to central {:?}", address);
            led.on(now_ms);
            session.on_connected();
        }
        RadioEvent::Disconnected { address } => {
            info!("Disconnected from central {:?}", address);
            session.on_disconnected();
        }
        RadioEvent::Written { characteristic, value } => {
            if characteristic != identity.characteristic() {
                debug!("Ignoring write to unknown characteristic");
                return;
            }
            match MovementValue::try_from(value) {
                Ok(MovementValue::Handshake) => {
                    if session.on_handshake_ack() {
                        info!("Handshake complete");
                    } else {
                        debug!("Repeated handshake acknowledgment ignored");
                    }
                }
                Ok(other) => debug!("Ignoring host write of {:?}", other),
                Err(code) => warn!("Ignoring unknown host write {}", code),
            }
        }
    }
}
