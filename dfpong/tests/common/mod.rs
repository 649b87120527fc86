#![allow(dead_code)]

pub mod test_macro;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use dfpong::ble::{CharacteristicProps, GapConfig, Radio, RadioEvent};
use dfpong::{BuzzerConfig, Clock, Controller, ControllerConfig, DeviceNumber, LinkConfig, Movement, ServiceIdentity};
use dfpong_types::Uuid;
use embassy_time::Duration;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Address of the simulated central
pub const CENTRAL_ADDRESS: [u8; 6] = [0xc0, 0xff, 0xee, 0x00, 0x00, 0x01];

/// Handshake sentinel on the wire
pub const SENTINEL: u8 = 3;

/// Millisecond clock advanced by hand, clones share the same counter
#[derive(Clone, Default)]
pub struct ManualClock(Rc<Cell<u32>>);

impl ManualClock {
    pub fn new(start_ms: u32) -> Self {
        Self(Rc::new(Cell::new(start_ms)))
    }

    pub fn advance(&self, ms: u32) {
        self.0.set(self.0.get().wrapping_add(ms));
    }

    pub fn now(&self) -> u32 {
        self.0.get()
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

/// Blocking delay that advances a [`ManualClock`] instead of sleeping
pub struct ClockDelay {
    clock: ManualClock,
    /// Every `delay_ms` call, in order
    pub delays: Vec<u32>,
}

impl ClockDelay {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            delays: Vec::new(),
        }
    }
}

impl DelayNs for ClockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.advance(ns / 1_000_000);
    }

    fn delay_us(&mut self, us: u32) {
        self.clock.advance(us / 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
        self.clock.advance(ms);
    }
}

/// Blocking delay that panics once `delay_ms` was called `limit` times, breaks out of loops that never return
pub struct BoundedDelay {
    limit: usize,
    pub delays: Vec<u32>,
}

impl BoundedDelay {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            delays: Vec::new(),
        }
    }
}

impl DelayNs for BoundedDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
        if self.delays.len() >= self.limit {
            panic!("delay limit of {} calls reached", self.limit);
        }
    }
}

/// Output pin recording every level written to it, clones share the record
#[derive(Clone, Default)]
pub struct RecordingPin(Rc<RefCell<Vec<bool>>>);

impl RecordingPin {
    pub fn is_high(&self) -> bool {
        self.0.borrow().last().copied().unwrap_or(false)
    }

    pub fn levels(&self) -> Vec<bool> {
        self.0.borrow().clone()
    }

    /// Number of times the level actually changed
    pub fn transitions(&self) -> usize {
        self.0.borrow().windows(2).filter(|w| w[0] != w[1]).count()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(true);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    NotReady,
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioCall {
    Begin,
    Disconnect,
    StopAdvertising,
    Configure,
    RegisterService,
    WriteValue(u8),
    Advertise,
}

/// Owned copy of the GAP parameters the radio was configured with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapSnapshot {
    pub local_name: String,
    pub advertised_service: Uuid,
    pub manufacturer_data: Vec<u8>,
    pub advertising_interval: Duration,
    pub connection_interval_min: Duration,
    pub connection_interval_max: Duration,
    pub pairable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisteredService {
    pub service: Uuid,
    pub characteristic: Uuid,
    pub props: CharacteristicProps,
}

/// Simulated BLE stack with a single central
pub struct MockRadio {
    clock: ManualClock,
    /// Number of `begin` calls that fail before one succeeds
    pub begin_failures: u8,
    /// Number of `write_value` calls that fail before writes succeed again
    pub write_failures: u32,
    pub calls: Vec<RadioCall>,
    pub gap: Option<GapSnapshot>,
    pub service: Option<RegisteredService>,
    /// Current characteristic value
    pub value: u8,
    /// Notifications delivered to the central as `(time, value)`
    pub notifications: Vec<(u32, u8)>,
    pub advertising: bool,
    connected: bool,
    subscribed: bool,
    pending: VecDeque<RadioEvent>,
}

impl MockRadio {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            begin_failures: 0,
            write_failures: 0,
            calls: Vec::new(),
            gap: None,
            service: None,
            value: 0,
            notifications: Vec::new(),
            advertising: false,
            connected: false,
            subscribed: false,
            pending: VecDeque::new(),
        }
    }

    pub fn with_begin_failures(clock: ManualClock, failures: u8) -> Self {
        Self {
            begin_failures: failures,
            ..Self::new(clock)
        }
    }

    pub fn central_connect(&mut self) {
        self.connected = true;
        self.advertising = false;
        self.pending.push_back(RadioEvent::Connected {
            address: CENTRAL_ADDRESS,
        });
    }

    pub fn central_subscribe(&mut self) {
        self.subscribed = true;
    }

    pub fn central_unsubscribe(&mut self) {
        self.subscribed = false;
    }

    /// Write to the movement characteristic
    pub fn central_write(&mut self, value: u8) {
        let characteristic = self.service.map(|s| s.characteristic).unwrap_or(Uuid::nil());
        self.central_write_to(characteristic, value);
    }

    pub fn central_write_to(&mut self, characteristic: Uuid, value: u8) {
        self.pending.push_back(RadioEvent::Written { characteristic, value });
    }

    pub fn central_disconnect(&mut self) {
        self.connected = false;
        self.subscribed = false;
        self.advertising = true;
        self.pending.push_back(RadioEvent::Disconnected {
            address: CENTRAL_ADDRESS,
        });
    }

    /// Values of all delivered notifications, in order
    pub fn notified_values(&self) -> Vec<u8> {
        self.notifications.iter().map(|(_, v)| *v).collect()
    }

    pub fn count_calls(&self, call: RadioCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

impl Radio for MockRadio {
    type Error = MockError;

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.calls.push(RadioCall::Begin);
        if self.begin_failures > 0 {
            self.begin_failures -= 1;
            return Err(MockError::NotReady);
        }
        Ok(())
    }

    fn disconnect(&mut self) {
        self.calls.push(RadioCall::Disconnect);
        self.connected = false;
        self.subscribed = false;
    }

    fn stop_advertising(&mut self) {
        self.calls.push(RadioCall::StopAdvertising);
        self.advertising = false;
    }

    fn configure(&mut self, gap: &GapConfig<'_>) -> Result<(), Self::Error> {
        self.calls.push(RadioCall::Configure);
        self.gap = Some(GapSnapshot {
            local_name: gap.local_name.to_string(),
            advertised_service: gap.advertised_service,
            manufacturer_data: gap.manufacturer_data.to_vec(),
            advertising_interval: gap.advertising_interval,
            connection_interval_min: gap.connection_interval_min,
            connection_interval_max: gap.connection_interval_max,
            pairable: gap.pairable,
        });
        Ok(())
    }

    fn register_service(&mut self, identity: &ServiceIdentity, props: CharacteristicProps) -> Result<(), Self::Error> {
        self.calls.push(RadioCall::RegisterService);
        self.service = Some(RegisteredService {
            service: identity.service(),
            characteristic: identity.characteristic(),
            props,
        });
        Ok(())
    }

    fn write_value(&mut self, value: u8) -> Result<(), Self::Error> {
        self.calls.push(RadioCall::WriteValue(value));
        if self.write_failures > 0 {
            self.write_failures -= 1;
            return Err(MockError::Busy);
        }
        self.value = value;
        if self.connected && self.subscribed {
            self.notifications.push((self.clock.now_ms(), value));
        }
        Ok(())
    }

    fn advertise(&mut self) -> Result<(), Self::Error> {
        self.calls.push(RadioCall::Advertise);
        self.advertising = true;
        Ok(())
    }

    fn poll<F: FnMut(RadioEvent)>(&mut self, mut on_event: F) {
        while let Some(event) = self.pending.pop_front() {
            on_event(event);
        }
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn is_subscribed(&self) -> bool {
        self.subscribed
    }
}

/// Configuration with the stock timing, independent of the `controller.toml` used for the build
pub fn test_config(device: u8) -> ControllerConfig {
    ControllerConfig {
        device_name: "DFPONG",
        device_number: DeviceNumber::new(device).unwrap(),
        link: LinkConfig {
            min_notification_interval_ms: 20,
            led_blink_interval_ms: 500,
            init_attempts: 3,
            init_retry_delay_ms: 500,
            fatal_blink_interval_ms: 100,
            settle_delay_ms: 100,
            connection_interval_min_ms: 15,
            connection_interval_max_ms: 30,
            advertising_interval_ms: 100,
        },
        buzzer: BuzzerConfig {
            up_toggle_interval_ms: 5,
            down_toggle_interval_ms: 15,
        },
    }
}

pub type TestController = Controller<MockRadio, RecordingPin, RecordingPin, ManualClock>;

/// A started controller wired to simulated peripherals
pub struct TestHarness {
    pub clock: ManualClock,
    pub led: RecordingPin,
    pub buzzer: RecordingPin,
    pub delay: ClockDelay,
    pub controller: TestController,
}

impl TestHarness {
    pub fn new(device: u8) -> Self {
        Self::starting_at(device, 0)
    }

    /// Start with the clock at `start_ms`, the setup delays advance it by 300 ms
    pub fn starting_at(device: u8, start_ms: u32) -> Self {
        let clock = ManualClock::new(start_ms);
        let led = RecordingPin::default();
        let buzzer = RecordingPin::default();
        let mut delay = ClockDelay::new(clock.clone());
        let controller = Controller::setup(
            MockRadio::new(clock.clone()),
            led.clone(),
            buzzer.clone(),
            clock.clone(),
            &mut delay,
            &test_config(device),
        );
        Self {
            clock,
            led,
            buzzer,
            delay,
            controller,
        }
    }

    pub fn radio(&mut self) -> &mut MockRadio {
        self.controller.link_mut().radio_mut()
    }

    pub fn notified_values(&self) -> Vec<u8> {
        self.controller.link().radio().notified_values()
    }

    pub fn notifications(&self) -> Vec<(u32, u8)> {
        self.controller.link().radio().notifications.clone()
    }

    pub fn tick(&mut self, movement: Movement) {
        self.controller.tick(movement);
    }

    /// Advance the clock by 1 ms and tick, `ms` times
    pub fn run_for(&mut self, movement: Movement, ms: u32) {
        for _ in 0..ms {
            self.clock.advance(1);
            self.controller.tick(movement);
        }
    }

    /// Connect, subscribe and let the controller send the sentinel
    pub fn connect_and_subscribe(&mut self) {
        self.radio().central_connect();
        self.radio().central_subscribe();
        self.tick(Movement::None);
    }

    /// Connect, subscribe and acknowledge the sentinel
    pub fn make_ready(&mut self) {
        self.connect_and_subscribe();
        self.radio().central_write(SENTINEL);
        self.tick(Movement::None);
    }
}
