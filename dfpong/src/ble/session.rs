//! Per-connection bookkeeping: handshake progress and notification pacing.
use dfpong_types::MovementValue;

use crate::clock::interval_elapsed;

/// What has been sent on the current connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NotificationState {
    /// Last value delivered to the central
    pub last_sent: MovementValue,
    /// A value differing from `last_sent` is waiting to be delivered
    pub value_changed: bool,
    /// Time of the last successful notification
    pub last_notification_ms: u32,
}

impl Default for NotificationState {
    fn default() -> Self {
        Self {
            last_sent: MovementValue::None,
            value_changed: false,
            last_notification_ms: 0,
        }
    }
}

/// State of one connection, reset on every connect and disconnect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Session {
    handshake_complete: bool,
    sentinel_sent: bool,
    notification: NotificationState,
}

impl Session {
    /// A central connected.
    ///
    /// `last_sent` starts as the sentinel with a pending change, so the first pass of the sender delivers the
    /// sentinel once the central subscribes.
    pub fn on_connected(&mut self) {
        self.handshake_complete = false;
        self.sentinel_sent = false;
        self.notification.last_sent = MovementValue::Handshake;
        self.notification.value_changed = true;
    }

    /// The central disconnected
    pub fn on_disconnected(&mut self) {
        self.handshake_complete = false;
        self.sentinel_sent = false;
        self.notification.last_sent = MovementValue::None;
        self.notification.value_changed = false;
    }

    /// The host echoed the sentinel. Returns `false` if the handshake was already complete.
    pub fn on_handshake_ack(&mut self) -> bool {
        if self.handshake_complete {
            return false;
        }
        self.handshake_complete = true;
        true
    }

    /// Pick the value to transmit now, if any.
    ///
    /// Before the handshake the requested value is replaced by the sentinel. A value differing from the last
    /// delivered one marks a pending change, and the change is released once `min_interval_ms` passed since
    /// the last delivery.
    pub fn next_transmit(&mut self, requested: MovementValue, now_ms: u32, min_interval_ms: u32) -> Option<MovementValue> {
        let value = if self.handshake_complete {
            requested
        } else {
            MovementValue::Handshake
        };

        if value != self.notification.last_sent {
            self.notification.value_changed = true;
        }

        if self.notification.value_changed
            && interval_elapsed(now_ms, self.notification.last_notification_ms, min_interval_ms)
        {
            Some(value)
        } else {
            None
        }
    }

    /// `value` reached the radio at `now_ms`
    pub fn on_transmitted(&mut self, value: MovementValue, now_ms: u32) {
        if value.is_handshake() {
            self.sentinel_sent = true;
        }
        self.notification.last_sent = value;
        self.notification.value_changed = false;
        self.notification.last_notification_ms = now_ms;
    }

    pub fn handshake_complete(&self) -> bool {
        self.handshake_complete
    }

    pub fn sentinel_sent(&self) -> bool {
        self.sentinel_sent
    }

    pub fn notification(&self) -> &NotificationState {
        &self.notification
    }
}
