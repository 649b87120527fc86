/// Observable state of the wireless link.
///
/// The state is derived from the radio status and the handshake progress every time it's read, it's never
/// stored on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// The wireless stack has not been started yet
    Init,
    /// Service registered, waiting for a central
    Advertising,
    /// A central is connected but has not enabled notifications
    ConnectedUnsubscribed,
    /// Notifications are enabled, the handshake sentinel has not been delivered yet
    ConnectedSubscribed,
    /// The handshake sentinel was delivered, waiting for the host to echo it back
    Handshaking,
    /// Handshake completed, movement values are streamed
    Ready,
}

impl LinkState {
    /// Whether movement values reach the host in this state
    pub fn is_ready(self) -> bool {
        self == LinkState::Ready
    }

    /// Whether a central is connected in this state
    pub fn is_connected(self) -> bool {
        matches!(
            self,
            LinkState::ConnectedUnsubscribed | LinkState::ConnectedSubscribed | LinkState::Handshaking | LinkState::Ready
        )
    }
}
