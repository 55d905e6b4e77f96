use std::time::Duration;

/// Actions sent from the UI to the Backend
#[derive(Debug, Clone, PartialEq)]
pub enum BackendAction {
    /// Start the mocked wallet handshake; completes after `delay`
    BeginHandshake { attempt: u64, delay: Duration },
    /// Drop a pending handshake so it never reports completion
    Cancel { attempt: u64 },
    /// Stop the backend loop
    Shutdown,
}

/// Events sent from the Backend to the UI
#[derive(Debug, Clone, PartialEq)]
pub enum GuiEvent {
    /// The handshake for `attempt` finished
    HandshakeComplete { attempt: u64 },
    /// Backend failure
    Error(String),
}
