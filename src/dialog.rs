//! Embedded "connect your mobile wallet" dialog.
//!
//! The controller owns its subtree of the [`Document`] and keeps the
//! connection status as an explicit field. The status panels in the document
//! are only a projection of that field.

use std::collections::HashMap;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};

use crate::dom::{Display, Document, NodeId};
use crate::markup::{
    self, CANCEL_BUTTON_ID, CLOSE_BUTTON_ID, CONNECT_BUTTON_ID, DEFAULT_STYLESHEET_HREF,
};
use crate::protocol::{BackendAction, GuiEvent};
use crate::status::{ConnectionStatus, ParseStatusError};

/// Delay of the mocked handshake when none is configured.
pub const DEFAULT_CONNECT_DELAY: Duration = Duration::from_millis(5000);

/// What a control inside the dialog does when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogControl {
    Close,
    Cancel,
    Connect,
}

pub struct EmbeddedModalDialog {
    title: String,
    stylesheet_href: String,
    connect_delay: Duration,
    root: Option<NodeId>,
    status: ConnectionStatus,
    listeners: HashMap<NodeId, DialogControl>,
    next_attempt: u64,
    pending_attempt: Option<u64>,

    // Channels for backend communication
    action_tx: Sender<BackendAction>,
    event_rx: Receiver<GuiEvent>,
}

impl EmbeddedModalDialog {
    pub fn new(
        title: &str,
        connect_delay: Duration,
        action_tx: Sender<BackendAction>,
        event_rx: Receiver<GuiEvent>,
    ) -> Self {
        Self {
            title: title.to_string(),
            stylesheet_href: DEFAULT_STYLESHEET_HREF.to_string(),
            connect_delay,
            root: None,
            status: ConnectionStatus::NotConnected,
            listeners: HashMap::new(),
            next_attempt: 0,
            pending_attempt: None,
            action_tx,
            event_rx,
        }
    }

    /// Use a different stylesheet location. Only affects a later `init`.
    pub fn with_stylesheet(mut self, href: &str) -> Self {
        self.stylesheet_href = href.to_string();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn is_initialized(&self) -> bool {
        self.root.is_some()
    }

    pub fn pending_attempt(&self) -> Option<u64> {
        self.pending_attempt
    }

    /// The root, if `init` ran against `doc`. Any other document is treated
    /// as one the dialog was never injected into.
    fn root_in(&self, doc: &Document) -> Option<NodeId> {
        let root = self.root?;
        if doc.contains(root) {
            Some(root)
        } else {
            tracing::debug!("document does not hold the dialog root, ignoring");
            None
        }
    }

    /// Whether the dialog root is currently shown.
    pub fn is_open(&self, doc: &Document) -> bool {
        self.root.is_some_and(|root| doc.is_displayed(root))
    }

    /// Inject the stylesheet and markup into `doc` and wire the controls.
    ///
    /// Runs once; later calls leave the document untouched.
    pub fn init(&mut self, doc: &mut Document) {
        if self.root.is_some() {
            tracing::debug!("embedded modal already injected, skipping init");
            return;
        }
        tracing::info!(title = %self.title, "injecting embedded wallet modal");

        let link = markup::build_stylesheet_link(doc, &self.stylesheet_href);
        let head = doc.head();
        doc.append_child(head, link);

        let root = markup::build_dialog(doc, &self.title);
        doc.set_display(root, Display::None);
        let body = doc.body();
        doc.append_child(body, root);
        self.root = Some(root);

        self.attach_event_listeners(doc, root);
        self.project_status(doc, root);
    }

    fn attach_event_listeners(&mut self, doc: &Document, root: NodeId) {
        let controls = [
            (CLOSE_BUTTON_ID, DialogControl::Close),
            (CANCEL_BUTTON_ID, DialogControl::Cancel),
            (CONNECT_BUTTON_ID, DialogControl::Connect),
        ];
        for (id, control) in controls {
            match doc.query_id(root, id) {
                Some(node) => {
                    self.listeners.insert(node, control);
                }
                None => tracing::debug!(id, "control not found, no listener attached"),
            }
        }
    }

    /// The control wired to `node`, if any.
    pub fn control_for(&self, node: NodeId) -> Option<DialogControl> {
        self.listeners.get(&node).copied()
    }

    /// Show the panel for `status` and hide the others. No-op before `init`.
    pub fn set_connection_status(&mut self, doc: &mut Document, status: ConnectionStatus) {
        let Some(root) = self.root_in(doc) else {
            return;
        };
        if self.status != status {
            tracing::debug!(from = %self.status, to = %status, "connection status changed");
        }
        self.status = status;
        self.project_status(doc, root);
    }

    /// Like [`set_connection_status`](Self::set_connection_status) for
    /// untyped input. Unknown names change nothing.
    pub fn set_connection_status_str(
        &mut self,
        doc: &mut Document,
        status: &str,
    ) -> Result<(), ParseStatusError> {
        let status = status.parse::<ConnectionStatus>().map_err(|e| {
            tracing::warn!("{}", e);
            e
        })?;
        self.set_connection_status(doc, status);
        Ok(())
    }

    fn project_status(&self, doc: &mut Document, root: NodeId) {
        for status in ConnectionStatus::ALL {
            if let Some(panel) = doc.query_id(root, status.panel_id()) {
                let display = if status == self.status {
                    Display::Flex
                } else {
                    Display::None
                };
                doc.set_display(panel, display);
            }
        }
    }

    /// Show the dialog with a fresh "not connected" status.
    pub fn open(&mut self, doc: &mut Document) {
        let Some(root) = self.root_in(doc) else {
            return;
        };
        self.cancel_pending();
        doc.set_display(root, Display::Flex);
        self.set_connection_status(doc, ConnectionStatus::NotConnected);
    }

    /// Hide the dialog and reset the status. A pending handshake is dropped.
    pub fn close(&mut self, doc: &mut Document) {
        let Some(root) = self.root_in(doc) else {
            return;
        };
        self.cancel_pending();
        doc.set_display(root, Display::None);
        self.set_connection_status(doc, ConnectionStatus::NotConnected);
    }

    /// Deliver a click on `node`. Nodes without a listener are ignored.
    pub fn click(&mut self, doc: &mut Document, node: NodeId) {
        if self.root_in(doc).is_none() {
            return;
        }
        match self.control_for(node) {
            Some(DialogControl::Close) | Some(DialogControl::Cancel) => self.close(doc),
            Some(DialogControl::Connect) => self.connect(doc),
            None => {}
        }
    }

    fn connect(&mut self, doc: &mut Document) {
        tracing::info!("connecting to mobile wallet");
        self.cancel_pending();
        self.set_connection_status(doc, ConnectionStatus::Connecting);

        self.next_attempt += 1;
        let attempt = self.next_attempt;
        let action = BackendAction::BeginHandshake {
            attempt,
            delay: self.connect_delay,
        };
        if self.action_tx.send(action).is_err() {
            tracing::warn!("handshake backend is gone, resetting status");
            self.set_connection_status(doc, ConnectionStatus::NotConnected);
            return;
        }
        self.pending_attempt = Some(attempt);
    }

    fn cancel_pending(&mut self) {
        if let Some(attempt) = self.pending_attempt.take() {
            tracing::debug!(attempt, "cancelling pending handshake");
            let _ = self.action_tx.send(BackendAction::Cancel { attempt });
        }
    }

    /// Apply all pending backend events.
    pub fn process_events(&mut self, doc: &mut Document) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                GuiEvent::HandshakeComplete { attempt } => {
                    if self.pending_attempt != Some(attempt) {
                        tracing::debug!(attempt, "ignoring stale handshake completion");
                        continue;
                    }
                    self.pending_attempt = None;
                    self.set_connection_status(doc, ConnectionStatus::Connected);
                    tracing::info!(attempt, "mobile wallet connected");
                }
                GuiEvent::Error(msg) => {
                    tracing::warn!(error = %msg, "handshake backend error");
                }
            }
        }
    }
}
