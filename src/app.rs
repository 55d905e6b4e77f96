//! Host page for the embedded wallet dialog.
//!
//! Architecture:
//! - Main thread: runs the egui UI, owns the document and the dialog
//! - Backend thread: runs a Tokio runtime for the handshake timers
//! - Communication via crossbeam channels

use std::thread;
use std::time::Duration;

use chrono::Local;
use crossbeam_channel::{unbounded, Receiver, Sender};
use eframe::egui;

use crate::backend::run_backend;
use crate::config::Settings;
use crate::dialog::EmbeddedModalDialog;
use crate::dom::{Document, NodeId};
use crate::protocol::{BackendAction, GuiEvent};
use crate::status::ConnectionStatus;
use crate::ui::{self, ModalTheme};

const MAX_ACTIVITY_LINES: usize = 200;

pub struct WalletHostApp {
    pub doc: Document,
    pub dialog: EmbeddedModalDialog,
    pub theme: ModalTheme,
    /// Timestamped log of dialog activity shown on the host page
    pub activity: Vec<String>,
    last_status: ConnectionStatus,
    last_open: bool,
    action_tx: Sender<BackendAction>,
}

impl WalletHostApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        // Create channels for UI <-> Backend
        let (action_tx, action_rx) = unbounded::<BackendAction>();
        let (event_tx, event_rx) = unbounded::<GuiEvent>();

        // Spawn the backend thread
        thread::spawn(move || {
            run_backend(action_rx, event_tx);
        });

        let app = Self::with_channels(settings, action_tx, event_rx);
        cc.egui_ctx.set_visuals(app.theme.visuals());
        app
    }

    /// Build the app around existing backend channels, without a window.
    pub fn with_channels(
        settings: Settings,
        action_tx: Sender<BackendAction>,
        event_rx: Receiver<GuiEvent>,
    ) -> Self {
        let mut doc = Document::new();
        let mut dialog = EmbeddedModalDialog::new(
            &settings.title,
            settings.connect_delay(),
            action_tx.clone(),
            event_rx,
        )
        .with_stylesheet(&settings.stylesheet_href);
        dialog.init(&mut doc);

        let mut app = Self {
            doc,
            dialog,
            theme: ModalTheme::from_name(&settings.theme),
            activity: Vec::new(),
            last_status: ConnectionStatus::NotConnected,
            last_open: false,
            action_tx,
        };
        app.log("Wallet dialog ready");
        app
    }

    /// Open the dialog from the host page. Ignored while it is already open,
    /// so a connect in flight is not reset.
    pub fn open_dialog(&mut self) {
        if self.dialog.is_open(&self.doc) {
            return;
        }
        self.dialog.open(&mut self.doc);
        self.record_changes();
    }

    pub fn handle_click(&mut self, node: NodeId) {
        self.dialog.click(&mut self.doc, node);
        self.record_changes();
    }

    /// Apply backend events and log what changed.
    pub fn poll(&mut self) {
        self.dialog.process_events(&mut self.doc);
        self.record_changes();
    }

    fn record_changes(&mut self) {
        let open = self.dialog.is_open(&self.doc);
        if open != self.last_open {
            self.last_open = open;
            self.log(if open { "Dialog opened" } else { "Dialog closed" });
        }
        let status = self.dialog.status();
        if status != self.last_status {
            self.last_status = status;
            self.log(&format!("Status: {}", status.label()));
        }
    }

    fn log(&mut self, line: &str) {
        let ts = Local::now().format("%H:%M:%S").to_string();
        self.activity.push(format!("[{}] {}", ts, line));
        // Keep log from growing too large
        if self.activity.len() > MAX_ACTIVITY_LINES {
            self.activity.remove(0);
        }
    }
}

impl eframe::App for WalletHostApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll();

        // Request repaint to keep checking for events
        ctx.request_repaint_after(Duration::from_millis(100));

        // The host page is inert while the modal covers it.
        let modal_open = self.dialog.is_open(&self.doc);
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Wallet host");
            ui.label(format!("Status: {}", self.dialog.status().label()));
            ui.add_space(8.0);
            let button = ui.add_enabled(!modal_open, egui::Button::new("Connect mobile wallet"));
            if button.clicked() {
                self.open_dialog();
            }
            ui.separator();
            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in &self.activity {
                        ui.label(egui::RichText::new(line).color(self.theme.text_muted).monospace());
                    }
                });
        });

        if let Some(root) = self.dialog.root() {
            if let Some(node) = ui::render_modal(ctx, &self.doc, root, &self.theme) {
                self.handle_click(node);
            }
        }
    }
}

impl Drop for WalletHostApp {
    fn drop(&mut self) {
        let _ = self.action_tx.send(BackendAction::Shutdown);
    }
}
