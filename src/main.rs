//! Mobile wallet connect dialog, hosted in an egui window.

use eframe::egui;
use tracing_subscriber::EnvFilter;

use mwa_embedded_modal::app::WalletHostApp;
use mwa_embedded_modal::config::load_or_init_settings;

fn main() -> eframe::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = load_or_init_settings();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 520.0])
            .with_min_inner_size([420.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Mobile Wallet Adapter",
        options,
        Box::new(|cc| Ok(Box::new(WalletHostApp::new(cc, settings)))),
    )
}
