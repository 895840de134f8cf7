mod backend_bridge;
mod controller;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use client_core::DisplayPrefs;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{DesktopGuiApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(name = "corerec-gui", about = "Desktop client for the CoreRec recommendation service")]
struct Args {
    /// Backend base url; overrides corerec.toml and COREREC_API_URL.
    #[arg(long)]
    api_url: Option<String>,
    /// Directory holding the layout database.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let startup = StartupConfig {
        api_url: args.api_url,
        data_dir: args.data_dir,
    };
    let settings = startup.resolve_settings();
    tracing::info!(api_url = %settings.api_url, database_url = %settings.database_url, "starting CoreRec");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("CoreRec")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([820.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "CoreRec",
        options,
        Box::new(|cc| {
            let dark_mode = matches!(cc.egui_ctx.system_theme(), Some(egui::Theme::Dark));
            Ok(Box::new(DesktopGuiApp::new(
                cmd_tx,
                ui_rx,
                DisplayPrefs { dark_mode },
            )))
        }),
    )
}
