use std::{path::PathBuf, time::Duration};

use client_core::{settings, ClientSettings, DisplayPrefs};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{apply_ui_event, GuiState};
use crate::ui::{layout::PanelDragTracker, panels, theme};

#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub api_url: Option<String>,
    pub data_dir: Option<PathBuf>,
}

impl StartupConfig {
    /// Settings from file and environment, with command-line overrides. The
    /// layout database defaults to the per-user data directory.
    pub fn resolve_settings(&self) -> ClientSettings {
        let mut resolved = settings::load_settings().with_overrides(self.api_url.clone(), None);
        let uses_default_db = resolved.database_url == storage::DEFAULT_DATABASE_URL;
        if self.data_dir.is_some() || uses_default_db {
            match AppPaths::from_startup(self) {
                Ok(paths) => resolved.database_url = paths.database_url(),
                Err(err) => tracing::warn!("keeping configured layout database: {err:#}"),
            }
        }
        resolved
    }
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_root: PathBuf,
    pub db_path: PathBuf,
}

impl AppPaths {
    pub fn from_startup(startup: &StartupConfig) -> anyhow::Result<Self> {
        let root = if let Some(p) = &startup.data_dir {
            p.clone()
        } else {
            let base = dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("unable to resolve local app data dir"))?;
            base.join("corerec")
        };

        Ok(Self {
            db_path: root.join("layout.sqlite3"),
            data_root: root,
        })
    }

    pub fn database_url(&self) -> String {
        format!(
            "sqlite://{}",
            self.db_path.to_string_lossy().replace('\\', "/")
        )
    }
}

pub struct DesktopGuiApp {
    state: GuiState,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    drag: Option<PanelDragTracker>,
    applied_dark_mode: Option<bool>,
}

impl DesktopGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        display: DisplayPrefs,
    ) -> Self {
        let mut state = GuiState::new(display);
        if state.session.begin_catalog_load() {
            dispatch_backend_command(&cmd_tx, BackendCommand::LoadCatalog, &mut state.status);
        }
        dispatch_backend_command(&cmd_tx, BackendCommand::LoadPanelPosition, &mut state.status);

        Self {
            state,
            cmd_tx,
            ui_rx,
            drag: None,
            applied_dark_mode: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.state, event);
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        let dark_mode = self.state.session.display().dark_mode;
        if self.applied_dark_mode == Some(dark_mode) {
            return;
        }
        ctx.set_visuals(theme::visuals_for(dark_mode));
        self.applied_dark_mode = Some(dark_mode);
    }

    fn show_results(&mut self, ctx: &egui::Context, origin: egui::Pos2) {
        let Some(position) = self.state.panel_position else {
            return;
        };
        let tracker = self
            .drag
            .get_or_insert_with(|| PanelDragTracker::new(position));

        let Some(offset) =
            panels::show_results_window(ctx, origin, position, self.state.session.results())
        else {
            return;
        };

        let pointer_down = ctx.input(|i| i.pointer.primary_down());
        if let Some(stopped_at) = tracker.observe(offset, pointer_down) {
            tracing::debug!(x = stopped_at.x, y = stopped_at.y, "results panel drag stopped");
            self.state.panel_position = Some(stopped_at);
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::SavePanelPosition(stopped_at),
                &mut self.state.status,
            );
        }
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            panels::show_header(ui, &mut self.state);
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("status_line").show(ctx, |ui| {
            panels::show_status_line(ui, &self.state);
        });

        egui::SidePanel::left("request_controls")
            .resizable(false)
            .exact_width(360.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                panels::show_controls(ui, &mut self.state, &self.cmd_tx);
            });

        let origin = egui::CentralPanel::default()
            .show(ctx, |ui| ui.max_rect().min)
            .inner;

        self.show_results(ctx, origin);

        if self.state.session.status().is_loading() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_paths_use_explicit_data_dir() {
        let startup = StartupConfig {
            api_url: None,
            data_dir: Some(PathBuf::from("/tmp/corerec-profile")),
        };
        let paths = AppPaths::from_startup(&startup).expect("paths");
        assert_eq!(paths.data_root, PathBuf::from("/tmp/corerec-profile"));
        assert_eq!(
            paths.database_url(),
            "sqlite:///tmp/corerec-profile/layout.sqlite3"
        );
    }

    #[test]
    fn startup_queues_catalog_and_layout_loads_once() {
        let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(8);
        let (_ui_tx, ui_rx) = crossbeam_channel::bounded(8);
        let _app = DesktopGuiApp::new(cmd_tx, ui_rx, DisplayPrefs::default());

        let queued: Vec<&'static str> = cmd_rx.try_iter().map(|cmd| cmd.name()).collect();
        assert_eq!(queued, vec!["load_catalog", "load_panel_position"]);
    }
}
