//! Header, request controls, and the floating results window.

use crossbeam_channel::Sender;
use egui::{Pos2, Ui};
use shared::domain::PanelPosition;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::err_label;
use crate::controller::orchestration::submit_run;
use crate::controller::reducer::GuiState;
use crate::ui::{layout, theme};

pub fn show_header(ui: &mut Ui, state: &mut GuiState) {
    ui.horizontal(|ui| {
        ui.heading("CoreRec");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let mut dark_mode = state.session.display().dark_mode;
            let label = theme::toggle_label(dark_mode);
            if ui.checkbox(&mut dark_mode, label).changed() {
                state.session.toggle_dark_mode();
            }
        });
    });
}

pub fn show_controls(ui: &mut Ui, state: &mut GuiState, cmd_tx: &Sender<BackendCommand>) {
    if let Some(message) = state.session.error_message() {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().error_fg_color.gamma_multiply(0.12))
            .show(ui, |ui| {
                ui.colored_label(ui.visuals().error_fg_color, message);
            });
        ui.add_space(8.0);
    }

    ui.heading("Test_A");
    ui.add_space(4.0);

    let models = state.session.catalog().models.clone();
    let selected_text = state
        .session
        .selected_model()
        .map(|option| option.label.clone())
        .unwrap_or_default();
    egui::ComboBox::from_label("Select model")
        .selected_text(selected_text)
        .width(220.0)
        .show_ui(ui, |ui| {
            if ui
                .selectable_label(state.session.request().model().is_empty(), "(none)")
                .clicked()
            {
                state.session.request_mut().set_model("");
            }
            for option in &models {
                let selected = state.session.request().model() == &option.value;
                if ui.selectable_label(selected, option.label.as_str()).clicked() {
                    state.session.request_mut().set_model(option.value.as_str());
                }
            }
        });

    let labels = state.session.catalog().labels.clone();
    let selected_label = state.session.request().label().to_string();
    egui::ComboBox::from_label("Select node label")
        .selected_text(selected_label.as_str())
        .width(220.0)
        .show_ui(ui, |ui| {
            if ui.selectable_label(selected_label.is_empty(), "(none)").clicked() {
                state.session.request_mut().set_label("");
            }
            for label in &labels {
                if ui.selectable_label(&selected_label == label, label.as_str()).clicked() {
                    state.session.request_mut().set_label(label.as_str());
                }
            }
        });

    ui.add_space(8.0);
    let mut top_k = i64::from(state.session.request().top_k());
    if ui
        .add(egui::Slider::new(&mut top_k, 1..=10).text("Top K"))
        .changed()
    {
        state.session.request_mut().set_top_k(top_k);
    }

    let mut threshold = state.session.request().threshold();
    if ui
        .add(
            egui::Slider::new(&mut threshold, 0.0..=1.0)
                .step_by(0.1)
                .text("Threshold"),
        )
        .changed()
    {
        state.session.request_mut().set_threshold(threshold);
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if ui
            .add_sized([160.0, 32.0], egui::Button::new("Run Model"))
            .clicked()
        {
            submit_run(&mut state.session, cmd_tx, &mut state.status);
        }
        if state.session.status().is_loading() {
            ui.spinner();
        }
    });
}

pub fn show_status_line(ui: &mut Ui, state: &GuiState) {
    ui.horizontal(|ui| {
        if let Some(err) = &state.status {
            ui.colored_label(
                ui.visuals().warn_fg_color,
                format!("{}: {}", err_label(err.category()), err.message()),
            );
        } else {
            ui.weak(state.info.as_str());
        }
    });
}

/// Draws the results window at `origin + position` and returns its current
/// offset from `origin`.
pub fn show_results_window(
    ctx: &egui::Context,
    origin: Pos2,
    position: PanelPosition,
    results: Option<&[String]>,
) -> Option<PanelPosition> {
    let response = egui::Window::new("Recommended nodes:")
        .id(egui::Id::new("results_panel"))
        .default_pos(layout::window_pos(origin, position))
        .default_size(layout::RESULTS_DEFAULT_SIZE)
        .min_size(layout::RESULTS_MIN_SIZE)
        .max_size(layout::RESULTS_MAX_SIZE)
        .collapsible(false)
        .resizable(true)
        .movable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for item in results.unwrap_or_default() {
                        ui.heading(item.as_str());
                    }
                });
        })?;
    Some(layout::panel_offset(origin, response.response.rect.min))
}
