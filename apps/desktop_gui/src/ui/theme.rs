use egui::{Color32, Visuals};

const LIGHT_ACCENT: Color32 = Color32::from_rgb(0x67, 0x50, 0xA4);
const DARK_ACCENT: Color32 = Color32::from_rgb(0xD0, 0xBC, 0xFF);

pub fn visuals_for(dark_mode: bool) -> Visuals {
    let mut visuals = if dark_mode {
        Visuals::dark()
    } else {
        Visuals::light()
    };
    let accent = if dark_mode { DARK_ACCENT } else { LIGHT_ACCENT };
    visuals.selection.bg_fill = accent.gamma_multiply(0.6);
    visuals.hyperlink_color = accent;
    if dark_mode {
        visuals.panel_fill = Color32::from_rgb(0x12, 0x12, 0x12);
        visuals.window_fill = Color32::from_rgb(0x1E, 0x1E, 0x1E);
    } else {
        visuals.panel_fill = Color32::from_rgb(0xF9, 0xF7, 0xFC);
        visuals.window_fill = Color32::WHITE;
    }
    visuals
}

/// Label of the toggle that switches to the other mode.
pub fn toggle_label(dark_mode: bool) -> &'static str {
    if dark_mode {
        "Light Mode"
    } else {
        "Dark Mode"
    }
}
