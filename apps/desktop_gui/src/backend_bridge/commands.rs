//! Backend commands queued from UI to backend worker.

use client_core::InvocationTicket;
use shared::domain::PanelPosition;

pub enum BackendCommand {
    LoadCatalog,
    Recommend { ticket: InvocationTicket },
    LoadPanelPosition,
    SavePanelPosition(PanelPosition),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadCatalog => "load_catalog",
            Self::Recommend { .. } => "recommend",
            Self::LoadPanelPosition => "load_panel_position",
            Self::SavePanelPosition(_) => "save_panel_position",
        }
    }
}
