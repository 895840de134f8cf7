//! Applies backend events to the GUI state.

use client_core::{DisplayPrefs, Session};
use shared::domain::PanelPosition;

use crate::controller::events::{UiError, UiEvent};

pub struct GuiState {
    pub session: Session,
    /// `None` until the worker has read the persisted record.
    pub panel_position: Option<PanelPosition>,
    pub status: Option<UiError>,
    pub info: String,
}

impl GuiState {
    pub fn new(display: DisplayPrefs) -> Self {
        Self {
            session: Session::new(display),
            panel_position: None,
            status: None,
            info: String::new(),
        }
    }
}

pub fn apply_ui_event(state: &mut GuiState, event: UiEvent) {
    match event {
        UiEvent::Info(message) => state.info = message,
        UiEvent::Error(err) => {
            tracing::warn!(context = ?err.context(), "{}", err.message());
            state.status = Some(err);
        }
        UiEvent::LabelsLoaded(outcome) => state.session.apply_labels(outcome),
        UiEvent::ModelsLoaded(outcome) => state.session.apply_models(outcome),
        UiEvent::RecommendationFinished { seq, outcome } => {
            state.session.finish_run(seq, outcome);
        }
        UiEvent::PanelPositionLoaded(position) => {
            if state.panel_position.is_none() {
                state.panel_position = Some(position);
            }
        }
    }
}
