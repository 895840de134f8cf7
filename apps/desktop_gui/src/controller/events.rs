//! Backend-to-UI events and error modeling for the desktop GUI controller.

use shared::{
    domain::{CatalogOption, PanelPosition},
    error::WorkflowError,
};

pub enum UiEvent {
    Info(String),
    Error(UiError),
    LabelsLoaded(Result<Vec<String>, WorkflowError>),
    ModelsLoaded(Result<Vec<CatalogOption>, WorkflowError>),
    RecommendationFinished {
        seq: u64,
        outcome: Result<Vec<String>, WorkflowError>,
    },
    PanelPositionLoaded(PanelPosition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Storage,
    Transport,
    Configuration,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Layout,
    General,
}

/// Failures of the GUI plumbing itself. Workflow failures live in the
/// session's message slot instead.
#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("sqlite")
            || message_lower.contains("database")
            || message_lower.contains("kv entry")
        {
            UiErrorCategory::Storage
        } else if message_lower.contains("url")
            || message_lower.contains("http client")
            || message_lower.contains("data dir")
        {
            UiErrorCategory::Configuration
        } else if message_lower.contains("disconnect")
            || message_lower.contains("queue")
            || message_lower.contains("runtime")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Storage => "Storage",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Configuration => "Configuration",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_storage_and_configuration_failures() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "failed to open sqlite database 'sqlite://x.db'",
        );
        assert_eq!(err.category(), UiErrorCategory::Storage);
        assert_eq!(err.context(), UiErrorContext::BackendStartup);

        let err = UiError::from_message(UiErrorContext::General, "invalid backend url 'nope'");
        assert_eq!(err.category(), UiErrorCategory::Configuration);
    }

    #[test]
    fn classifies_command_processor_disconnect_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::General,
            "Backend command processor disconnected (possible startup/runtime failure)",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err_label(err.category()), "Transport");
    }
}
