use futures::StreamExt;
use shared::{
    domain::{CatalogOption, ModelId},
    error::WorkflowError,
};
use tracing::{debug, info, warn};

use crate::{
    backend::RecommendationBackend,
    catalog::{self, Catalog, CatalogUpdate},
    invoker::{self, InvocationStatus, InvocationTicket},
    request::RequestConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayPrefs {
    pub dark_mode: bool,
}

/// Central, single-owner state of one client session.
///
/// Hosts drive it through the mutators below; network work happens outside
/// and reports back through `apply_*` / `finish_run`.
#[derive(Debug, Default)]
pub struct Session {
    catalog: Catalog,
    catalog_requested: bool,
    request: RequestConfig,
    results: Option<Vec<String>>,
    status: InvocationStatus,
    message: Option<WorkflowError>,
    display: DisplayPrefs,
    latest_seq: u64,
}

impl Session {
    pub fn new(display: DisplayPrefs) -> Self {
        Self {
            display,
            ..Self::default()
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn request(&self) -> &RequestConfig {
        &self.request
    }

    pub fn request_mut(&mut self) -> &mut RequestConfig {
        &mut self.request
    }

    /// `None` until an invocation has succeeded.
    pub fn results(&self) -> Option<&[String]> {
        self.results.as_deref()
    }

    pub fn status(&self) -> &InvocationStatus {
        &self.status
    }

    pub fn message(&self) -> Option<&WorkflowError> {
        self.message.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.message.as_ref().map(ToString::to_string)
    }

    pub fn display(&self) -> DisplayPrefs {
        self.display
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.display.dark_mode = !self.display.dark_mode;
        self.display.dark_mode
    }

    /// Resolves a model by its display label and selects its value, or
    /// clears the selection when the label is unknown.
    pub fn select_model_by_label(&mut self, label: &str) -> Option<&CatalogOption> {
        match self.catalog.model_by_label(label) {
            Some(option) => {
                self.request.set_model(option.value.as_str());
                Some(option)
            }
            None => {
                self.request.set_model("");
                None
            }
        }
    }

    pub fn selected_model(&self) -> Option<&CatalogOption> {
        self.catalog.model_by_value(self.request.model())
    }

    /// Marks the catalog as requested. Returns `false` if it already was;
    /// the catalog loads at most once per session.
    pub fn begin_catalog_load(&mut self) -> bool {
        if self.catalog_requested {
            warn!("catalog already requested for this session; ignoring reload");
            return false;
        }
        self.catalog_requested = true;
        true
    }

    pub fn apply_labels(&mut self, outcome: Result<Vec<String>, WorkflowError>) {
        match outcome {
            Ok(labels) => {
                info!(count = labels.len(), "labels loaded");
                self.catalog.labels = labels;
            }
            Err(err) => self.message = Some(err),
        }
    }

    pub fn apply_models(&mut self, outcome: Result<Vec<CatalogOption>, WorkflowError>) {
        match outcome {
            Ok(models) => {
                info!(count = models.len(), "models loaded");
                self.catalog.models = models;
            }
            Err(err) => self.message = Some(err),
        }
    }

    pub fn apply_update(&mut self, update: CatalogUpdate) {
        match update {
            CatalogUpdate::Labels(outcome) => self.apply_labels(outcome),
            CatalogUpdate::Models(outcome) => self.apply_models(outcome),
        }
    }

    /// Fetches labels and models once, applying each as soon as it arrives.
    /// Returns `false` when the catalog was already requested.
    pub async fn load_catalog(&mut self, backend: &dyn RecommendationBackend) -> bool {
        if !self.begin_catalog_load() {
            return false;
        }
        let mut pending = catalog::catalog_updates(backend);
        while let Some(update) = pending.next().await {
            self.apply_update(update);
        }
        true
    }

    /// Validates the selections and, if complete, issues a ticket and moves
    /// to `Loading`. Any attempt supersedes responses still in flight.
    pub fn begin_run(&mut self) -> Result<InvocationTicket, WorkflowError> {
        self.latest_seq += 1;
        let Some(request) = self.request.to_request() else {
            self.fail(WorkflowError::Validation);
            return Err(WorkflowError::Validation);
        };
        self.status = InvocationStatus::Loading;
        debug!(seq = self.latest_seq, model = %request.model, label = %request.label, "invocation started");
        Ok(InvocationTicket {
            seq: self.latest_seq,
            request,
        })
    }

    /// Applies a response. Returns `false` and leaves state untouched when
    /// a newer invocation has been started since `seq` was issued.
    pub fn finish_run(&mut self, seq: u64, outcome: Result<Vec<String>, WorkflowError>) -> bool {
        if seq != self.latest_seq {
            debug!(seq, latest = self.latest_seq, "discarding stale recommendation response");
            return false;
        }
        match outcome {
            Ok(recommendations) => {
                self.results = Some(recommendations);
                self.status = InvocationStatus::Success;
                self.message = None;
            }
            Err(err) => self.fail(err),
        }
        true
    }

    pub async fn run(&mut self, backend: &dyn RecommendationBackend) -> &InvocationStatus {
        if let Ok(ticket) = self.begin_run() {
            let outcome = invoker::invoke(backend, &ticket).await;
            self.finish_run(ticket.seq, outcome);
        }
        &self.status
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn has_model(&self, value: &ModelId) -> bool {
        self.catalog.model_by_value(value).is_some()
    }

    fn fail(&mut self, err: WorkflowError) {
        self.status = InvocationStatus::Failed(err.clone());
        self.message = Some(err);
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
