use super::*;
use anyhow::anyhow;
use async_trait::async_trait;
use shared::{
    domain::CatalogKind,
    error::{INVOCATION_MESSAGE, VALIDATION_MESSAGE},
    protocol::RecommendRequest,
};
use std::{collections::VecDeque, sync::Arc, time::Duration};
use tokio::sync::Mutex;

struct FakeBackend {
    labels: Option<Vec<String>>,
    labels_hang: bool,
    models: Option<Vec<CatalogOption>>,
    responses: Mutex<VecDeque<Option<Vec<String>>>>,
    requests: Arc<Mutex<Vec<RecommendRequest>>>,
    catalog_calls: Arc<Mutex<u32>>,
}

impl FakeBackend {
    fn with_catalog() -> Self {
        Self {
            labels: Some(vec!["Label1".to_string(), "Label2".to_string()]),
            labels_hang: false,
            models: Some(vec![
                CatalogOption::new("model1", "Model1"),
                CatalogOption::new("model2", "Model2"),
            ]),
            responses: Mutex::new(VecDeque::new()),
            requests: Arc::new(Mutex::new(Vec::new())),
            catalog_calls: Arc::new(Mutex::new(0)),
        }
    }

    fn failing_labels(mut self) -> Self {
        self.labels = None;
        self
    }

    fn hanging_labels(mut self) -> Self {
        self.labels_hang = true;
        self
    }

    fn failing_models(mut self) -> Self {
        self.models = None;
        self
    }

    fn respond_with(self, response: Option<&[&str]>) -> Self {
        self.responses
            .try_lock()
            .expect("uncontended")
            .push_back(response.map(|items| items.iter().map(|s| s.to_string()).collect()));
        self
    }
}

#[async_trait]
impl RecommendationBackend for FakeBackend {
    async fn list_labels(&self) -> anyhow::Result<Vec<String>> {
        *self.catalog_calls.lock().await += 1;
        if self.labels_hang {
            std::future::pending::<()>().await;
        }
        self.labels.clone().ok_or_else(|| anyhow!("labels unavailable"))
    }

    async fn list_models(&self) -> anyhow::Result<Vec<CatalogOption>> {
        *self.catalog_calls.lock().await += 1;
        self.models.clone().ok_or_else(|| anyhow!("models unavailable"))
    }

    async fn recommend(&self, request: &RecommendRequest) -> anyhow::Result<Vec<String>> {
        self.requests.lock().await.push(request.clone());
        self.responses
            .lock()
            .await
            .pop_front()
            .flatten()
            .ok_or_else(|| anyhow!("500 Internal Server Error"))
    }
}

fn nodes(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

async fn loaded_session(backend: &FakeBackend) -> Session {
    let mut session = Session::default();
    assert!(session.load_catalog(backend).await);
    session
}

#[tokio::test]
async fn run_without_selections_never_calls_backend() {
    let backend = FakeBackend::with_catalog();
    let mut session = loaded_session(&backend).await;

    for (model, label) in [("", ""), ("model1", ""), ("", "Label1")] {
        session.request_mut().set_model(model);
        session.request_mut().set_label(label);
        let status = session.run(&backend).await.clone();

        assert_eq!(status, InvocationStatus::Failed(WorkflowError::Validation));
        assert_eq!(session.error_message().as_deref(), Some(VALIDATION_MESSAGE));
    }
    assert!(backend.requests.lock().await.is_empty());
    assert!(session.results().is_none());
}

#[tokio::test]
async fn successful_run_replaces_results_and_clears_message() {
    let backend = FakeBackend::with_catalog().respond_with(Some(&["Node1", "Node2"]));
    let mut session = loaded_session(&backend).await;

    assert_eq!(session.catalog().labels, nodes(&["Label1", "Label2"]));
    assert_eq!(session.catalog().models.len(), 2);

    session.run(&backend).await;
    assert!(session.error_message().is_some());

    session.request_mut().set_model("model1");
    session.request_mut().set_label("Label1");
    let status = session.run(&backend).await.clone();

    assert_eq!(status, InvocationStatus::Success);
    assert_eq!(session.results(), Some(nodes(&["Node1", "Node2"]).as_slice()));
    assert!(session.error_message().is_none());

    let requests = backend.requests.lock().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].model.as_str(), "model1");
    assert_eq!(requests[0].label, "Label1");
    assert_eq!(requests[0].top_k, 2);
    assert_eq!(requests[0].threshold, 0.5);
}

#[tokio::test]
async fn failed_run_keeps_previous_results_visible() {
    let backend = FakeBackend::with_catalog()
        .respond_with(Some(&["Node1", "Node2"]))
        .respond_with(None);
    let mut session = loaded_session(&backend).await;
    session.request_mut().set_model("model1");
    session.request_mut().set_label("Label1");

    session.run(&backend).await;
    let status = session.run(&backend).await.clone();

    assert_eq!(status, InvocationStatus::Failed(WorkflowError::Invocation));
    assert_eq!(session.error_message().as_deref(), Some(INVOCATION_MESSAGE));
    assert_eq!(session.results(), Some(nodes(&["Node1", "Node2"]).as_slice()));
}

#[tokio::test]
async fn empty_result_is_distinct_from_not_run() {
    let backend = FakeBackend::with_catalog().respond_with(Some(&[]));
    let mut session = loaded_session(&backend).await;
    assert!(session.results().is_none());

    session.request_mut().set_model("model2");
    session.request_mut().set_label("Label2");
    session.run(&backend).await;

    assert_eq!(session.results(), Some(&[][..]));
    assert_eq!(session.status(), &InvocationStatus::Success);
}

#[tokio::test]
async fn labels_failure_does_not_block_models() {
    let backend = FakeBackend::with_catalog().failing_labels();
    let session = loaded_session(&backend).await;

    assert!(session.catalog().labels.is_empty());
    assert_eq!(session.catalog().models.len(), 2);
    assert_eq!(
        session.message(),
        Some(&WorkflowError::CatalogLoad(CatalogKind::Labels))
    );
    assert_eq!(
        session.error_message().as_deref(),
        Some("Error fetching labels. Please try again.")
    );
    assert_eq!(session.status(), &InvocationStatus::Idle);
}

#[tokio::test]
async fn models_failure_keeps_labels() {
    let backend = FakeBackend::with_catalog().failing_models();
    let session = loaded_session(&backend).await;

    assert_eq!(session.catalog().labels, nodes(&["Label1", "Label2"]));
    assert!(session.catalog().models.is_empty());
    assert_eq!(
        session.error_message().as_deref(),
        Some("Error fetching models. Please try again.")
    );
}

#[tokio::test]
async fn models_apply_while_labels_still_pending() {
    let backend = FakeBackend::with_catalog().hanging_labels();
    let mut session = Session::default();

    let outcome =
        tokio::time::timeout(Duration::from_millis(300), session.load_catalog(&backend)).await;
    assert!(outcome.is_err(), "labels never resolve");

    assert_eq!(session.catalog().models.len(), 2);
    assert!(session.catalog().labels.is_empty());
    assert!(session.error_message().is_none());
}

#[tokio::test]
async fn catalog_loads_once_per_session() {
    let backend = FakeBackend::with_catalog();
    let mut session = loaded_session(&backend).await;
    assert_eq!(*backend.catalog_calls.lock().await, 2);

    assert!(!session.load_catalog(&backend).await);
    assert_eq!(*backend.catalog_calls.lock().await, 2);
}

#[test]
fn stale_response_is_discarded_when_newer_run_started() {
    let mut session = Session::default();
    session.request_mut().set_model("model1");
    session.request_mut().set_label("Label1");

    let first = session.begin_run().expect("first ticket");
    let second = session.begin_run().expect("second ticket");
    assert!(second.seq > first.seq);
    assert!(session.status().is_loading());

    assert!(session.finish_run(second.seq, Ok(nodes(&["Fresh"]))));
    assert!(!session.finish_run(first.seq, Err(WorkflowError::Invocation)));

    assert_eq!(session.results(), Some(nodes(&["Fresh"]).as_slice()));
    assert_eq!(session.status(), &InvocationStatus::Success);
    assert!(session.error_message().is_none());
}

#[test]
fn validation_failure_supersedes_in_flight_run() {
    let mut session = Session::default();
    session.request_mut().set_model("model1");
    session.request_mut().set_label("Label1");
    let in_flight = session.begin_run().expect("ticket");

    session.request_mut().set_label("");
    assert_eq!(session.begin_run(), Err(WorkflowError::Validation));
    assert!(!session.finish_run(in_flight.seq, Ok(nodes(&["Late"]))));

    assert!(session.results().is_none());
    assert_eq!(session.error_message().as_deref(), Some(VALIDATION_MESSAGE));
}

#[test]
fn new_error_overwrites_previous_message() {
    let mut session = Session::default();
    session.apply_labels(Err(WorkflowError::CatalogLoad(CatalogKind::Labels)));
    session.apply_models(Err(WorkflowError::CatalogLoad(CatalogKind::Models)));
    assert_eq!(
        session.error_message().as_deref(),
        Some("Error fetching models. Please try again.")
    );

    assert!(session.begin_run().is_err());
    assert_eq!(session.error_message().as_deref(), Some(VALIDATION_MESSAGE));
}

#[test]
fn toggling_dark_mode_twice_restores_state() {
    let mut session = Session::new(DisplayPrefs { dark_mode: false });
    session.request_mut().set_top_k(4);
    let before_request = session.request().clone();

    assert!(session.toggle_dark_mode());
    assert!(!session.toggle_dark_mode());

    assert_eq!(session.display(), DisplayPrefs { dark_mode: false });
    assert_eq!(session.request(), &before_request);
    assert_eq!(session.status(), &InvocationStatus::Idle);
    assert!(session.error_message().is_none());
}

#[test]
fn selecting_model_by_label_stores_its_value() {
    let mut session = Session::default();
    session.apply_models(Ok(vec![
        CatalogOption::new("model1", "Model1"),
        CatalogOption::new("model2", "Model2"),
    ]));

    let selected = session.select_model_by_label("Model2").cloned();
    assert_eq!(selected, Some(CatalogOption::new("model2", "Model2")));
    assert_eq!(session.request().model().as_str(), "model2");
    assert_eq!(session.selected_model().map(|o| o.label.as_str()), Some("Model2"));

    assert!(session.select_model_by_label("Unknown").is_none());
    assert!(session.request().model().is_empty());
}
