use futures::{future::BoxFuture, stream::FuturesUnordered, FutureExt};
use shared::{
    domain::{CatalogKind, CatalogOption, ModelId},
    error::WorkflowError,
};
use tracing::{debug, warn};

use crate::backend::RecommendationBackend;

/// Option sets offered for selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub models: Vec<CatalogOption>,
    pub labels: Vec<String>,
}

impl Catalog {
    pub fn model_by_label(&self, label: &str) -> Option<&CatalogOption> {
        self.models.iter().find(|option| option.label == label)
    }

    pub fn model_by_value(&self, value: &ModelId) -> Option<&CatalogOption> {
        self.models.iter().find(|option| &option.value == value)
    }
}

/// Outcome of one catalog fetch; each side succeeds or fails on its own.
#[derive(Debug, Clone)]
pub enum CatalogUpdate {
    Labels(Result<Vec<String>, WorkflowError>),
    Models(Result<Vec<CatalogOption>, WorkflowError>),
}

pub async fn fetch_labels(backend: &dyn RecommendationBackend) -> Result<Vec<String>, WorkflowError> {
    match backend.list_labels().await {
        Ok(labels) => {
            debug!(count = labels.len(), ?labels, "fetched labels");
            Ok(labels)
        }
        Err(err) => {
            warn!("labels fetch failed: {err:#}");
            Err(WorkflowError::CatalogLoad(CatalogKind::Labels))
        }
    }
}

pub async fn fetch_models(
    backend: &dyn RecommendationBackend,
) -> Result<Vec<CatalogOption>, WorkflowError> {
    match backend.list_models().await {
        Ok(models) => {
            debug!(count = models.len(), ?models, "fetched models");
            Ok(models)
        }
        Err(err) => {
            warn!("models fetch failed: {err:#}");
            Err(WorkflowError::CatalogLoad(CatalogKind::Models))
        }
    }
}

/// Starts both fetches. Updates are yielded in completion order, so a slow
/// side never holds back the other.
pub fn catalog_updates(
    backend: &dyn RecommendationBackend,
) -> FuturesUnordered<BoxFuture<'_, CatalogUpdate>> {
    let pending = FuturesUnordered::new();
    pending.push(async move { CatalogUpdate::Labels(fetch_labels(backend).await) }.boxed());
    pending.push(async move { CatalogUpdate::Models(fetch_models(backend).await) }.boxed());
    pending
}
