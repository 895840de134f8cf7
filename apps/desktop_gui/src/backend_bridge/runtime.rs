//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{catalog, invoker, ClientSettings, HttpBackend, RecommendationBackend};
use crossbeam_channel::{Receiver, Sender};
use shared::{domain::CatalogKind, error::WorkflowError};
use storage::{KeyValueStore, LayoutStore, MemoryKvStore, Storage};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(settings: ClientSettings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(run_worker(settings, cmd_rx, ui_tx));
    });
}

/// Serves commands until the UI drops its sender. Layout commands are served
/// even when the backend client could not be configured.
async fn run_worker(
    settings: ClientSettings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    let backend: Option<Arc<dyn RecommendationBackend>> = match build_backend(&settings) {
        Ok(backend) => {
            let _ = ui_tx.try_send(UiEvent::Info(format!("Backend: {}", backend.api_url())));
            Some(Arc::new(backend))
        }
        Err(err) => {
            tracing::error!("failed to configure backend client: {err:#}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("{err:#}"),
            )));
            None
        }
    };
    let layout = open_layout_store(&settings, &ui_tx).await;

    while let Ok(cmd) = cmd_rx.recv() {
        tracing::debug!(command = cmd.name(), "backend command received");
        match cmd {
            BackendCommand::LoadCatalog => {
                let Some(backend) = backend.as_ref() else {
                    let _ = ui_tx.send(UiEvent::LabelsLoaded(Err(WorkflowError::CatalogLoad(
                        CatalogKind::Labels,
                    ))));
                    let _ = ui_tx.send(UiEvent::ModelsLoaded(Err(WorkflowError::CatalogLoad(
                        CatalogKind::Models,
                    ))));
                    continue;
                };

                let labels_backend = Arc::clone(backend);
                let labels_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let outcome = catalog::fetch_labels(labels_backend.as_ref()).await;
                    let _ = labels_tx.send(UiEvent::LabelsLoaded(outcome));
                });

                let models_backend = Arc::clone(backend);
                let models_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let outcome = catalog::fetch_models(models_backend.as_ref()).await;
                    let _ = models_tx.send(UiEvent::ModelsLoaded(outcome));
                });
            }
            BackendCommand::Recommend { ticket } => {
                let Some(backend) = backend.clone() else {
                    let _ = ui_tx.send(UiEvent::RecommendationFinished {
                        seq: ticket.seq,
                        outcome: Err(WorkflowError::Invocation),
                    });
                    continue;
                };
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let outcome = invoker::invoke(backend.as_ref(), &ticket).await;
                    let _ = ui_tx.send(UiEvent::RecommendationFinished {
                        seq: ticket.seq,
                        outcome,
                    });
                });
            }
            BackendCommand::LoadPanelPosition => {
                let position = layout.load().await;
                let _ = ui_tx.send(UiEvent::PanelPositionLoaded(position));
            }
            BackendCommand::SavePanelPosition(position) => {
                if let Err(err) = layout.save(position).await {
                    tracing::warn!("failed to persist panel position: {err:#}");
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::Layout,
                        format!("{err:#}"),
                    )));
                }
            }
        }
    }
    tracing::info!("ui command queue closed; backend worker exiting");
}

fn build_backend(settings: &ClientSettings) -> anyhow::Result<HttpBackend> {
    let api_url = settings.validated_api_url()?;
    HttpBackend::with_timeout(api_url, settings.request_timeout())
}

/// Falls back to an in-memory medium so the panel stays usable when the
/// layout database cannot be opened.
async fn open_layout_store(
    settings: &ClientSettings,
    ui_tx: &Sender<UiEvent>,
) -> LayoutStore<Arc<dyn KeyValueStore>> {
    let database_url = settings.database_url();
    let opened = match Storage::new(&database_url).await {
        Ok(storage) => storage.health_check().await.map(|()| storage),
        Err(err) => Err(err),
    };
    match opened {
        Ok(storage) => LayoutStore::new(Arc::new(storage) as Arc<dyn KeyValueStore>),
        Err(err) => {
            tracing::warn!(database_url = %database_url, "layout storage unavailable: {err:#}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("panel position will not persist: {err:#}"),
            )));
            LayoutStore::new(Arc::new(MemoryKvStore::new()) as Arc<dyn KeyValueStore>)
        }
    }
}
