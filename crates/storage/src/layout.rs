use anyhow::{ensure, Context, Result};
use shared::domain::PanelPosition;
use tracing::{debug, warn};

use crate::KeyValueStore;

/// Key of the single persisted results-panel record.
pub const PANEL_POSITION_KEY: &str = "location";

/// Persists the results panel offset as a JSON `{x, y}` record.
pub struct LayoutStore<S> {
    store: S,
}

impl<S: KeyValueStore> LayoutStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn medium(&self) -> &S {
        &self.store
    }

    /// Returns the stored position, or the default when the record is
    /// missing, malformed, or unreadable.
    pub async fn load(&self) -> PanelPosition {
        let raw = match self.store.get(PANEL_POSITION_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return PanelPosition::default(),
            Err(err) => {
                warn!("failed to read panel position, using default: {err:#}");
                return PanelPosition::default();
            }
        };

        match serde_json::from_str::<PanelPosition>(&raw) {
            Ok(position) if position.is_finite() => {
                debug!(x = position.x, y = position.y, "loaded panel position");
                position
            }
            Ok(_) | Err(_) => {
                warn!(record = %raw, "ignoring malformed panel position record");
                PanelPosition::default()
            }
        }
    }

    pub async fn save(&self, position: PanelPosition) -> Result<()> {
        ensure!(
            position.is_finite(),
            "panel position must be finite, got ({}, {})",
            position.x,
            position.y
        );
        let raw = serde_json::to_string(&position).context("failed to encode panel position")?;
        self.store.set(PANEL_POSITION_KEY, &raw).await?;
        debug!(x = position.x, y = position.y, "saved panel position");
        Ok(())
    }
}
