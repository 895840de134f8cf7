use shared::{error::WorkflowError, protocol::RecommendRequest};
use tracing::{debug, warn};

use crate::backend::RecommendationBackend;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InvocationStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Failed(WorkflowError),
}

impl InvocationStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn failure(&self) -> Option<&WorkflowError> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// A submitted invocation. Only the ticket with the latest sequence number
/// may update the session when its response arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationTicket {
    pub seq: u64,
    pub request: RecommendRequest,
}

/// Issues one recommendation request and maps any failure to
/// [`WorkflowError::Invocation`].
pub async fn invoke(
    backend: &dyn RecommendationBackend,
    ticket: &InvocationTicket,
) -> Result<Vec<String>, WorkflowError> {
    match backend.recommend(&ticket.request).await {
        Ok(recommendations) => {
            debug!(
                seq = ticket.seq,
                count = recommendations.len(),
                ?recommendations,
                "received recommendations"
            );
            Ok(recommendations)
        }
        Err(err) => {
            warn!(
                seq = ticket.seq,
                model = %ticket.request.model,
                label = %ticket.request.label,
                "recommendation request failed: {err:#}"
            );
            Err(WorkflowError::Invocation)
        }
    }
}
