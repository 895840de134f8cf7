use thiserror::Error;

use crate::domain::CatalogKind;

pub const VALIDATION_MESSAGE: &str =
    "Please select both a model and a label before running the model.";
pub const INVOCATION_MESSAGE: &str = "Error running model. Please try again.";

/// Failures of the recommendation workflow. `Display` renders the text
/// shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Please select both a model and a label before running the model.")]
    Validation,
    #[error("Error fetching {}. Please try again.", .0.as_str())]
    CatalogLoad(CatalogKind),
    #[error("Error running model. Please try again.")]
    Invocation,
}

impl WorkflowError {
    /// Client-side failures never reached the network.
    pub fn is_client_side(&self) -> bool {
        matches!(self, Self::Validation)
    }
}
