//! Recommendation workflow client: backend access, request configuration,
//! catalog loading, invocation lifecycle, and the session state that ties
//! them together.

pub mod backend;
pub mod catalog;
pub mod invoker;
pub mod request;
pub mod session;
pub mod settings;

pub use backend::{HttpBackend, RecommendationBackend};
pub use catalog::{Catalog, CatalogUpdate};
pub use invoker::{InvocationStatus, InvocationTicket};
pub use request::RequestConfig;
pub use session::{DisplayPrefs, Session};
pub use settings::ClientSettings;
