//! Client-side state and backend synchronization for the career workspace:
//! resume selection, interview-answer generation, dashboard aggregation and
//! CRUD against the career backend.

pub mod api_client;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod generation;
pub mod handoff;
pub mod models;
pub mod notice;
pub mod state;

pub use api_client::{ApiOutcome, ApiResult, Backend, HttpBackend, SessionContext};
pub use errors::{Action, TransportError, WorkspaceError};
pub use state::ResumeWorkspaceState;
