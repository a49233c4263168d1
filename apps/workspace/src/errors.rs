use thiserror::Error;

use crate::generation::validator::Rejection;
use crate::handoff::store::StoreError;

/// Faults below the backend contract: the request never produced a readable envelope.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response body (status {status}): {source}")]
    MalformedBody {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

/// Logical actions that carry their own in-flight guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    LoadSnapshot,
    LoadResumes,
    LoadInterviews,
    LoadColdMails,
    Generate,
    Rename,
    Delete,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::LoadSnapshot => "load dashboard",
            Action::LoadResumes => "load resumes",
            Action::LoadInterviews => "load interviews",
            Action::LoadColdMails => "load cold mails",
            Action::Generate => "generate answers",
            Action::Rename => "rename",
            Action::Delete => "delete",
        }
    }
}

/// Workspace-level error. Each variant maps to one user-facing message.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Validation error: {0:?}")]
    Validation(Rejection),

    #[error("Backend rejected request: {0}")]
    Rejected(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Handoff storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Already in progress: {}", .0.label())]
    Busy(Action),
}

impl WorkspaceError {
    /// Text shown to the user. Transport and storage faults never leak details.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            WorkspaceError::Validation(reason) => reason.description().to_string(),
            WorkspaceError::Rejected(message) => message.clone(),
            WorkspaceError::Transport(_) | WorkspaceError::Storage(_) => fallback.to_string(),
            WorkspaceError::Busy(action) => {
                format!("Please wait, {} is already in progress.", action.label())
            }
        }
    }

    /// Whether this error should be logged as a fault.
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            WorkspaceError::Transport(_) | WorkspaceError::Storage(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message_is_verbatim() {
        let err = WorkspaceError::Rejected("Resume not found".to_string());
        assert_eq!(err.user_message("Failed to delete resume"), "Resume not found");
        assert!(!err.is_fault());
    }

    #[test]
    fn test_transport_message_is_generic() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = WorkspaceError::from(TransportError::MalformedBody {
            status: 502,
            source,
        });
        assert_eq!(
            err.user_message("Failed to load dashboard data"),
            "Failed to load dashboard data"
        );
        assert!(err.is_fault());
    }

    #[test]
    fn test_handoff_encode_failure_is_generic_fault() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = WorkspaceError::from(StoreError::Encode(source));
        assert_eq!(err.user_message("Failed to save resume"), "Failed to save resume");
        assert!(err.is_fault());
    }

    #[test]
    fn test_validation_uses_reason_description() {
        let err = WorkspaceError::Validation(Rejection::NoQuestions);
        assert_eq!(
            err.user_message("unused"),
            "Please add at least one interview question."
        );
        assert!(!err.is_fault());
    }
}
