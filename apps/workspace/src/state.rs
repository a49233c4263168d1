//! Workspace state — the user's drafts plus the server-backed views they act on.
//!
//! Every mutation re-fetches instead of patching local copies. Errors are
//! turned into `Notice`s here and also returned to the caller. Validation
//! failures never reach the network and are not logged as faults.
//!
//! All operations take `&self`, so independent panels can load concurrently.
//! The views sit behind one lock that is never held across a backend call.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, error, info, warn};

use crate::api_client::{ApiOutcome, ApiResult, Backend};
use crate::dashboard::DashboardView;
use crate::errors::{Action, WorkspaceError};
use crate::generation::draft::format_kb;
use crate::generation::{
    answers_to_text, DraftGenerationRequest, GeneratedAnswers, SelectionMode, UploadedFile,
};
use crate::handoff::{Handoff, HandoffBuffer};
use crate::models::{ColdMailSession, DashboardSnapshot, InterviewSession, Resume};
use crate::notice::Notice;

/// One in-flight flag per logical action. Cloned handles share the flags, so a
/// presentation layer can disable the matching control while a call runs.
#[derive(Debug, Clone, Default)]
pub struct ActionGates {
    busy: Arc<Mutex<HashSet<Action>>>,
}

impl ActionGates {
    pub fn is_busy(&self, action: Action) -> bool {
        self.busy
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(&action)
    }

    fn begin(&self, action: Action) -> Result<GateTicket, WorkspaceError> {
        let mut busy = self
            .busy
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !busy.insert(action) {
            return Err(WorkspaceError::Busy(action));
        }
        Ok(GateTicket {
            gates: self.clone(),
            action,
        })
    }
}

/// Releases its action when dropped, including when the owning future is abandoned.
struct GateTicket {
    gates: ActionGates,
    action: Action,
}

impl Drop for GateTicket {
    fn drop(&mut self) {
        self.gates
            .busy
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&self.action);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColdMailDraft {
    pub recipient_name: String,
    pub recipient_designation: String,
    pub company_name: String,
}

impl ColdMailDraft {
    pub fn is_complete(&self) -> bool {
        [
            &self.recipient_name,
            &self.recipient_designation,
            &self.company_name,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

#[derive(Default)]
struct Views {
    draft: DraftGenerationRequest,
    cold_mail_draft: ColdMailDraft,
    resume_preview: Option<String>,
    generated_answers: Option<GeneratedAnswers>,
    generation_resumes: Vec<Resume>,
    snapshot: Option<DashboardSnapshot>,
    interview_sessions: Vec<InterviewSession>,
    cold_mail_sessions: Vec<ColdMailSession>,
    notices: Vec<Notice>,
}

pub struct ResumeWorkspaceState {
    backend: Arc<dyn Backend>,
    gates: ActionGates,
    views: Mutex<Views>,
}

impl ResumeWorkspaceState {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            gates: ActionGates::default(),
            views: Mutex::new(Views::default()),
        }
    }

    fn views(&self) -> MutexGuard<'_, Views> {
        self.views
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn notify(&self, notice: Notice) {
        self.views().notices.push(notice);
    }

    // ── read side ──────────────────────────────────────────────────────────

    pub fn gates(&self) -> ActionGates {
        self.gates.clone()
    }

    pub fn is_busy(&self, action: Action) -> bool {
        self.gates.is_busy(action)
    }

    pub fn snapshot(&self) -> Option<DashboardSnapshot> {
        self.views().snapshot.clone()
    }

    pub fn dashboard_view(&self) -> Option<DashboardView> {
        let fallback = self.backend.session().user_name.as_deref();
        self.views()
            .snapshot
            .as_ref()
            .map(|snapshot| DashboardView::project(snapshot, fallback))
    }

    pub fn generation_resumes(&self) -> Vec<Resume> {
        self.views().generation_resumes.clone()
    }

    pub fn interview_sessions(&self) -> Vec<InterviewSession> {
        self.views().interview_sessions.clone()
    }

    pub fn cold_mail_sessions(&self) -> Vec<ColdMailSession> {
        self.views().cold_mail_sessions.clone()
    }

    pub fn generated_answers(&self) -> Option<GeneratedAnswers> {
        self.views().generated_answers.clone()
    }

    pub fn resume_preview(&self) -> Option<String> {
        self.views().resume_preview.clone()
    }

    pub fn draft(&self) -> DraftGenerationRequest {
        self.views().draft.clone()
    }

    pub fn cold_mail_draft(&self) -> ColdMailDraft {
        self.views().cold_mail_draft.clone()
    }

    pub fn export_answers(&self) -> Option<String> {
        let views = self.views();
        views.generated_answers.as_ref().map(|answers| {
            answers_to_text(
                &views.draft.role,
                &views.draft.company,
                &views.draft.questions,
                answers,
            )
        })
    }

    pub fn drain_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.views().notices)
    }

    // ── draft editing ──────────────────────────────────────────────────────

    /// Runs `edit` against the generation draft.
    pub fn edit_draft<R>(&self, edit: impl FnOnce(&mut DraftGenerationRequest) -> R) -> R {
        edit(&mut self.views().draft)
    }

    pub fn edit_cold_mail_draft<R>(&self, edit: impl FnOnce(&mut ColdMailDraft) -> R) -> R {
        edit(&mut self.views().cold_mail_draft)
    }

    pub fn attach_file(&self, file: UploadedFile) {
        let mut views = self.views();
        views.resume_preview = Some(file.preview());
        views.draft.attach_file(file);
    }

    /// Pulls a pending handoff, if any, into the draft. Returns whether one was applied.
    pub fn consume_handoff(&self, buffer: &HandoffBuffer) -> Result<bool, WorkspaceError> {
        match buffer.consume() {
            Ok(Some(handoff)) => {
                self.apply_handoff(handoff);
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(e) => {
                let err = WorkspaceError::from(e);
                error!("Failed to read handoff buffer: {err}");
                Err(err)
            }
        }
    }

    pub fn apply_handoff(&self, handoff: Handoff) {
        {
            let mut views = self.views();
            views.resume_preview = Some(format!(
                "{} ({} KB) - Pre-loaded from analysis",
                handoff.file.name,
                format_kb(handoff.file.size)
            ));
            views.draft.role = handoff.predicted_field().unwrap_or_default().to_string();
            views.draft.mode = SelectionMode::Upload;
            views.draft.file = None;
            views.draft.preloaded = Some(handoff.file);
        }

        info!("Applied resume handoff to draft");
        self.notify(Notice::success(
            "Resume Pre-loaded!",
            "Your resume and details have been automatically filled from your recent analysis.",
        ));
    }

    // ── loads ──────────────────────────────────────────────────────────────

    pub async fn refresh_snapshot(&self) -> Result<(), WorkspaceError> {
        let _ticket = self.gates.begin(Action::LoadSnapshot)?;
        let result = self.backend.fetch_snapshot().await;
        let snapshot = self.settle(result, "Error", "Failed to load dashboard data")?;
        self.views().snapshot = Some(snapshot);
        Ok(())
    }

    pub async fn load_generation_resumes(&self) -> Result<(), WorkspaceError> {
        let _ticket = self.gates.begin(Action::LoadResumes)?;
        let result = self.backend.list_generation_resumes().await;
        let resumes = self.settle(result, "Error", "Failed to load resumes")?;
        self.views().generation_resumes = resumes;
        Ok(())
    }

    pub async fn load_interviews(&self) -> Result<(), WorkspaceError> {
        let _ticket = self.gates.begin(Action::LoadInterviews)?;
        let result = self.backend.list_interview_sessions().await;
        let sessions = self.settle(result, "Error", "Failed to load interviews")?;
        self.views().interview_sessions = sessions;
        Ok(())
    }

    pub async fn load_cold_mails(&self) -> Result<(), WorkspaceError> {
        let _ticket = self.gates.begin(Action::LoadColdMails)?;
        let result = self.backend.list_cold_mail_sessions().await;
        let sessions = self.settle(result, "Error", "Failed to load cold mails")?;
        self.views().cold_mail_sessions = sessions;
        Ok(())
    }

    // ── mutations ──────────────────────────────────────────────────────────

    pub async fn rename_resume(&self, id: &str, name: &str) -> Result<(), WorkspaceError> {
        {
            let _ticket = self.gates.begin(Action::Rename)?;
            let result = self.backend.rename_resume(id, name).await;
            self.settle(result, "Error", "Failed to rename resume")?;
        }
        self.notify(Notice::success("Success", "Resume renamed successfully"));
        self.refresh_after("rename").await;
        Ok(())
    }

    pub async fn delete_resume(&self, id: &str) -> Result<(), WorkspaceError> {
        {
            let _ticket = self.gates.begin(Action::Delete)?;
            let result = self.backend.delete_resume(id).await;
            self.settle(result, "Error", "Failed to delete resume")?;
        }
        self.notify(Notice::success("Success", "Resume deleted successfully"));
        self.refresh_after("resume delete").await;
        Ok(())
    }

    pub async fn delete_interview(&self, id: &str) -> Result<(), WorkspaceError> {
        {
            let _ticket = self.gates.begin(Action::Delete)?;
            let result = self.backend.delete_interview_session(id).await;
            self.settle(result, "Error", "Failed to delete interview")?;
        }
        self.notify(Notice::success(
            "Success",
            "Interview session deleted successfully",
        ));
        let (_, reloaded) = tokio::join!(
            self.refresh_after("interview delete"),
            self.load_interviews()
        );
        if let Err(e) = reloaded {
            warn!("Interview list refresh failed after delete: {e}");
        }
        Ok(())
    }

    pub async fn delete_cold_mail(&self, id: &str) -> Result<(), WorkspaceError> {
        {
            let _ticket = self.gates.begin(Action::Delete)?;
            let result = self.backend.delete_cold_mail_session(id).await;
            self.settle(result, "Error", "Failed to delete cold mail")?;
        }
        self.notify(Notice::success(
            "Success",
            "Cold mail session deleted successfully",
        ));
        let (_, reloaded) = tokio::join!(
            self.refresh_after("cold mail delete"),
            self.load_cold_mails()
        );
        if let Err(e) = reloaded {
            warn!("Cold mail list refresh failed after delete: {e}");
        }
        Ok(())
    }

    /// Validates the draft, then submits it. On success the previous answers are replaced.
    pub async fn generate_answers(&self) -> Result<(), WorkspaceError> {
        let checked = self.views().draft.to_submission();
        let submission = match checked {
            Ok(submission) => submission,
            Err(reason) => {
                debug!("Generation blocked by validation: {reason:?}");
                self.notify(Notice::error(reason.title(), reason.description()));
                return Err(WorkspaceError::Validation(reason));
            }
        };

        let _ticket = self.gates.begin(Action::Generate)?;
        info!(
            "Submitting {} question(s) for {} at {}",
            submission.questions.len(),
            submission.role,
            submission.company
        );
        let result = self.backend.submit_generation(&submission).await;
        let answers = self.settle(
            result,
            "Generation Failed",
            "An error occurred while generating the answers.",
        )?;

        self.views().generated_answers = Some(answers);
        self.notify(Notice::success(
            "Answers Generated Successfully!",
            "Your interview answers have been generated and are ready for review.",
        ));
        Ok(())
    }

    // ── helpers ────────────────────────────────────────────────────────────

    /// A failed refresh after a successful mutation leaves the view stale; the
    /// mutation still counts as done.
    async fn refresh_after(&self, operation: &str) {
        if let Err(e) = self.refresh_snapshot().await {
            warn!("Dashboard refresh after {operation} failed: {e}");
        }
    }

    fn settle<T>(
        &self,
        result: ApiResult<T>,
        title: &str,
        fallback: &str,
    ) -> Result<T, WorkspaceError> {
        let err = match result {
            Ok(ApiOutcome::Success(data)) => return Ok(data),
            Ok(ApiOutcome::Rejected(message)) => WorkspaceError::Rejected(message),
            Err(e) => WorkspaceError::Transport(e),
        };

        if err.is_fault() {
            error!("{fallback}: {err}");
        } else {
            warn!("{fallback}: {err}");
        }
        self.notify(Notice::error(title, err.user_message(fallback)));
        Err(err)
    }
}
