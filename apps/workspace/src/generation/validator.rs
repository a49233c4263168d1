//! Submit gate for answer generation.
//!
//! Checks run in a fixed order and stop at the first violation:
//! 1. resume source present for the selected mode
//! 2. role non-empty
//! 3. company non-empty
//! 4. at least one non-blank question
//!
//! Pure predicate. Surfacing the reason is the caller's job.

use crate::generation::draft::{DraftGenerationRequest, SelectionMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// `existing` mode without a selected resume id.
    MissingResume,
    /// `upload` mode with neither an attached file nor a preloaded descriptor.
    MissingResumeFile,
    /// `upload` mode with only a preloaded descriptor; the bytes must be re-attached.
    ResumeReuploadRequired,
    MissingRoleOrCompany,
    NoQuestions,
}

impl Rejection {
    pub fn title(&self) -> &'static str {
        match self {
            Rejection::MissingResume | Rejection::MissingResumeFile => "Resume Required",
            Rejection::ResumeReuploadRequired => "Resume File Needed",
            Rejection::MissingRoleOrCompany => "Required Fields Missing",
            Rejection::NoQuestions => "Questions Required",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Rejection::MissingResume => "Please select a resume from your saved resumes.",
            Rejection::MissingResumeFile => "Please upload your resume first.",
            Rejection::ResumeReuploadRequired => {
                "Please re-upload your resume file to generate answers."
            }
            Rejection::MissingRoleOrCompany => "Please fill in the role and company name.",
            Rejection::NoQuestions => "Please add at least one interview question.",
        }
    }
}

pub fn validate(draft: &DraftGenerationRequest) -> Result<(), Rejection> {
    match draft.mode {
        SelectionMode::Existing => {
            if draft.resume_id.trim().is_empty() {
                return Err(Rejection::MissingResume);
            }
        }
        SelectionMode::Upload => match (&draft.file, &draft.preloaded) {
            (Some(_), _) => {}
            (None, Some(_)) => return Err(Rejection::ResumeReuploadRequired),
            (None, None) => return Err(Rejection::MissingResumeFile),
        },
    }

    if draft.role.trim().is_empty() || draft.company.trim().is_empty() {
        return Err(Rejection::MissingRoleOrCompany);
    }

    if !draft.questions.iter().any(|q| !q.trim().is_empty()) {
        return Err(Rejection::NoQuestions);
    }

    Ok(())
}
