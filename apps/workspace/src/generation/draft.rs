use bytes::Bytes;

use crate::generation::validator::{validate, Rejection};
use crate::handoff::FileDescriptor;

pub const DEFAULT_WORD_LIMIT: u32 = 150;

/// Characters of a plain-text resume shown as its preview.
const TEXT_PREVIEW_CHARS: usize = 500;

/// Quick-pick questions offered next to the question editor.
pub const COMMON_QUESTIONS: [&str; 10] = [
    "Tell me about yourself.",
    "Why do you want to work for our company?",
    "What are your greatest strengths?",
    "What is your biggest weakness?",
    "Where do you see yourself in 5 years?",
    "Why are you leaving your current job?",
    "Describe a challenging project you worked on.",
    "How do you handle stress and pressure?",
    "What motivates you?",
    "Do you have any questions for us?",
];

/// Which resume source a submission will use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    #[default]
    Existing,
    Upload,
}

/// A resume file chosen by the user, bytes included.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: Option<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type,
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Serializable description of this file. Bytes are not carried.
    pub fn descriptor(&self) -> FileDescriptor {
        FileDescriptor {
            name: self.name.clone(),
            size: self.size(),
            mime_type: self.mime_type.clone(),
        }
    }

    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }

    /// Preview line: text content for `.txt`/`.md`, a size summary otherwise.
    pub fn preview(&self) -> String {
        match self.extension().as_deref() {
            Some("txt") | Some("md") => {
                let text = String::from_utf8_lossy(&self.bytes);
                let head: String = text.chars().take(TEXT_PREVIEW_CHARS).collect();
                format!("{head}...")
            }
            ext => format!(
                "{} ({} KB) - {} file selected",
                self.name,
                format_kb(self.size()),
                ext.unwrap_or_default().to_ascii_uppercase()
            ),
        }
    }
}

pub(crate) fn format_kb(size: u64) -> String {
    format!("{:.1}", size as f64 / 1024.0)
}

/// In-memory, not-yet-submitted input for answer generation.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftGenerationRequest {
    pub mode: SelectionMode,
    pub resume_id: String,
    pub file: Option<UploadedFile>,
    /// Descriptor carried over from resume analysis. The bytes did not survive the trip.
    pub preloaded: Option<FileDescriptor>,
    pub role: String,
    pub company: String,
    pub questions: Vec<String>,
    pub word_limit: u32,
    pub company_knowledge: String,
    pub company_url: String,
}

impl Default for DraftGenerationRequest {
    fn default() -> Self {
        Self {
            mode: SelectionMode::Existing,
            resume_id: String::new(),
            file: None,
            preloaded: None,
            role: String::new(),
            company: String::new(),
            questions: vec![String::new()],
            word_limit: DEFAULT_WORD_LIMIT,
            company_knowledge: String::new(),
            company_url: String::new(),
        }
    }
}

impl DraftGenerationRequest {
    pub fn select_resume(&mut self, id: impl Into<String>) {
        self.resume_id = id.into();
    }

    pub fn attach_file(&mut self, file: UploadedFile) {
        self.file = Some(file);
        self.preloaded = None;
    }

    pub fn add_question(&mut self) {
        self.questions.push(String::new());
    }

    /// Removes the question at `index`. The last remaining question is kept.
    pub fn remove_question(&mut self, index: usize) {
        if self.questions.len() > 1 && index < self.questions.len() {
            self.questions.remove(index);
        }
    }

    pub fn update_question(&mut self, index: usize, text: impl Into<String>) {
        if let Some(slot) = self.questions.get_mut(index) {
            *slot = text.into();
        }
    }

    /// Appends a catalogue question unless already present, dropping empty slots.
    pub fn add_common_question(&mut self, question: &str) {
        if self.questions.iter().any(|q| q == question) {
            return;
        }
        self.questions.retain(|q| !q.is_empty());
        self.questions.push(question.to_string());
    }

    /// Questions that will actually be sent.
    pub fn valid_questions(&self) -> Vec<String> {
        self.questions
            .iter()
            .filter(|q| !q.trim().is_empty())
            .cloned()
            .collect()
    }

    /// Validates and freezes the draft into a request with exactly one resume source.
    pub fn to_submission(&self) -> Result<GenerationSubmission, Rejection> {
        validate(self)?;

        let resume = match self.mode {
            SelectionMode::Existing => ResumeSource::Saved(self.resume_id.trim().to_string()),
            SelectionMode::Upload => match &self.file {
                Some(file) => ResumeSource::Upload(file.clone()),
                None => return Err(Rejection::MissingResumeFile),
            },
        };

        Ok(GenerationSubmission {
            resume,
            role: self.role.clone(),
            company: self.company.clone(),
            questions: self.valid_questions(),
            word_limit: self.word_limit,
            company_knowledge: non_empty(&self.company_knowledge),
            company_url: non_empty(&self.company_url),
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResumeSource {
    Saved(String),
    Upload(UploadedFile),
}

/// A validated generation request, ready for `POST /gen-answer`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSubmission {
    pub resume: ResumeSource,
    pub role: String,
    pub company: String,
    pub questions: Vec<String>,
    pub word_limit: u32,
    pub company_knowledge: Option<String>,
    pub company_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_draft() {
        let draft = DraftGenerationRequest::default();
        assert_eq!(draft.word_limit, 150);
        assert_eq!(draft.questions, vec![String::new()]);
        assert_eq!(draft.mode, SelectionMode::Existing);
    }

    #[test]
    fn test_remove_keeps_last_question() {
        let mut draft = DraftGenerationRequest::default();
        draft.remove_question(0);
        assert_eq!(draft.questions.len(), 1);

        draft.add_question();
        draft.update_question(1, "Why us?");
        draft.remove_question(0);
        assert_eq!(draft.questions, vec!["Why us?".to_string()]);
    }

    #[test]
    fn test_update_out_of_range_is_ignored() {
        let mut draft = DraftGenerationRequest::default();
        draft.update_question(3, "nope");
        assert_eq!(draft.questions, vec![String::new()]);
    }

    #[test]
    fn test_add_common_question_drops_empty_slots_and_dedups() {
        let mut draft = DraftGenerationRequest::default();
        draft.add_common_question(COMMON_QUESTIONS[0]);
        assert_eq!(draft.questions, vec![COMMON_QUESTIONS[0].to_string()]);

        draft.add_common_question(COMMON_QUESTIONS[0]);
        assert_eq!(draft.questions.len(), 1);

        draft.add_question();
        draft.add_common_question(COMMON_QUESTIONS[8]);
        assert_eq!(
            draft.questions,
            vec![COMMON_QUESTIONS[0].to_string(), COMMON_QUESTIONS[8].to_string()]
        );
    }

    #[test]
    fn test_attach_file_clears_preloaded() {
        let mut draft = DraftGenerationRequest::default();
        draft.preloaded = Some(FileDescriptor {
            name: "old.pdf".to_string(),
            size: 10,
            mime_type: None,
        });
        draft.attach_file(UploadedFile::new("new.pdf", None, vec![0u8; 4]));
        assert!(draft.preloaded.is_none());
        assert_eq!(draft.file.as_ref().map(|f| f.size()), Some(4));
    }

    #[test]
    fn test_submission_uses_only_the_selected_source() {
        let mut draft = DraftGenerationRequest::default();
        draft.select_resume("r1");
        draft.attach_file(UploadedFile::new("cv.pdf", None, vec![1u8]));
        draft.role = "Engineer".to_string();
        draft.company = "Acme".to_string();
        draft.questions = vec!["".to_string(), "Why us?".to_string()];
        draft.company_url = "  ".to_string();

        let submission = draft.to_submission().unwrap();
        assert_eq!(submission.resume, ResumeSource::Saved("r1".to_string()));
        assert_eq!(submission.questions, vec!["Why us?".to_string()]);
        assert_eq!(submission.company_url, None);

        draft.mode = SelectionMode::Upload;
        let submission = draft.to_submission().unwrap();
        assert!(matches!(submission.resume, ResumeSource::Upload(ref f) if f.name == "cv.pdf"));
    }

    #[test]
    fn test_submission_rejects_invalid_draft() {
        let draft = DraftGenerationRequest::default();
        assert_eq!(draft.to_submission(), Err(Rejection::MissingResume));
    }

    #[test]
    fn test_preview_for_binary_file() {
        let file = UploadedFile::new("Resume.PDF", None, vec![0u8; 2560]);
        assert_eq!(file.preview(), "Resume.PDF (2.5 KB) - PDF file selected");
    }

    #[test]
    fn test_preview_for_text_file_truncates() {
        let text = "a".repeat(600);
        let file = UploadedFile::new("cv.md", None, text.into_bytes());
        let preview = file.preview();
        assert_eq!(preview.len(), 503);
        assert!(preview.ends_with("..."));
    }
}
