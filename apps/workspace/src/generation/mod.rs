// Answer-generation workflow: draft editing, submit gating, generated output.
// Network calls live in api_client; nothing here touches the backend.

pub mod answers;
pub mod draft;
pub mod validator;

pub use answers::{answers_to_text, GeneratedAnswers};
pub use draft::{
    DraftGenerationRequest, GenerationSubmission, ResumeSource, SelectionMode, UploadedFile,
    COMMON_QUESTIONS, DEFAULT_WORD_LIMIT,
};
pub use validator::{validate, Rejection};
