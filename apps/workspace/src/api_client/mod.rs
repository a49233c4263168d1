/// Backend synchronization client — every call to the career backend goes through here.
///
/// Calls never throw for backend-reported failures: those come back as
/// `ApiOutcome::Rejected`. Only transport faults (unreachable host, body that
/// is not a JSON envelope) surface as `TransportError`. Nothing is retried and
/// nothing is cached; callers re-fetch after a successful mutation.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::json;
use tracing::{debug, warn};

use crate::errors::TransportError;
use crate::generation::{GeneratedAnswers, GenerationSubmission, ResumeSource};
use crate::models::resume::ResumeListing;
use crate::models::{ColdMailSession, DashboardSnapshot, InterviewSession, Resume};

pub mod context;
pub mod envelope;

pub use context::SessionContext;
pub use envelope::{ApiOutcome, ApiResult};

const GEN_ANSWER_PATH: &str = "/gen-answer";
const DASHBOARD_PATH: &str = "/dashboard";
const RESUMES_PATH: &str = "/resumes";
const INTERVIEWS_PATH: &str = "/interviews";
const COLD_MAILS_PATH: &str = "/cold-mails";

/// The five logical resources the workspace synchronizes against.
/// `HttpBackend` is the real implementation; tests substitute in-memory fakes.
#[async_trait]
pub trait Backend: Send + Sync {
    fn session(&self) -> &SessionContext;

    async fn fetch_snapshot(&self) -> ApiResult<DashboardSnapshot>;

    async fn list_resumes(&self) -> ApiResult<Vec<Resume>>;
    /// Resumes offered in the generation picker (`GET /gen-answer`).
    async fn list_generation_resumes(&self) -> ApiResult<Vec<Resume>>;
    async fn rename_resume(&self, id: &str, name: &str) -> ApiResult<()>;
    async fn delete_resume(&self, id: &str) -> ApiResult<()>;

    async fn list_interview_sessions(&self) -> ApiResult<Vec<InterviewSession>>;
    async fn delete_interview_session(&self, id: &str) -> ApiResult<()>;

    async fn list_cold_mail_sessions(&self) -> ApiResult<Vec<ColdMailSession>>;
    async fn delete_cold_mail_session(&self, id: &str) -> ApiResult<()>;

    async fn submit_generation(&self, request: &GenerationSubmission)
        -> ApiResult<GeneratedAnswers>;
}

#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    session: SessionContext,
}

impl HttpBackend {
    /// `timeout: None` keeps the transport default (no client-side limit).
    pub fn new(
        base_url: impl Into<String>,
        session: SessionContext,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &str,
        fallback: &str,
    ) -> ApiResult<T> {
        let response = self.authorize(request).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        let outcome = envelope::read_envelope(status, &body, fallback)?;
        match &outcome {
            ApiOutcome::Success(_) => debug!("{operation} succeeded (status {status})"),
            ApiOutcome::Rejected(message) => {
                warn!("{operation} rejected by backend (status {status}): {message}")
            }
        }
        Ok(outcome)
    }

    async fn delete_by_id(&self, path: &str, id: &str, fallback: &str) -> ApiResult<()> {
        let request = self.client.delete(self.url(path)).query(&[("id", id)]);
        let outcome: ApiOutcome<IgnoredAny> =
            self.send(request, &format!("DELETE {path}"), fallback).await?;
        Ok(outcome.map(|_| ()))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    fn session(&self) -> &SessionContext {
        &self.session
    }

    async fn fetch_snapshot(&self) -> ApiResult<DashboardSnapshot> {
        let request = self.client.get(self.url(DASHBOARD_PATH));
        self.send(request, "GET /dashboard", "Failed to load dashboard data")
            .await
    }

    async fn list_resumes(&self) -> ApiResult<Vec<Resume>> {
        let request = self.client.get(self.url(RESUMES_PATH));
        let outcome: ApiOutcome<ResumeListing> = self
            .send(request, "GET /resumes", "Failed to load resumes")
            .await?;
        Ok(outcome.map(ResumeListing::into_vec))
    }

    async fn list_generation_resumes(&self) -> ApiResult<Vec<Resume>> {
        let request = self.client.get(self.url(GEN_ANSWER_PATH));
        let outcome: ApiOutcome<ResumeListing> = self
            .send(request, "GET /gen-answer", "Failed to load resumes")
            .await?;
        Ok(outcome.map(ResumeListing::into_vec))
    }

    async fn rename_resume(&self, id: &str, name: &str) -> ApiResult<()> {
        let request = self
            .client
            .patch(self.url(RESUMES_PATH))
            .query(&[("id", id)])
            .json(&json!({ "customName": name }));
        let outcome: ApiOutcome<IgnoredAny> = self
            .send(request, "PATCH /resumes", "Failed to rename resume")
            .await?;
        Ok(outcome.map(|_| ()))
    }

    async fn delete_resume(&self, id: &str) -> ApiResult<()> {
        self.delete_by_id(RESUMES_PATH, id, "Failed to delete resume")
            .await
    }

    async fn list_interview_sessions(&self) -> ApiResult<Vec<InterviewSession>> {
        let request = self.client.get(self.url(INTERVIEWS_PATH));
        self.send(request, "GET /interviews", "Failed to load interviews")
            .await
    }

    async fn delete_interview_session(&self, id: &str) -> ApiResult<()> {
        self.delete_by_id(INTERVIEWS_PATH, id, "Failed to delete interview")
            .await
    }

    async fn list_cold_mail_sessions(&self) -> ApiResult<Vec<ColdMailSession>> {
        let request = self.client.get(self.url(COLD_MAILS_PATH));
        self.send(request, "GET /cold-mails", "Failed to load cold mails")
            .await
    }

    async fn delete_cold_mail_session(&self, id: &str) -> ApiResult<()> {
        self.delete_by_id(COLD_MAILS_PATH, id, "Failed to delete cold mail")
            .await
    }

    async fn submit_generation(
        &self,
        submission: &GenerationSubmission,
    ) -> ApiResult<GeneratedAnswers> {
        let form = generation_form(submission)?;
        let request = self.client.post(self.url(GEN_ANSWER_PATH)).multipart(form);

        // A success envelope without answers is treated like a rejection.
        let outcome: ApiOutcome<Option<GeneratedAnswers>> = self
            .send(request, "POST /gen-answer", "Failed to generate answers")
            .await?;
        Ok(match outcome {
            ApiOutcome::Success(Some(answers)) => ApiOutcome::Success(answers),
            ApiOutcome::Success(None) => {
                ApiOutcome::Rejected("Failed to generate answers".to_string())
            }
            ApiOutcome::Rejected(message) => ApiOutcome::Rejected(message),
        })
    }
}

/// Multipart body for `POST /gen-answer`. Exactly one of `resumeId` / `file` is sent.
fn generation_form(submission: &GenerationSubmission) -> Result<Form, TransportError> {
    let form = match &submission.resume {
        ResumeSource::Saved(id) => Form::new().text("resumeId", id.clone()),
        ResumeSource::Upload(file) => {
            let part = Part::bytes(file.bytes.to_vec()).file_name(file.name.clone());
            let part = match &file.mime_type {
                Some(mime) => part.mime_str(mime)?,
                None => part,
            };
            Form::new().part("file", part)
        }
    };

    let mut form = form
        .text("role", submission.role.clone())
        .text("company_name", submission.company.clone())
        .text("word_limit", submission.word_limit.to_string())
        .text("questions", json!(submission.questions).to_string());

    if let Some(knowledge) = &submission.company_knowledge {
        form = form.text("user_knowledge", knowledge.clone());
    }
    if let Some(url) = &submission.company_url {
        form = form.text("company_url", url.clone());
    }
    Ok(form)
}
