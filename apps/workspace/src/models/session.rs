use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

/// A persisted batch of generated interview answers for one role/company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSession {
    pub id: String,
    pub role: String,
    pub company_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub questions_and_answers: Vec<QuestionAnswer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColdMail {
    pub id: String,
    pub subject: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// All cold emails generated for a single recipient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColdMailSession {
    pub id: String,
    pub recipient_name: String,
    pub recipient_designation: String,
    pub company_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub emails: Vec<ColdMail>,
}

impl ColdMailSession {
    /// Most recently generated email, if any.
    pub fn latest_email(&self) -> Option<&ColdMail> {
        self.emails.iter().max_by_key(|e| e.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interview_session_defaults_missing_answers() {
        let json = r#"{"id":"i1","role":"SRE","companyName":"Acme","createdAt":"2024-05-02T08:00:00Z"}"#;
        let session: InterviewSession = serde_json::from_str(json).unwrap();
        assert!(session.questions_and_answers.is_empty());
        assert_eq!(session.company_name, "Acme");
    }

    #[test]
    fn test_latest_email_picks_newest() {
        let json = r#"{
            "id": "cm1",
            "recipientName": "Dana",
            "recipientDesignation": "CTO",
            "companyName": "Acme",
            "createdAt": "2024-05-01T08:00:00Z",
            "emails": [
                {"id": "e1", "subject": "Hello", "body": "first", "createdAt": "2024-05-01T08:00:00Z"},
                {"id": "e2", "subject": "Follow up", "body": "second", "createdAt": "2024-05-03T08:00:00Z"}
            ]
        }"#;
        let session: ColdMailSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.latest_email().map(|e| e.id.as_str()), Some("e2"));
    }
}
