use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A resume saved to the user's account. Ids are assigned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: String,
    pub custom_name: String,
    pub upload_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_field: Option<String>,
}

/// `GET /resumes` answers with either a bare array or `{ resumes: [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ResumeListing {
    Bare(Vec<Resume>),
    Wrapped { resumes: Vec<Resume> },
}

impl ResumeListing {
    pub(crate) fn into_vec(self) -> Vec<Resume> {
        match self {
            ResumeListing::Bare(resumes) | ResumeListing::Wrapped { resumes } => resumes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_reads_camel_case_fields() {
        let json = r#"{
            "id": "r1",
            "customName": "Backend CV",
            "uploadDate": "2024-03-01T10:00:00.000Z",
            "predictedField": "Software Engineering"
        }"#;
        let resume: Resume = serde_json::from_str(json).unwrap();
        assert_eq!(resume.custom_name, "Backend CV");
        assert_eq!(resume.candidate_name, None);
        assert_eq!(resume.predicted_field.as_deref(), Some("Software Engineering"));
    }

    #[test]
    fn test_listing_accepts_both_shapes() {
        let item = r#"{"id":"r1","customName":"A","uploadDate":"2024-03-01T10:00:00Z"}"#;
        let bare: ResumeListing = serde_json::from_str(&format!("[{item}]")).unwrap();
        let wrapped: ResumeListing =
            serde_json::from_str(&format!("{{\"resumes\":[{item}]}}")).unwrap();
        assert_eq!(bare.into_vec().len(), 1);
        assert_eq!(wrapped.into_vec()[0].id, "r1");
    }
}
