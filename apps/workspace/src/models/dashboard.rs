use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::resume::Resume;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardUser {
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_resumes: u32,
    pub total_cold_mails: u32,
    pub total_interviews: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Resume,
    ColdMail,
    Interview,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
}

/// Read-only aggregate returned by `GET /dashboard`. Never persisted locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub user: DashboardUser,
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(default)]
    pub recent_activity: Vec<ActivityItem>,
    #[serde(default)]
    pub resumes: Vec<Resume>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_parses_wire_shape() {
        let json = r#"{
            "user": {"name": "Sam", "email": "sam@example.com"},
            "stats": {"totalResumes": 2, "totalColdMails": 1, "totalInterviews": 0},
            "recentActivity": [
                {"id": "a1", "type": "cold_mail", "title": "Mail", "description": "to Acme", "date": "2024-05-01T08:00:00Z"},
                {"id": "a2", "type": "badge", "title": "?", "description": "", "date": "2024-05-02T08:00:00Z"}
            ],
            "resumes": []
        }"#;
        let snapshot: DashboardSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.stats.total_resumes, 2);
        assert_eq!(snapshot.recent_activity[0].kind, ActivityKind::ColdMail);
        assert_eq!(snapshot.recent_activity[1].kind, ActivityKind::Other);
        assert_eq!(snapshot.user.name.as_deref(), Some("Sam"));
    }

    #[test]
    fn test_snapshot_tolerates_null_or_missing_user_name() {
        for user in [
            r#"{"name": null, "email": "sam@example.com"}"#,
            r#"{"email": "sam@example.com"}"#,
        ] {
            let json = format!(r#"{{"user": {user}, "stats": {{"totalResumes": 1}}}}"#);
            let snapshot: DashboardSnapshot = serde_json::from_str(&json).unwrap();
            assert_eq!(snapshot.user.name, None);
            assert_eq!(snapshot.user.email, "sam@example.com");
        }
    }
}
