//! Dashboard aggregation — a pure, re-derivable projection of a `DashboardSnapshot`.
//!
//! Gauges are bounded visual hints (`min(count * weight, 100)`), never counts to
//! reason about. Recompute the view whenever the snapshot changes.

use crate::models::{ActivityItem, DashboardSnapshot, DashboardStats, Resume};

/// Resumes shown on the dashboard card before "view all".
pub const RESUME_PREVIEW_LIMIT: usize = 6;

pub const RESUME_GAUGE_WEIGHT: u32 = 10;
pub const COLD_MAIL_GAUGE_WEIGHT: u32 = 5;
pub const INTERVIEW_GAUGE_WEIGHT: u32 = 10;

const GAUGE_MAX: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatGauges {
    pub resumes: u32,
    pub cold_mails: u32,
    pub interviews: u32,
}

impl StatGauges {
    pub fn from_stats(stats: &DashboardStats) -> Self {
        Self {
            resumes: gauge(stats.total_resumes, RESUME_GAUGE_WEIGHT),
            cold_mails: gauge(stats.total_cold_mails, COLD_MAIL_GAUGE_WEIGHT),
            interviews: gauge(stats.total_interviews, INTERVIEW_GAUGE_WEIGHT),
        }
    }
}

pub fn gauge(count: u32, weight: u32) -> u32 {
    count.saturating_mul(weight).min(GAUGE_MAX)
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub display_name: String,
    pub stats: DashboardStats,
    pub gauges: StatGauges,
    /// Newest first.
    pub recent_activity: Vec<ActivityItem>,
    pub resume_preview: Vec<Resume>,
    /// Resumes not shown in the preview.
    pub resume_overflow: usize,
}

impl DashboardView {
    /// `fallback_name` is used when the snapshot carries no user name.
    pub fn project(snapshot: &DashboardSnapshot, fallback_name: Option<&str>) -> Self {
        let mut recent_activity = snapshot.recent_activity.clone();
        recent_activity.sort_by(|a, b| b.date.cmp(&a.date));

        let resume_preview: Vec<Resume> = snapshot
            .resumes
            .iter()
            .take(RESUME_PREVIEW_LIMIT)
            .cloned()
            .collect();
        let resume_overflow = snapshot.resumes.len().saturating_sub(RESUME_PREVIEW_LIMIT);

        Self {
            display_name: display_name(snapshot.user.name.as_deref(), fallback_name),
            stats: snapshot.stats,
            gauges: StatGauges::from_stats(&snapshot.stats),
            recent_activity,
            resume_preview,
            resume_overflow,
        }
    }

    pub fn has_more_resumes(&self) -> bool {
        self.resume_overflow > 0
    }
}

/// Snapshot name, then session name, then "User".
pub fn display_name(snapshot_name: Option<&str>, session_name: Option<&str>) -> String {
    snapshot_name
        .filter(|n| !n.trim().is_empty())
        .or(session_name.filter(|n| !n.trim().is_empty()))
        .unwrap_or("User")
        .to_string()
}

/// Greeting for a local hour of day (0–23).
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    }
}
