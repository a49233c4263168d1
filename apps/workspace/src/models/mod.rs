pub mod dashboard;
pub mod resume;
pub mod session;

pub use dashboard::{ActivityItem, ActivityKind, DashboardSnapshot, DashboardStats, DashboardUser};
pub use resume::Resume;
pub use session::{ColdMail, ColdMailSession, InterviewSession, QuestionAnswer};
