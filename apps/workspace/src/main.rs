use std::sync::Arc;

use anyhow::Result;
use chrono::{Local, Timelike};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use career_workspace::config::Config;
use career_workspace::dashboard::greeting;
use career_workspace::handoff::store::FileStore;
use career_workspace::handoff::HandoffBuffer;
use career_workspace::notice::Severity;
use career_workspace::{HttpBackend, ResumeWorkspaceState, SessionContext};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting career workspace v{}", env!("CARGO_PKG_VERSION"));

    let session = SessionContext {
        bearer_token: config.api_token.clone(),
        user_name: None,
    };
    let backend = HttpBackend::new(&config.api_base_url, session, config.request_timeout)?;
    info!("Backend client initialized ({})", backend.base_url());

    let handoff = HandoffBuffer::new(Arc::new(FileStore::new(&config.handoff_store_path)));
    let workspace = ResumeWorkspaceState::new(Arc::new(backend));

    if workspace.consume_handoff(&handoff)? {
        info!(
            "Picked up analysed resume: {}",
            workspace.resume_preview().unwrap_or_default()
        );
    }

    // Panels load independently; a failure in one does not stop the others.
    let _ = tokio::join!(
        workspace.refresh_snapshot(),
        workspace.load_generation_resumes()
    );

    if let Some(view) = workspace.dashboard_view() {
        info!("{}, {}!", greeting(Local::now().hour()), view.display_name);
        info!(
            "Resumes: {} ({}%), cold mails: {} ({}%), interviews: {} ({}%)",
            view.stats.total_resumes,
            view.gauges.resumes,
            view.stats.total_cold_mails,
            view.gauges.cold_mails,
            view.stats.total_interviews,
            view.gauges.interviews
        );
        for activity in &view.recent_activity {
            info!(
                "{} {}: {}",
                activity.date.format("%Y-%m-%d"),
                activity.title,
                activity.description
            );
        }
        if view.has_more_resumes() {
            info!("{} more resume(s) not shown", view.resume_overflow);
        }
    }
    info!(
        "{} resume(s) available for answer generation",
        workspace.generation_resumes().len()
    );

    for notice in workspace.drain_notices() {
        match notice.severity {
            Severity::Error => warn!("{}: {}", notice.title, notice.description),
            Severity::Success => info!("{}: {}", notice.title, notice.description),
        }
    }

    Ok(())
}
