//! Cron-based scheduler for refreshing the dashboard snapshot

use crate::core::dashboard::{Dashboard, DashboardSnapshot};
use crate::error::DataError;
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// Convert a refresh interval to a six-field cron expression.
///
/// Step fields restart at the top of every minute, hour and day, so only
/// intervals that divide that period evenly keep a fixed spacing. Anything
/// else, including 0 and whole days, yields `None`.
pub fn cron_expression(interval_seconds: u64) -> Option<String> {
    let divides = |step: u64, period: u64| step > 0 && period % step == 0;
    match interval_seconds {
        s if s < 60 && divides(s, 60) => Some(format!("*/{} * * * * *", s)),
        s if s < 3600 && s % 60 == 0 && divides(s / 60, 60) => {
            Some(format!("0 */{} * * * *", s / 60))
        }
        s if s % 3600 == 0 && s < 86_400 && divides(s / 3600, 24) => {
            Some(format!("0 0 */{} * * *", s / 3600))
        }
        _ => None,
    }
}

/// Scheduler that periodically rebuilds the dashboard and caches the result
pub struct DashboardScheduler {
    dashboard: Arc<Dashboard>,
    schedule: Option<Schedule>,
    latest: Arc<RwLock<Option<DashboardSnapshot>>>,
    last_error: Arc<RwLock<Option<String>>>,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl DashboardScheduler {
    /// Create a new scheduler
    ///
    /// # Arguments
    /// * `dashboard` - Dashboard to refresh
    /// * `interval_seconds` - Refresh interval in seconds (0 = disabled; the
    ///   snapshot is then only built on demand)
    pub fn new(
        dashboard: Arc<Dashboard>,
        interval_seconds: u64,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        if interval_seconds == 0 {
            info!("DashboardScheduler: disabled, interval_seconds is 0");
            return Ok(Self {
                dashboard,
                schedule: None,
                latest: Arc::new(RwLock::new(None)),
                last_error: Arc::new(RwLock::new(None)),
                handle: Arc::new(RwLock::new(None)),
            });
        }

        let cron_expr = cron_expression(interval_seconds).ok_or_else(|| {
            format!(
                "Refresh interval {}s does not divide a minute, hour or day evenly",
                interval_seconds
            )
        })?;
        let schedule = Schedule::from_str(&cron_expr)
            .map_err(|e| format!("Invalid cron expression '{}': {}", cron_expr, e))?;

        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            "DashboardScheduler: created with interval {}s (cron: {})",
            interval_seconds,
            cron_expr
        );

        Ok(Self {
            dashboard,
            schedule: Some(schedule),
            latest: Arc::new(RwLock::new(None)),
            last_error: Arc::new(RwLock::new(None)),
            handle: Arc::new(RwLock::new(None)),
        })
    }

    pub fn dashboard(&self) -> &Arc<Dashboard> {
        &self.dashboard
    }

    /// Whether periodic refreshes are configured.
    pub fn is_enabled(&self) -> bool {
        self.schedule.is_some()
    }

    /// Start the scheduler; a no-op when disabled
    pub async fn start(&self) {
        let Some(schedule) = self.schedule.clone() else {
            return;
        };
        let dashboard = self.dashboard.clone();
        let latest = self.latest.clone();
        let last_error = self.last_error.clone();

        let handle = tokio::spawn(async move {
            info!("DashboardScheduler: started, waiting for cron schedule...");

            loop {
                let mut upcoming = schedule.upcoming(chrono::Utc);
                if let Some(next_tick) = upcoming.next() {
                    let now = chrono::Utc::now();
                    if next_tick > now {
                        let duration = (next_tick - now).to_std().unwrap_or_default();
                        tokio::time::sleep(duration).await;
                    }
                } else {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                    continue;
                }

                debug!("DashboardScheduler: cron tick, refreshing dashboard");
                if let Err(e) = refresh_into(&dashboard, &latest, &last_error).await {
                    error!(error = %e, "DashboardScheduler: refresh failed");
                }
            }
        });

        {
            let mut h = self.handle.write().await;
            if let Some(previous) = h.replace(handle) {
                previous.abort();
            }
        }

        info!("DashboardScheduler: started successfully");
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("DashboardScheduler: stopped");
        }
    }

    /// Check if the scheduler is running
    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.is_some()
    }

    /// Last snapshot produced by a refresh, if any.
    pub async fn latest(&self) -> Option<DashboardSnapshot> {
        self.latest.read().await.clone()
    }

    /// Error from the most recent refresh, cleared by the next success.
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }

    /// Refresh immediately and replace the cached snapshot.
    pub async fn refresh_now(&self) -> Result<DashboardSnapshot, DataError> {
        refresh_into(&self.dashboard, &self.latest, &self.last_error).await
    }
}

async fn refresh_into(
    dashboard: &Dashboard,
    latest: &RwLock<Option<DashboardSnapshot>>,
    last_error: &RwLock<Option<String>>,
) -> Result<DashboardSnapshot, DataError> {
    match dashboard.refresh().await {
        Ok(snapshot) => {
            *latest.write().await = Some(snapshot.clone());
            *last_error.write().await = None;
            Ok(snapshot)
        }
        Err(e) => {
            *last_error.write().await = Some(e.to_string());
            Err(e)
        }
    }
}
