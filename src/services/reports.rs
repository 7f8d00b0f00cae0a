//! Daily supplier report job

use std::time::Duration;

use chrono::{Local, NaiveDateTime, NaiveTime};
use tokio::task::JoinHandle;

use crate::config::ReportsConfig;

use super::suppliers::SuppliersService;

/// Start the background job sending supplier reports every day at the configured hour.
/// Returns `None` when reports are disabled.
pub fn spawn_daily_reports(config: ReportsConfig, suppliers: SuppliersService) -> Option<JoinHandle<()>> {
    if !config.enabled {
        tracing::info!("Daily supplier reports disabled");
        return None;
    }

    Some(tokio::spawn(async move {
        loop {
            let wait = duration_until_next(Local::now().naive_local(), config.daily_hour);
            tracing::info!(
                hour = config.daily_hour,
                wait_secs = wait.as_secs(),
                "Next supplier report run scheduled"
            );
            tokio::time::sleep(wait).await;

            match suppliers.send_daily_reports().await {
                Ok(count) => tracing::info!(suppliers = count, "Daily supplier reports sent"),
                Err(e) => tracing::error!("Daily supplier reports failed: {}", e),
            }
        }
    }))
}

/// Time from `now` until the next occurrence of `hour`:00. An hour equal to
/// the current time schedules the following day.
pub fn duration_until_next(now: NaiveDateTime, hour: u32) -> Duration {
    let at = NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
    let mut next = now.date().and_time(at);
    if next <= now {
        next += chrono::Duration::days(1);
    }
    (next - now).to_std().unwrap_or(Duration::ZERO)
}
