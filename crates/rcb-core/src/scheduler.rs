//! Daily report scheduler.
//!
//! Sleeps until the next local occurrence of the configured wall-clock time,
//! injects a `TimerTick` into the router and delivers whatever it returns.
//! The loop runs until `stop()` is called.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Days, Local, NaiveDateTime, NaiveTime, TimeZone};
use tokio::{sync::Mutex, task::JoinHandle, time::sleep};
use tokio_util::sync::CancellationToken;

use crate::{
    delivery::deliver,
    domain::MessageRef,
    messaging::{port::MessagingPort, types::InboundEvent},
    router::CommandRouter,
    Result,
};

/// Give up looking for a valid local instant after this many days.
const MAX_LOOKAHEAD_DAYS: u64 = 7;

#[derive(Clone)]
pub struct DailyScheduler {
    inner: Arc<SchedulerInner>,
}

struct SchedulerInner {
    at: NaiveTime,
    router: Arc<CommandRouter>,
    messenger: Arc<dyn MessagingPort>,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl DailyScheduler {
    pub fn new(
        at: NaiveTime,
        router: Arc<CommandRouter>,
        messenger: Arc<dyn MessagingPort>,
    ) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                at,
                router,
                messenger,
                cancel: CancellationToken::new(),
                task: Mutex::new(None),
            }),
        }
    }

    /// Spawn the daily loop. Calling it again while running is a no-op.
    pub async fn start(&self) {
        let mut task = self.inner.task.lock().await;
        if task.is_some() {
            return;
        }

        let scheduler = self.clone();
        *task = Some(tokio::spawn(async move { scheduler.run().await }));
        tracing::info!(at = %self.inner.at.format("%H:%M"), "daily report scheduled");
    }

    pub async fn stop(&self) {
        self.inner.cancel.cancel();
        if let Some(handle) = self.inner.task.lock().await.take() {
            let _ = handle.await;
        }
    }

    /// Run one tick now: route a `TimerTick` and deliver the result.
    pub async fn fire(&self) -> Result<Vec<MessageRef>> {
        let out = self.inner.router.dispatch(&InboundEvent::TimerTick);
        deliver(self.inner.messenger.as_ref(), &out).await
    }

    async fn run(&self) {
        let mut last_fired: Option<DateTime<Local>> = None;
        loop {
            let now = Local::now();
            let Some(next) = next_run_since(now, last_fired, self.inner.at) else {
                tracing::error!("no valid next run for the daily report, stopping");
                break;
            };
            let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
            tracing::debug!(next = %next, "waiting for daily report");

            tokio::select! {
                _ = self.inner.cancel.cancelled() => break,
                _ = sleep(wait) => {
                    last_fired = Some(next);
                    match self.fire().await {
                        Ok(sent) => tracing::info!(messages = sent.len(), "daily report sent"),
                        Err(e) => tracing::warn!(error = %e, "daily report delivery failed"),
                    }
                }
            }
        }
    }
}

/// Next run after both `now` and the last fired run.
///
/// The wall clock can be stepped back while the loop sleeps; measuring from
/// the last fired run keeps the same day's report from going out twice.
pub fn next_run_since<Tz: TimeZone>(
    now: DateTime<Tz>,
    last_fired: Option<DateTime<Tz>>,
    at: NaiveTime,
) -> Option<DateTime<Tz>> {
    let from = match last_fired {
        Some(last) if last > now => last,
        _ => now,
    };
    next_run_after(from, at)
}

/// Next instant strictly after `now` whose local wall-clock time is `at`.
///
/// If `at` falls into a DST gap on some day, that day is skipped. On an
/// ambiguous day (clock set back) the earlier instant wins.
pub fn next_run_after<Tz: TimeZone>(now: DateTime<Tz>, at: NaiveTime) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    let today = now.naive_local().date();

    (0..=MAX_LOOKAHEAD_DAYS)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .map(|day| NaiveDateTime::new(day, at))
        .filter_map(|naive| tz.from_local_datetime(&naive).earliest())
        .find(|candidate| *candidate > now)
}
