use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::api::PartnerApi;
use crate::sync::refresh::{RefreshTrigger, Refresher};

/// Lifetime-scoped poll loop. While running, it refreshes the order store on
/// a fixed interval (first tick immediate) and whenever an external signal
/// asks for one, e.g. on push-notification receipt. The loop is started when
/// the dashboard becomes visible and stopped when it goes away.
pub struct Poller<A> {
    refresher: Arc<Refresher<A>>,
    interval: Duration,
    wakeup: Arc<Notify>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<A: PartnerApi> Poller<A> {
    pub fn new(refresher: Arc<Refresher<A>>, interval: Duration) -> Self {
        Self {
            refresher,
            interval,
            wakeup: Arc::new(Notify::new()),
            task: Mutex::new(None),
        }
    }

    /// Idempotent: a no-op while a live loop exists.
    pub async fn start(&self) {
        let mut slot = self.task.lock().await;
        if slot.as_ref().is_some_and(|task| !task.is_finished()) {
            return;
        }

        let refresher = self.refresher.clone();
        let wakeup = self.wakeup.clone();
        let period = self.interval;

        *slot = Some(tokio::spawn(async move {
            info!(interval_secs = period.as_secs_f64(), "order poll loop started");

            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let _ = refresher.refresh(RefreshTrigger::Interval).await;
                    }
                    _ = wakeup.notified() => {
                        let _ = refresher.refresh(RefreshTrigger::Push).await;
                    }
                }
            }
        }));
    }

    pub async fn stop(&self) {
        if let Some(task) = self.task.lock().await.take() {
            task.abort();
            info!("order poll loop stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.task
            .lock()
            .await
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// External "orders changed" signal. Wakes the loop for an immediate
    /// refresh outside the sleep cycle; a no-op while the loop is stopped.
    pub fn request_refresh(&self) {
        self.wakeup.notify_one();
    }
}
