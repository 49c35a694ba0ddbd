use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::api::PartnerApi;
use crate::error::ClientError;
use crate::state::ClientState;

/// What caused a reconciliation. Background triggers fail silently so a
/// network outage does not toast the user every poll tick; a manual trigger
/// surfaces its failure in the error slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Interval,
    Push,
    Manual,
}

impl RefreshTrigger {
    pub fn is_background(self) -> bool {
        matches!(self, RefreshTrigger::Interval | RefreshTrigger::Push)
    }

    fn as_label(self) -> &'static str {
        match self {
            RefreshTrigger::Interval => "interval",
            RefreshTrigger::Push => "push",
            RefreshTrigger::Manual => "manual",
        }
    }
}

/// The single reconciliation entry point: fetch the server snapshot and
/// replace the store wholesale. All triggers funnel through here; a trigger
/// arriving while a refresh is already in flight is coalesced into it.
pub struct Refresher<A> {
    state: Arc<ClientState>,
    api: Arc<A>,
    in_flight: AtomicBool,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<A: PartnerApi> Refresher<A> {
    pub fn new(state: Arc<ClientState>, api: Arc<A>) -> Self {
        Self {
            state,
            api,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Fetch-and-replace. Returns the fetch error to the caller regardless of
    /// trigger; whether it lands in the observable error slot depends on the
    /// trigger kind.
    pub async fn refresh(&self, trigger: RefreshTrigger) -> Result<(), ClientError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            self.state.metrics.refreshes_coalesced_total.inc();
            debug!(trigger = trigger.as_label(), "refresh already in flight, skipping");
            return Ok(());
        }

        // Reset via drop so an aborted poll task cannot wedge the flag.
        let _guard = InFlightGuard(&self.in_flight);

        match self.api.fetch_orders().await {
            Ok(orders) => {
                self.state
                    .metrics
                    .refreshes_total
                    .with_label_values(&[trigger.as_label(), "success"])
                    .inc();
                self.state.replace_all(orders);
                if !trigger.is_background() {
                    self.state.clear_error();
                }
                Ok(())
            }
            Err(err) => {
                self.state
                    .metrics
                    .refreshes_total
                    .with_label_values(&[trigger.as_label(), "error"])
                    .inc();
                if trigger.is_background() {
                    debug!(trigger = trigger.as_label(), error = %err, "background refresh failed");
                } else {
                    self.state.record_error(&err);
                }
                Err(err)
            }
        }
    }
}
