use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::api::PartnerApi;
use crate::config::Config;
use crate::error::ClientError;
use crate::models::order::OrderDraft;
use crate::models::track::CourierTrack;
use crate::state::ClientState;
use crate::sync::{Poller, RefreshTrigger, Refresher};

/// Facade tying the session gate, order store, and sync loop together. Each
/// operation is one remote call; failures are returned to the caller and,
/// where the original flow showed a toast, reflected into the error slot.
///
/// Order actions never patch local state: a successful action re-fetches the
/// full snapshot, so the store can never diverge from the server.
pub struct PartnerClient<A> {
    api: Arc<A>,
    state: Arc<ClientState>,
    refresher: Arc<Refresher<A>>,
    poller: Arc<Poller<A>>,
    boost_increment: f64,
}

impl<A: PartnerApi> PartnerClient<A> {
    pub fn new(api: A, config: &Config) -> Self {
        let api = Arc::new(api);
        let state = Arc::new(ClientState::new());
        let refresher = Arc::new(Refresher::new(state.clone(), api.clone()));
        let poller = Arc::new(Poller::new(
            refresher.clone(),
            Duration::from_secs(config.poll_interval_secs),
        ));

        Self {
            api,
            state,
            refresher,
            poller,
            boost_increment: config.boost_increment,
        }
    }

    pub fn state(&self) -> &Arc<ClientState> {
        &self.state
    }

    pub fn poller(&self) -> &Arc<Poller<A>> {
        &self.poller
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    fn ensure_logged_in(&self) -> Result<(), ClientError> {
        if self.state.logged_in() {
            Ok(())
        } else {
            let err = ClientError::NotLoggedIn;
            self.state.record_error(&err);
            Err(err)
        }
    }

    /// On success: session flag up, any stashed push token registered, an
    /// initial fetch, and the poll loop started. On failure the flag stays
    /// down and the error kind distinguishes bad credentials from transport
    /// trouble.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ClientError> {
        self.state.set_loading(true);
        let result = self.api.login(email, password).await;
        match result {
            Ok(()) => {
                self.state.set_logged_in(true);
                self.state.clear_error();
                info!("partner logged in");

                if let Some(token) = self.state.take_push_token().await {
                    if let Err(err) = self.api.register_push_token(&token).await {
                        warn!(error = %err, "failed to register pending push token");
                    }
                }

                let _ = self.refresher.refresh(RefreshTrigger::Manual).await;
                self.poller.start().await;
                self.state.set_loading(false);
                Ok(())
            }
            Err(err) => {
                self.state.record_error(&err);
                self.state.set_loading(false);
                Err(err)
            }
        }
    }

    /// Session teardown: stop polling, drop all per-session state.
    pub async fn logout(&self) {
        self.poller.stop().await;
        self.state.reset();
        info!("partner logged out");
    }

    /// User-initiated refresh. Unlike the background poll, its failure is
    /// surfaced.
    pub async fn refresh_orders(&self) -> Result<(), ClientError> {
        self.ensure_logged_in()?;
        self.state.set_loading(true);
        let result = self.refresher.refresh(RefreshTrigger::Manual).await;
        self.state.set_loading(false);
        result
    }

    pub async fn create_order(&self, draft: &OrderDraft) -> Result<(), ClientError> {
        self.ensure_logged_in()?;
        self.state.set_loading(true);
        let result = self.api.create_order(draft).await;
        match result {
            Ok(()) => {
                let refreshed = self.refresher.refresh(RefreshTrigger::Manual).await;
                self.state.set_loading(false);
                refreshed
            }
            Err(err) => {
                self.state.record_error(&err);
                self.state.set_loading(false);
                Err(err)
            }
        }
    }

    pub async fn mark_ready(&self, job_id: i64) -> Result<(), ClientError> {
        self.ensure_logged_in()?;
        self.action_then_refetch(self.api.mark_ready(job_id)).await
    }

    /// Raises the delivery fee by the configured increment to attract courier
    /// acceptance.
    pub async fn boost_order(&self, job_id: i64) -> Result<(), ClientError> {
        self.ensure_logged_in()?;
        self.action_then_refetch(self.api.boost_order(job_id, self.boost_increment))
            .await
    }

    pub async fn confirm_return(&self, job_id: i64) -> Result<(), ClientError> {
        self.ensure_logged_in()?;
        self.action_then_refetch(self.api.confirm_return(job_id))
            .await
    }

    /// On success the order joins the ephemeral rated set; the order record
    /// itself is only ever changed by the follow-up server snapshot.
    pub async fn rate_courier(
        &self,
        job_id: i64,
        rating: u8,
        review: &str,
    ) -> Result<(), ClientError> {
        self.ensure_logged_in()?;
        match self.api.rate_courier(job_id, rating, review).await {
            Ok(()) => {
                self.state.mark_rated(job_id);
                self.refresher.refresh(RefreshTrigger::Manual).await
            }
            Err(err) => {
                self.state.record_error(&err);
                Err(err)
            }
        }
    }

    /// Opening a conversation clears its unread mark immediately, before the
    /// history fetch resolves.
    pub async fn load_chat(&self, job_id: i64) -> Result<(), ClientError> {
        self.ensure_logged_in()?;
        self.state.mark_chat_read(job_id);
        match self.api.chat_history(job_id).await {
            Ok(messages) => {
                self.state.set_chat(messages);
                Ok(())
            }
            Err(err) => {
                self.state.record_error(&err);
                Err(err)
            }
        }
    }

    pub fn clear_chat(&self) {
        self.state.clear_chat();
    }

    pub async fn send_message(&self, job_id: i64, message: &str) -> Result<(), ClientError> {
        self.ensure_logged_in()?;
        match self.api.send_chat_message(job_id, message).await {
            Ok(()) => self.load_chat(job_id).await,
            Err(err) => {
                self.state.record_error(&err);
                Err(err)
            }
        }
    }

    /// Tracking errors go back to the caller only; the map screen shows its
    /// own failure text instead of the shared toast slot.
    pub async fn track_courier(&self, job_id: i64) -> Result<CourierTrack, ClientError> {
        self.ensure_logged_in()?;
        self.api.track_courier(job_id).await
    }

    async fn action_then_refetch(
        &self,
        action: impl Future<Output = Result<(), ClientError>>,
    ) -> Result<(), ClientError> {
        self.state.set_loading(true);
        let result = match action.await {
            Ok(()) => self.refresher.refresh(RefreshTrigger::Manual).await,
            Err(err) => {
                self.state.record_error(&err);
                Err(err)
            }
        };
        self.state.set_loading(false);
        result
    }
}
