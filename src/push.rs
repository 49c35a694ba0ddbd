use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::api::PartnerApi;
use crate::models::push::PushMessage;
use crate::state::ClientState;
use crate::sync::Poller;

const NOTIFICATION_BUFFER: usize = 64;

/// Intake for push messages and token rotations. The platform shell that
/// receives raw pushes hands them here; it gets this router injected at
/// process startup rather than reaching for a process-wide client.
pub struct PushRouter<A> {
    api: Arc<A>,
    state: Arc<ClientState>,
    poller: Arc<Poller<A>>,
    notifications: broadcast::Sender<PushMessage>,
}

impl<A: PartnerApi> PushRouter<A> {
    pub fn new(api: Arc<A>, state: Arc<ClientState>, poller: Arc<Poller<A>>) -> Self {
        let (notifications, _unused_rx) = broadcast::channel(NOTIFICATION_BUFFER);
        Self {
            api,
            state,
            poller,
            notifications,
        }
    }

    /// A push message means something changed server-side: mark the related
    /// chat unread, hand the message to whoever renders OS notifications,
    /// and refresh the order list right away.
    pub fn handle_message(&self, message: PushMessage) {
        info!(title = %message.title, job_id = ?message.job_id, "push message received");

        if let Some(job_id) = message.job_id {
            self.state.mark_chat_unread(job_id);
        }

        let _ = self.notifications.send(message);
        self.poller.request_refresh();
    }

    /// Token rotation can happen before anyone has logged in; in that case
    /// the token is stashed and registered on the next successful login.
    pub async fn handle_new_token(&self, token: String) {
        if self.state.logged_in() {
            if let Err(err) = self.api.register_push_token(&token).await {
                warn!(error = %err, "failed to register push token");
            }
        } else {
            self.state.stash_push_token(token).await;
        }
    }

    pub fn subscribe_notifications(&self) -> broadcast::Receiver<PushMessage> {
        self.notifications.subscribe()
    }
}
