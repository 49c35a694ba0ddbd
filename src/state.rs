use std::collections::HashSet;

use chrono::{DateTime, Utc};
use dashmap::DashSet;
use tokio::sync::{Mutex, watch};

use crate::error::{ClientError, LastError};
use crate::models::chat::ChatMessage;
use crate::models::order::PartnerOrder;
use crate::observability::metrics::Metrics;

/// Single source of truth for everything the presentation layer observes.
///
/// Every field is either a single-writer `watch` channel (readers subscribe,
/// mutations go through the methods here) or a concurrent set for the
/// ephemeral per-session markers. Nothing outside this type mutates client
/// state directly.
pub struct ClientState {
    orders: watch::Sender<Vec<PartnerOrder>>,
    logged_in: watch::Sender<bool>,
    loading: watch::Sender<bool>,
    last_error: watch::Sender<Option<LastError>>,
    last_synced_at: watch::Sender<Option<DateTime<Utc>>>,
    chat_messages: watch::Sender<Vec<ChatMessage>>,
    rated_orders: DashSet<i64>,
    unread_chats: DashSet<i64>,
    pending_push_token: Mutex<Option<String>>,
    pub metrics: Metrics,
}

impl ClientState {
    pub fn new() -> Self {
        Self {
            orders: watch::Sender::new(Vec::new()),
            logged_in: watch::Sender::new(false),
            loading: watch::Sender::new(false),
            last_error: watch::Sender::new(None),
            last_synced_at: watch::Sender::new(None),
            chat_messages: watch::Sender::new(Vec::new()),
            rated_orders: DashSet::new(),
            unread_chats: DashSet::new(),
            pending_push_token: Mutex::new(None),
            metrics: Metrics::new(),
        }
    }

    /// Atomically swaps the held snapshot for the server's. The server list
    /// is trusted wholesale; there is no merge or diff step.
    pub fn replace_all(&self, orders: Vec<PartnerOrder>) {
        let active = orders.iter().filter(|o| !o.phase().is_terminal()).count();
        self.metrics.active_orders.set(active as i64);
        self.orders.send_replace(orders);
        self.last_synced_at.send_replace(Some(Utc::now()));
    }

    pub fn orders(&self) -> Vec<PartnerOrder> {
        self.orders.borrow().clone()
    }

    pub fn subscribe_orders(&self) -> watch::Receiver<Vec<PartnerOrder>> {
        self.orders.subscribe()
    }

    /// Orders still moving: status not yet delivered or cancelled.
    pub fn active_orders(&self) -> Vec<PartnerOrder> {
        self.orders
            .borrow()
            .iter()
            .filter(|o| !o.phase().is_terminal())
            .cloned()
            .collect()
    }

    /// Orders that reached a terminal status.
    pub fn completed_orders(&self) -> Vec<PartnerOrder> {
        self.orders
            .borrow()
            .iter()
            .filter(|o| o.phase().is_terminal())
            .cloned()
            .collect()
    }

    pub fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        *self.last_synced_at.borrow()
    }

    pub fn set_logged_in(&self, value: bool) {
        self.logged_in.send_replace(value);
    }

    pub fn logged_in(&self) -> bool {
        *self.logged_in.borrow()
    }

    pub fn subscribe_logged_in(&self) -> watch::Receiver<bool> {
        self.logged_in.subscribe()
    }

    pub fn set_loading(&self, value: bool) {
        self.loading.send_replace(value);
    }

    pub fn loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn record_error(&self, err: &ClientError) {
        self.last_error.send_replace(Some(LastError::from(err)));
    }

    pub fn clear_error(&self) {
        self.last_error.send_replace(None);
    }

    pub fn last_error(&self) -> Option<LastError> {
        self.last_error.borrow().clone()
    }

    pub fn subscribe_errors(&self) -> watch::Receiver<Option<LastError>> {
        self.last_error.subscribe()
    }

    pub fn set_chat(&self, messages: Vec<ChatMessage>) {
        self.chat_messages.send_replace(messages);
    }

    pub fn clear_chat(&self) {
        self.chat_messages.send_replace(Vec::new());
    }

    pub fn chat_messages(&self) -> Vec<ChatMessage> {
        self.chat_messages.borrow().clone()
    }

    pub fn subscribe_chat(&self) -> watch::Receiver<Vec<ChatMessage>> {
        self.chat_messages.subscribe()
    }

    pub fn mark_rated(&self, order_id: i64) {
        self.rated_orders.insert(order_id);
    }

    pub fn is_rated(&self, order_id: i64) -> bool {
        self.rated_orders.contains(&order_id)
    }

    pub fn rated_orders(&self) -> HashSet<i64> {
        self.rated_orders.iter().map(|id| *id).collect()
    }

    pub fn mark_chat_unread(&self, order_id: i64) {
        self.unread_chats.insert(order_id);
    }

    pub fn mark_chat_read(&self, order_id: i64) {
        self.unread_chats.remove(&order_id);
    }

    pub fn has_unread_chat(&self, order_id: i64) -> bool {
        self.unread_chats.contains(&order_id)
    }

    pub async fn stash_push_token(&self, token: String) {
        *self.pending_push_token.lock().await = Some(token);
    }

    pub async fn take_push_token(&self) -> Option<String> {
        self.pending_push_token.lock().await.take()
    }

    /// Session teardown: drops every piece of per-session state. The poll
    /// loop is stopped by the caller before this runs.
    pub fn reset(&self) {
        self.logged_in.send_replace(false);
        self.loading.send_replace(false);
        self.orders.send_replace(Vec::new());
        self.chat_messages.send_replace(Vec::new());
        self.last_error.send_replace(None);
        self.last_synced_at.send_replace(None);
        self.rated_orders.clear();
        self.unread_chats.clear();
        self.metrics.active_orders.set(0);
    }
}

impl Default for ClientState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::ClientState;
    use crate::error::{ClientError, ErrorKind};
    use crate::models::order::{PartnerOrder, PaymentType};

    fn order(id: i64, status: &str) -> PartnerOrder {
        PartnerOrder {
            id,
            status: status.to_string(),
            created_at: "2026-08-20 12:00".to_string(),
            dropoff_address: "10 Main St".to_string(),
            order_price: 100.0,
            delivery_fee: 30.0,
            payment_type: PaymentType::Prepaid,
            is_ready: false,
            courier: None,
        }
    }

    #[test]
    fn replace_all_swaps_snapshot_wholesale() {
        let state = ClientState::new();
        state.replace_all(vec![order(1, "pending"), order(2, "delivered")]);
        state.replace_all(vec![order(3, "pending")]);

        let orders = state.orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].id, 3);
        assert!(state.last_synced_at().is_some());
    }

    #[test]
    fn partitions_cover_snapshot_and_are_disjoint() {
        let state = ClientState::new();
        state.replace_all(vec![
            order(1, "pending"),
            order(2, "picked_up"),
            order(3, "delivered"),
            order(4, "cancelled"),
            order(5, "some_future_status"),
        ]);

        let active = state.active_orders();
        let completed = state.completed_orders();

        assert_eq!(active.len() + completed.len(), state.orders().len());
        for o in &active {
            assert!(!completed.iter().any(|c| c.id == o.id));
        }
        assert!(active.iter().any(|o| o.id == 5), "unknown status counts as active");
        assert_eq!(completed.iter().map(|o| o.id).collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn rating_marker_does_not_touch_orders() {
        let state = ClientState::new();
        let snapshot = vec![order(1, "delivered")];
        state.replace_all(snapshot.clone());

        state.mark_rated(1);

        assert!(state.is_rated(1));
        assert_eq!(state.orders(), snapshot);
    }

    #[test]
    fn error_slot_is_last_write_wins() {
        let state = ClientState::new();
        state.record_error(&ClientError::Network("timed out".to_string()));
        state.record_error(&ClientError::InvalidCredentials);

        let last = state.last_error().unwrap();
        assert_eq!(last.kind, ErrorKind::Auth);

        state.clear_error();
        assert!(state.last_error().is_none());
    }

    #[test]
    fn reset_clears_session_scoped_state() {
        let state = ClientState::new();
        state.set_logged_in(true);
        state.replace_all(vec![order(1, "pending")]);
        state.mark_rated(1);
        state.mark_chat_unread(1);
        state.record_error(&ClientError::Rejected(500));

        state.reset();

        assert!(!state.logged_in());
        assert!(state.orders().is_empty());
        assert!(!state.is_rated(1));
        assert!(!state.has_unread_chat(1));
        assert!(state.last_error().is_none());
        assert!(state.last_synced_at().is_none());
    }
}
