//! In-crate fake of the partner backend for unit tests. Holds the "server
//! side" order list and mutates it the way the real backend would, so
//! action-then-refetch flows can be exercised without a network.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use crate::api::PartnerApi;
use crate::error::ClientError;
use crate::models::chat::{ChatMessage, ChatRole};
use crate::models::order::{OrderDraft, PartnerOrder};
use crate::models::track::CourierTrack;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Unauthorized,
    NetworkDown,
}

pub struct MockPartnerApi {
    pub orders: Mutex<Vec<PartnerOrder>>,
    pub chat: Mutex<Vec<ChatMessage>>,
    pub track: Mutex<Option<CourierTrack>>,
    pub login_outcome: Mutex<LoginOutcome>,
    pub fail_fetch: AtomicBool,
    pub fail_actions: AtomicBool,
    pub fetch_calls: AtomicUsize,
    pub fetch_delay: Mutex<Option<Duration>>,
    pub registered_tokens: Mutex<Vec<String>>,
    pub ratings: Mutex<Vec<(i64, u8, String)>>,
    pub next_order_id: AtomicUsize,
}

impl MockPartnerApi {
    pub fn new() -> Self {
        Self {
            orders: Mutex::new(Vec::new()),
            chat: Mutex::new(Vec::new()),
            track: Mutex::new(None),
            login_outcome: Mutex::new(LoginOutcome::Success),
            fail_fetch: AtomicBool::new(false),
            fail_actions: AtomicBool::new(false),
            fetch_calls: AtomicUsize::new(0),
            fetch_delay: Mutex::new(None),
            registered_tokens: Mutex::new(Vec::new()),
            ratings: Mutex::new(Vec::new()),
            next_order_id: AtomicUsize::new(100),
        }
    }

    pub fn with_orders(orders: Vec<PartnerOrder>) -> Self {
        let mock = Self::new();
        *mock.orders.lock().unwrap() = orders;
        mock
    }

    fn check_action(&self) -> Result<(), ClientError> {
        if self.fail_actions.load(Ordering::SeqCst) {
            Err(ClientError::Rejected(500))
        } else {
            Ok(())
        }
    }
}

impl Default for MockPartnerApi {
    fn default() -> Self {
        Self::new()
    }
}

impl PartnerApi for MockPartnerApi {
    async fn login(&self, _email: &str, _password: &str) -> Result<(), ClientError> {
        match *self.login_outcome.lock().unwrap() {
            LoginOutcome::Success => Ok(()),
            LoginOutcome::Unauthorized => Err(ClientError::InvalidCredentials),
            LoginOutcome::NetworkDown => Err(ClientError::Network("connection refused".to_string())),
        }
    }

    async fn fetch_orders(&self) -> Result<Vec<PartnerOrder>, ClientError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.fetch_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(ClientError::Network("connection reset".to_string()));
        }

        Ok(self.orders.lock().unwrap().clone())
    }

    async fn create_order(&self, draft: &OrderDraft) -> Result<(), ClientError> {
        self.check_action()?;
        let id = self.next_order_id.fetch_add(1, Ordering::SeqCst) as i64;
        self.orders.lock().unwrap().push(PartnerOrder {
            id,
            status: "pending".to_string(),
            created_at: "2026-08-20 12:00".to_string(),
            dropoff_address: draft.dropoff_address.clone(),
            order_price: draft.order_price,
            delivery_fee: draft.delivery_fee,
            payment_type: draft.payment_type.clone(),
            is_ready: false,
            courier: None,
        });
        Ok(())
    }

    async fn mark_ready(&self, job_id: i64) -> Result<(), ClientError> {
        self.check_action()?;
        let mut orders = self.orders.lock().unwrap();
        if let Some(order) = orders.iter_mut().find(|o| o.id == job_id) {
            order.is_ready = true;
        }
        Ok(())
    }

    async fn boost_order(&self, job_id: i64, amount: f64) -> Result<(), ClientError> {
        self.check_action()?;
        let mut orders = self.orders.lock().unwrap();
        if let Some(order) = orders.iter_mut().find(|o| o.id == job_id) {
            order.delivery_fee += amount;
        }
        Ok(())
    }

    async fn confirm_return(&self, _job_id: i64) -> Result<(), ClientError> {
        self.check_action()
    }

    async fn rate_courier(&self, job_id: i64, rating: u8, review: &str) -> Result<(), ClientError> {
        self.check_action()?;
        self.ratings
            .lock()
            .unwrap()
            .push((job_id, rating, review.to_string()));
        Ok(())
    }

    async fn chat_history(&self, _job_id: i64) -> Result<Vec<ChatMessage>, ClientError> {
        Ok(self.chat.lock().unwrap().clone())
    }

    async fn send_chat_message(&self, _job_id: i64, message: &str) -> Result<(), ClientError> {
        self.check_action()?;
        self.chat.lock().unwrap().push(ChatMessage {
            role: ChatRole::Partner,
            text: message.to_string(),
            time: "12:01".to_string(),
        });
        Ok(())
    }

    async fn track_courier(&self, _job_id: i64) -> Result<CourierTrack, ClientError> {
        Ok(self.track.lock().unwrap().clone().unwrap_or(CourierTrack {
            status: "waiting".to_string(),
            lat: None,
            lon: None,
            name: None,
            phone: None,
            job_status: None,
        }))
    }

    async fn register_push_token(&self, token: &str) -> Result<(), ClientError> {
        self.check_action()?;
        self.registered_tokens.lock().unwrap().push(token.to_string());
        Ok(())
    }
}
