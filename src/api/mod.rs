pub mod http;
#[cfg(test)]
pub mod mock;

use std::future::Future;

use crate::error::ClientError;
use crate::models::chat::ChatMessage;
use crate::models::order::{OrderDraft, PartnerOrder};
use crate::models::track::CourierTrack;

/// The seam between the sync core and the partner REST backend. The real
/// transport is [`http::HttpPartnerApi`]; tests substitute a fake.
///
/// Futures are `Send` because the poll loop drives them from a spawned task.
pub trait PartnerApi: Send + Sync + 'static {
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn fetch_orders(&self) -> impl Future<Output = Result<Vec<PartnerOrder>, ClientError>> + Send;

    fn create_order(&self, draft: &OrderDraft)
    -> impl Future<Output = Result<(), ClientError>> + Send;

    fn mark_ready(&self, job_id: i64) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn boost_order(
        &self,
        job_id: i64,
        amount: f64,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn confirm_return(&self, job_id: i64) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn rate_courier(
        &self,
        job_id: i64,
        rating: u8,
        review: &str,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn chat_history(
        &self,
        job_id: i64,
    ) -> impl Future<Output = Result<Vec<ChatMessage>, ClientError>> + Send;

    fn send_chat_message(
        &self,
        job_id: i64,
        message: &str,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn track_courier(
        &self,
        job_id: i64,
    ) -> impl Future<Output = Result<CourierTrack, ClientError>> + Send;

    fn register_push_token(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}
