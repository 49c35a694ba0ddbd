use std::time::Duration;

use reqwest::{Response, StatusCode};

use crate::api::PartnerApi;
use crate::config::Config;
use crate::error::ClientError;
use crate::models::chat::ChatMessage;
use crate::models::order::{OrderDraft, PartnerOrder, PaymentType};
use crate::models::track::CourierTrack;

/// Partner REST backend over `reqwest`. The session cookie set by the login
/// endpoint lives in the client's cookie store and rides on every subsequent
/// request; order operations never touch it.
pub struct HttpPartnerApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpPartnerApi {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|err| ClientError::Config(format!("failed to build http client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_form(&self, path: &str, form: &[(&str, String)]) -> Result<(), ClientError> {
        let response = self.http.post(self.url(path)).form(form).send().await?;
        expect_ok(response)?;
        Ok(())
    }
}

fn expect_ok(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ClientError::Rejected(status.as_u16()))
    }
}

fn payment_type_field(payment_type: &PaymentType) -> &'static str {
    match payment_type {
        PaymentType::Prepaid => "prepaid",
        PaymentType::Cash => "cash",
        PaymentType::Buyout => "buyout",
        PaymentType::Other => "other",
    }
}

impl PartnerApi for HttpPartnerApi {
    async fn login(&self, email: &str, password: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/api/partner/login_native"))
            .form(&[("email", email), ("password", password)])
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClientError::InvalidCredentials),
            status => Err(ClientError::Rejected(status.as_u16())),
        }
    }

    async fn fetch_orders(&self) -> Result<Vec<PartnerOrder>, ClientError> {
        let response = self
            .http
            .get(self.url("/api/partner/orders_native"))
            .send()
            .await?;

        Ok(expect_ok(response)?.json().await?)
    }

    async fn create_order(&self, draft: &OrderDraft) -> Result<(), ClientError> {
        self.post_form(
            "/api/partner/create_order_native",
            &[
                ("dropoff_address", draft.dropoff_address.clone()),
                ("customer_phone", draft.customer_phone.clone()),
                ("order_price", draft.order_price.to_string()),
                ("delivery_fee", draft.delivery_fee.to_string()),
                ("comment", draft.comment.clone()),
                (
                    "payment_type",
                    payment_type_field(&draft.payment_type).to_string(),
                ),
                ("is_return_required", draft.is_return_required.to_string()),
            ],
        )
        .await
    }

    async fn mark_ready(&self, job_id: i64) -> Result<(), ClientError> {
        self.post_form("/api/partner/order_ready", &[("job_id", job_id.to_string())])
            .await
    }

    async fn boost_order(&self, job_id: i64, amount: f64) -> Result<(), ClientError> {
        self.post_form(
            "/api/partner/boost_order",
            &[("job_id", job_id.to_string()), ("amount", amount.to_string())],
        )
        .await
    }

    async fn confirm_return(&self, job_id: i64) -> Result<(), ClientError> {
        self.post_form(
            "/api/partner/confirm_return",
            &[("job_id", job_id.to_string())],
        )
        .await
    }

    async fn rate_courier(&self, job_id: i64, rating: u8, review: &str) -> Result<(), ClientError> {
        self.post_form(
            "/api/partner/rate_courier",
            &[
                ("job_id", job_id.to_string()),
                ("rating", rating.to_string()),
                ("review", review.to_string()),
            ],
        )
        .await
    }

    async fn chat_history(&self, job_id: i64) -> Result<Vec<ChatMessage>, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/api/chat/history/{job_id}")))
            .send()
            .await?;

        Ok(expect_ok(response)?.json().await?)
    }

    async fn send_chat_message(&self, job_id: i64, message: &str) -> Result<(), ClientError> {
        self.post_form(
            "/api/chat/send",
            &[
                ("job_id", job_id.to_string()),
                ("message", message.to_string()),
                ("role", "partner".to_string()),
            ],
        )
        .await
    }

    async fn track_courier(&self, job_id: i64) -> Result<CourierTrack, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/api/partner/track_courier/{job_id}")))
            .send()
            .await?;

        Ok(expect_ok(response)?.json().await?)
    }

    async fn register_push_token(&self, token: &str) -> Result<(), ClientError> {
        self.post_form("/api/partner/fcm_token", &[("token", token.to_string())])
            .await
    }
}
