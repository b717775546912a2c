//! Production HTTP transport for the order service, built on `reqwest`.

use crate::api::types::{
    OrdersResponse, SessionValidationResponse, StatusUpdateRequest, StatusUpdateResponse,
};
use crate::api::{ApiError, DashboardApi};
use crate::model::OrderStatus;
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

const VALIDATE_PATH: &str = "/api/admin/whatsflow-auth";
const ORDERS_PATH: &str = "/api/whatsflow/orders";
const STATUS_PATH: &str = "/api/whatsflow/orders/status";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// `reqwest`-backed implementation of [`DashboardApi`].
///
/// Holds one pooled client; cheap to clone and share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpApi {
    pub fn new(base_url: Url) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client, base_url }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Transport(e.to_string()))
    }
}

#[async_trait]
impl DashboardApi for HttpApi {
    async fn validate_session(
        &self,
        token: &str,
    ) -> Result<SessionValidationResponse, ApiError> {
        let url = self.endpoint(VALIDATE_PATH)?;
        debug!(%url, "validating session");
        let resp = self
            .client
            .get(url)
            .query(&[("sessionToken", token)])
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        let body: SessionValidationResponse = resp.json().await.unwrap_or_default();
        if !status.is_success() {
            let message = body.error.unwrap_or_else(|| "Sessão inválida".to_string());
            return Err(ApiError::server(status.as_u16(), message));
        }
        Ok(body)
    }

    async fn fetch_orders(&self, token: &str) -> Result<OrdersResponse, ApiError> {
        let url = self.endpoint(ORDERS_PATH)?;
        let resp = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        let body: OrdersResponse = resp.json().await.unwrap_or_default();
        if !status.is_success() {
            let message = body
                .error
                .unwrap_or_else(|| "Erro ao carregar pedidos".to_string());
            return Err(ApiError::server(status.as_u16(), message));
        }
        debug!(orders = body.orders.len(), "orders fetched");
        Ok(body)
    }

    async fn update_status(
        &self,
        token: &str,
        order_id: &str,
        target: OrderStatus,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(STATUS_PATH)?;
        let request = StatusUpdateRequest {
            order_id: order_id.to_string(),
            status: target.as_str().to_string(),
        };
        let resp = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        let body: StatusUpdateResponse = resp.json().await.unwrap_or_default();
        if !status.is_success() || !body.success {
            let message = body
                .error
                .unwrap_or_else(|| "Falha ao atualizar status".to_string());
            return Err(ApiError::server(status.as_u16(), message));
        }
        Ok(())
    }
}
