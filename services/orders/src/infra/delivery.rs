use anyhow::Context as _;
use serde_json::json;
use uuid::Uuid;

use crate::domain::repository::DeliveryPort;
use crate::domain::types::Order;
use crate::error::OrdersServiceError;

/// REST client for the delivery service.
#[derive(Clone)]
pub struct HttpDeliveryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDeliveryClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<(), OrdersServiceError> {
        let resp = request.send().await.with_context(|| what.to_owned())?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("{what} returned {status}").into());
        }
        Ok(())
    }
}

impl DeliveryPort for HttpDeliveryClient {
    async fn open_delivery(&self, order: &Order) -> Result<(), OrdersServiceError> {
        let body = json!({
            "orderId": order.id.to_string(),
            "customerId": order.customer_id,
            "restaurantId": order.restaurant_id,
            "customerPhone": order.customer_contact,
            "dropoffAddress": order.delivery_address,
        });
        let request = self
            .client
            .post(format!("{}/orders", self.base_url))
            .json(&body);
        self.send(request, "POST /orders").await
    }

    async fn cancel_delivery(&self, order_id: Uuid) -> Result<(), OrdersServiceError> {
        let request = self
            .client
            .put(format!("{}/orders/{order_id}/status", self.base_url))
            .json(&json!({ "status": "CANCELLED" }));
        self.send(request, "PUT /orders/{orderId}/status").await
    }
}
