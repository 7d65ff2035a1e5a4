use super::ApiClient;
use crate::error::ApiError;
use crate::models::{CheckoutRequest, CheckoutSession, PaymentConfirmation};
use crate::transport::Transport;

impl<T: Transport> ApiClient<T> {
    /// `POST /payment-checkout-session` — returns the hosted checkout URL.
    pub async fn checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, ApiError> {
        self.post("/payment-checkout-session")
            .json(request)
            .fetch()
            .await
    }

    /// `PATCH /payment-success?session_id=` — confirms a completed checkout.
    pub async fn confirm_payment(&self, session_id: &str) -> Result<PaymentConfirmation, ApiError> {
        if session_id.trim().is_empty() {
            return Err(ApiError::Invalid("Missing payment session".to_string()));
        }
        self.patch("/payment-success")
            .query("session_id", session_id)
            .fetch()
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::Session;
    use crate::client::testing::FakeTransport;
    use crate::error::ApiError;
    use crate::models::CheckoutRequest;
    use crate::ApiClient;

    #[tokio::test]
    async fn test_checkout_flow() {
        let transport = FakeTransport::new(|r| {
            if r.url.ends_with("/payment-checkout-session") {
                crate::transport::ApiResponse::new(200, r#"{"url":"https://checkout.test/s/1"}"#)
            } else {
                crate::transport::ApiResponse::new(200, r#"{"isPremium":true,"transactionId":"tx_1"}"#)
            }
        });
        let api = ApiClient::new("http://api.test", transport.clone(), Session::new());

        let session = api
            .checkout_session(&CheckoutRequest {
                email: "ana@example.com".into(),
                name: Some("Ana".into()),
            })
            .await
            .unwrap();
        assert_eq!(session.url, "https://checkout.test/s/1");

        let confirmation = api.confirm_payment("cs_1").await.unwrap();
        assert!(confirmation.is_premium);
        assert_eq!(confirmation.transaction_id.as_deref(), Some("tx_1"));
        assert_eq!(
            transport.last().query,
            vec![("session_id".to_string(), "cs_1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_confirm_requires_session_id() {
        let transport = FakeTransport::always(200, "{}");
        let api = ApiClient::new("http://api.test", transport.clone(), Session::new());
        assert!(matches!(api.confirm_payment(" ").await, Err(ApiError::Invalid(_))));
        assert!(transport.requests.borrow().is_empty());
    }
}
