use serde::{Deserialize, Serialize};

/// Body of `POST /payment-checkout-session`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub email: String,
    pub name: Option<String>,
}

/// The hosted checkout page the browser is sent to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckoutSession {
    pub url: String,
}

/// Response of `PATCH /payment-success`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub transaction_id: Option<String>,
}
