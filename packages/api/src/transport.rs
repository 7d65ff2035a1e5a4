//! # Transport — the single point where bytes leave the client
//!
//! [`Transport`] is the seam between the typed clients ([`crate::ApiClient`],
//! [`crate::auth::IdentityClient`]) and the network. The production
//! implementation, [`HttpTransport`], is a thin wrapper around `reqwest`, which
//! compiles to `fetch` on WASM. Tests substitute an in-memory fake.

use std::future::Future;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// A fully resolved outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    /// `Some` for backend calls, even when the token is empty.
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON. An empty body decodes as `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let text = if self.body.trim().is_empty() {
            "null"
        } else {
            self.body.as_str()
        };
        Ok(serde_json::from_str(text)?)
    }

    /// Best-effort human message from an error body.
    ///
    /// Understands `{"message": ".."}`, `{"error": ".."}` and
    /// `{"error": {"message": ".."}}`, falling back to the status code.
    pub fn error_message(&self) -> String {
        let parsed: Option<Value> = serde_json::from_str(&self.body).ok();
        let message = parsed.as_ref().and_then(|v| {
            v.get("message")
                .and_then(Value::as_str)
                .or_else(|| v.get("error").and_then(Value::as_str))
                .or_else(|| {
                    v.get("error")
                        .and_then(|e| e.get("message"))
                        .and_then(Value::as_str)
                })
        });
        match message {
            Some(m) => m.to_string(),
            None => format!("Request failed with status {}", self.status),
        }
    }
}

/// Async interface for sending a request and collecting the response.
pub trait Transport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, ApiError>>;
}

/// `reqwest`-backed transport.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut builder = self.client.request(request.method, &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body {
            builder = builder.json(&body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_decodes_as_unit() {
        let response = ApiResponse::new(204, "");
        assert!(response.json::<()>().is_ok());
        assert!(response.json::<Vec<String>>().is_err());
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(
            ApiResponse::new(400, r#"{"message":"Title is required"}"#).error_message(),
            "Title is required"
        );
        assert_eq!(
            ApiResponse::new(409, r#"{"error":"Already reported"}"#).error_message(),
            "Already reported"
        );
        assert_eq!(
            ApiResponse::new(400, r#"{"error":{"code":400,"message":"EMAIL_EXISTS"}}"#)
                .error_message(),
            "EMAIL_EXISTS"
        );
        assert_eq!(
            ApiResponse::new(502, "<html>bad gateway</html>").error_message(),
            "Request failed with status 502"
        );
    }
}
