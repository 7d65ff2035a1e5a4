//! # Identity provider client
//!
//! Talks to the Firebase Identity Toolkit REST API, which issues the ID token the
//! backend accepts as a bearer token.
//!
//! | Method | Endpoint |
//! |--------|----------|
//! | [`sign_in_with_password`](IdentityClient::sign_in_with_password) | `accounts:signInWithPassword` |
//! | [`sign_up`](IdentityClient::sign_up) | `accounts:signUp` |
//! | [`sign_in_with_google`](IdentityClient::sign_in_with_google) | `accounts:signInWithIdp` |
//! | [`update_profile`](IdentityClient::update_profile) | `accounts:update` |
//!
//! Provider error codes (`EMAIL_EXISTS`, `INVALID_PASSWORD`, ...) are mapped to
//! sentences a form can display, see [`friendly_message`].

use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::transport::{ApiRequest, HttpTransport, Transport};

/// The account and tokens returned by a successful sign-in or sign-up.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySession {
    pub id_token: String,
    pub email: String,
    pub local_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Result of `accounts:update`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProfile {
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Identity Toolkit client.
#[derive(Clone, Debug)]
pub struct IdentityClient<T = HttpTransport> {
    base_url: String,
    api_key: String,
    transport: T,
}

impl IdentityClient<HttpTransport> {
    pub fn from_config(config: &store::ClientConfig) -> Self {
        Self::new(
            &config.identity.base_url,
            &config.identity.api_key,
            HttpTransport::new(),
        )
    }
}

impl<T: Transport> IdentityClient<T> {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            transport,
        }
    }

    /// Email and password sign-in.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentitySession, ApiError> {
        let body = json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        self.call("accounts:signInWithPassword", body).await
    }

    /// Create an email and password account; the new account is signed in.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<IdentitySession, ApiError> {
        let body = json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        self.call("accounts:signUp", body).await
    }

    /// Exchange a Google ID token (from the OAuth redirect) for a session.
    pub async fn sign_in_with_google(
        &self,
        google_id_token: &str,
        request_uri: &str,
    ) -> Result<IdentitySession, ApiError> {
        let body = json!({
            "postBody": format!("id_token={google_id_token}&providerId=google.com"),
            "requestUri": request_uri,
            "returnSecureToken": true,
            "returnIdpCredential": true,
        });
        self.call("accounts:signInWithIdp", body).await
    }

    /// Set the display name and photo of the signed-in account.
    pub async fn update_profile(
        &self,
        id_token: &str,
        display_name: &str,
        photo_url: Option<&str>,
    ) -> Result<IdentityProfile, ApiError> {
        let mut body = json!({
            "idToken": id_token,
            "displayName": display_name,
            "returnSecureToken": true,
        });
        match photo_url {
            Some(url) => body["photoUrl"] = Value::from(url),
            None => body["deleteAttribute"] = json!(["PHOTO_URL"]),
        }
        self.call("accounts:update", body).await
    }

    async fn call<R: serde::de::DeserializeOwned>(
        &self,
        operation: &str,
        body: Value,
    ) -> Result<R, ApiError> {
        if self.api_key.is_empty() {
            return Err(ApiError::Identity(
                "Sign-in is not configured for this site".to_string(),
            ));
        }

        let request = ApiRequest {
            method: Method::POST,
            url: format!("{}/{operation}", self.base_url),
            query: vec![("key".to_string(), self.api_key.clone())],
            bearer: None,
            body: Some(body),
        };
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            let code = response.error_message();
            tracing::debug!(operation, status = response.status, %code, "identity request failed");
            return Err(ApiError::Identity(friendly_message(&code)));
        }
        response.json()
    }
}

/// Map an Identity Toolkit error code to a sentence for the user.
///
/// Codes may carry a detail suffix (`"WEAK_PASSWORD : Password should be..."`);
/// only the code before ` : ` is matched.
pub fn friendly_message(code: &str) -> String {
    let key = code.split(" : ").next().unwrap_or(code).trim();
    let message = match key {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Invalid email or password"
        }
        "EMAIL_EXISTS" => "An account with this email already exists",
        "USER_DISABLED" => "This account has been disabled",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts, please try again later",
        "WEAK_PASSWORD" => "Password should be at least 6 characters",
        "INVALID_EMAIL" => "Please enter a valid email",
        "INVALID_IDP_RESPONSE" => "Google sign-in failed, please try again",
        "TOKEN_EXPIRED" | "INVALID_ID_TOKEN" => "Your session has expired, please log in again",
        _ => return format!("Authentication failed ({key})"),
    };
    message.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::FakeTransport;
    use crate::transport::ApiResponse;

    fn identity(transport: &FakeTransport) -> IdentityClient<FakeTransport> {
        IdentityClient::new("https://id.test/v1/", "key-1", transport.clone())
    }

    #[tokio::test]
    async fn test_password_sign_in() {
        let transport = FakeTransport::always(
            200,
            r#"{"idToken":"jwt","email":"ana@example.com","localId":"u1","displayName":"Ana"}"#,
        );
        let session = identity(&transport)
            .sign_in_with_password("ana@example.com", "Secret1")
            .await
            .unwrap();

        assert_eq!(session.id_token, "jwt");
        assert_eq!(session.display_name.as_deref(), Some("Ana"));

        let request = transport.last();
        assert_eq!(request.url, "https://id.test/v1/accounts:signInWithPassword");
        assert_eq!(request.query, vec![("key".to_string(), "key-1".to_string())]);
        assert_eq!(request.bearer, None);
        assert_eq!(request.body.unwrap()["returnSecureToken"], true);
    }

    #[tokio::test]
    async fn test_error_codes_are_translated() {
        let transport = FakeTransport::new(|_| {
            ApiResponse::new(400, r#"{"error":{"code":400,"message":"EMAIL_EXISTS"}}"#)
        });
        let err = identity(&transport)
            .sign_up("ana@example.com", "Secret1")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Identity("An account with this email already exists".to_string())
        );
    }

    #[tokio::test]
    async fn test_google_exchange_body() {
        let transport = FakeTransport::always(
            200,
            r#"{"idToken":"jwt","email":"g@example.com","localId":"g1","photoUrl":"https://p"}"#,
        );
        let session = identity(&transport)
            .sign_in_with_google("google-token", "http://localhost:8080/auth/callback")
            .await
            .unwrap();
        assert_eq!(session.photo_url.as_deref(), Some("https://p"));

        let body = transport.last().body.unwrap();
        assert_eq!(body["postBody"], "id_token=google-token&providerId=google.com");
        assert_eq!(body["requestUri"], "http://localhost:8080/auth/callback");
    }

    #[tokio::test]
    async fn test_update_profile_without_photo_deletes_attribute() {
        let transport = FakeTransport::always(200, r#"{"displayName":"Ana B"}"#);
        let profile = identity(&transport)
            .update_profile("jwt", "Ana B", None)
            .await
            .unwrap();
        assert_eq!(profile.display_name.as_deref(), Some("Ana B"));
        assert_eq!(transport.last().body.unwrap()["deleteAttribute"][0], "PHOTO_URL");
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let transport = FakeTransport::always(200, "{}");
        let client = IdentityClient::new("https://id.test/v1", "", transport.clone());
        assert!(client.sign_in_with_password("a@b.c", "x").await.is_err());
        assert!(transport.requests.borrow().is_empty());
    }

    #[test]
    fn test_friendly_message_detail_suffix() {
        assert_eq!(
            friendly_message("WEAK_PASSWORD : Password should be at least 6 characters"),
            "Password should be at least 6 characters"
        );
        assert_eq!(friendly_message("SOMETHING_NEW"), "Authentication failed (SOMETHING_NEW)");
    }
}
