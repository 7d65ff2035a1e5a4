//! # Google sign-in (browser redirect flow)
//!
//! Federated login without a popup SDK:
//!
//! 1. The login page creates a [`PendingSignIn`] (random `state` and `nonce`
//!    plus the path to return to) and keeps it in session storage.
//! 2. **[`authorization_url`]** builds the Google consent URL requesting an
//!    `id_token` (OAuth implicit flow) with the `openid email profile` scopes.
//! 3. Google redirects back to the configured `redirect_uri` with the token in the
//!    URL fragment. **[`parse_callback`]** extracts it and
//!    [`GoogleCallback::verify`] checks it against the stored attempt: the
//!    `state` must match and the token's `nonce` claim must be ours.
//! 4. The token is exchanged for an identity session with
//!    [`IdentityClient::sign_in_with_google`](super::IdentityClient::sign_in_with_google).

use base64::Engine as _;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// A sign-in this browser started and has not finished yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingSignIn {
    pub state: String,
    pub nonce: String,
    pub return_to: String,
}

/// What Google handed back on the redirect.
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleCallback {
    pub id_token: String,
    /// The `state` sent with the authorization request.
    pub state: Option<String>,
}

impl GoogleCallback {
    /// Accept the callback only if it answers `pending`.
    pub fn verify(&self, pending: Option<&PendingSignIn>) -> Result<(), ApiError> {
        let Some(pending) = pending else {
            return Err(ApiError::Identity(
                "No Google sign-in was started from this browser".to_string(),
            ));
        };
        if self.state.as_deref() != Some(pending.state.as_str()) {
            tracing::warn!("google callback state mismatch");
            return Err(ApiError::Identity(
                "Google sign-in could not be verified, please try again".to_string(),
            ));
        }
        match token_nonce(&self.id_token) {
            Some(nonce) if nonce == pending.nonce => Ok(()),
            _ => {
                tracing::warn!("google id token nonce mismatch");
                Err(ApiError::Identity(
                    "Google sign-in could not be verified, please try again".to_string(),
                ))
            }
        }
    }
}

/// The `nonce` claim of an unverified JWT. Signature checks are left to the
/// identity provider.
fn token_nonce(id_token: &str) -> Option<String> {
    let payload = id_token.split('.').nth(1)?;
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("nonce")?.as_str().map(str::to_string)
}

/// Build the Google authorization URL for `pending`.
pub fn authorization_url(
    client_id: &str,
    redirect_uri: &str,
    pending: &PendingSignIn,
) -> Result<String, ApiError> {
    let url = Url::parse_with_params(
        GOOGLE_AUTH_URL,
        &[
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("response_type", "id_token"),
            ("scope", "openid email profile"),
            ("nonce", pending.nonce.as_str()),
            ("state", pending.state.as_str()),
            ("prompt", "select_account"),
        ],
    )
    .map_err(|e| ApiError::Invalid(e.to_string()))?;
    Ok(url.to_string())
}

/// Parse the fragment (with or without the leading `#`) of the redirect URL.
pub fn parse_callback(fragment: &str) -> Result<GoogleCallback, ApiError> {
    let fragment = fragment.trim_start_matches('#');
    // Reuse the query parser for the fragment's form encoding
    let url = Url::parse(&format!("http://callback.invalid/?{fragment}"))
        .map_err(|e| ApiError::Invalid(e.to_string()))?;

    let mut id_token = None;
    let mut state = None;
    let mut error = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "id_token" => id_token = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Err(ApiError::Identity(format!("Google sign-in failed ({error})")));
    }
    match id_token {
        Some(id_token) if !id_token.is_empty() => Ok(GoogleCallback { id_token, state }),
        _ => Err(ApiError::Identity(
            "Google sign-in did not return a token".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> PendingSignIn {
        PendingSignIn {
            state: "5f2c9e".to_string(),
            nonce: "n0nce".to_string(),
            return_to: "/dashboard/add-lesson".to_string(),
        }
    }

    fn id_token(claims: serde_json::Value) -> String {
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        format!(
            "{}.{}.sig",
            engine.encode(r#"{"alg":"RS256"}"#),
            engine.encode(claims.to_string())
        )
    }

    #[test]
    fn test_authorization_url_params() {
        let url = authorization_url(
            "cid.apps.googleusercontent.com",
            "http://localhost:8080/auth/callback",
            &pending(),
        )
        .unwrap();
        let parsed = Url::parse(&url).unwrap();
        assert_eq!(parsed.host_str(), Some("accounts.google.com"));

        let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("response_type".into(), "id_token".into())));
        assert!(pairs.contains(&("scope".into(), "openid email profile".into())));
        assert!(pairs.contains(&("state".into(), "5f2c9e".into())));
        assert!(pairs.contains(&("nonce".into(), "n0nce".into())));
        assert!(!url.contains("add-lesson"));
        assert!(pairs.contains(&(
            "redirect_uri".into(),
            "http://localhost:8080/auth/callback".into()
        )));
    }

    #[test]
    fn test_parse_callback() {
        let callback = parse_callback("#state=5f2c9e&id_token=abc.def.ghi&authuser=0").unwrap();
        assert_eq!(callback.id_token, "abc.def.ghi");
        assert_eq!(callback.state.as_deref(), Some("5f2c9e"));
    }

    #[test]
    fn test_verify_accepts_matching_state_and_nonce() {
        let callback = GoogleCallback {
            id_token: id_token(serde_json::json!({ "email": "ana@example.com", "nonce": "n0nce" })),
            state: Some("5f2c9e".to_string()),
        };
        assert_eq!(callback.verify(Some(&pending())), Ok(()));
    }

    #[test]
    fn test_verify_rejects_foreign_callbacks() {
        let token = id_token(serde_json::json!({ "nonce": "n0nce" }));

        // Not started from this browser
        let callback = GoogleCallback {
            id_token: token.clone(),
            state: Some("5f2c9e".to_string()),
        };
        assert!(callback.verify(None).is_err());

        // Wrong or missing state
        for state in [Some("attacker".to_string()), None] {
            let callback = GoogleCallback {
                id_token: token.clone(),
                state,
            };
            assert!(matches!(
                callback.verify(Some(&pending())),
                Err(ApiError::Identity(_))
            ));
        }

        // Token minted for another request
        for token in [
            id_token(serde_json::json!({ "nonce": "other" })),
            id_token(serde_json::json!({ "email": "ana@example.com" })),
            "not-a-jwt".to_string(),
        ] {
            let callback = GoogleCallback {
                id_token: token,
                state: Some("5f2c9e".to_string()),
            };
            assert!(callback.verify(Some(&pending())).is_err());
        }
    }

    #[test]
    fn test_parse_callback_errors() {
        assert!(matches!(
            parse_callback("error=access_denied"),
            Err(ApiError::Identity(m)) if m.contains("access_denied")
        ));
        assert!(parse_callback("").is_err());
        assert!(parse_callback("id_token=").is_err());
    }
}
