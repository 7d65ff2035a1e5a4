//! # Backend client
//!
//! [`ApiClient`] is the request layer every view goes through. It resolves paths
//! against the configured base URL, attaches `Authorization: Bearer <token>` from
//! the shared [`Session`] and turns status codes into [`ApiError`]s.
//!
//! A 401 or 403 answer is terminal for the session: the client calls
//! [`Session::expire`] with the generation the request was sent under, which
//! ends the session and notifies the teardown listeners at most once per login.
//! Nothing is retried.
//!
//! The typed route wrappers live in the sibling modules, one `impl` block per
//! backend area (lessons, users, admin, payments).

mod admin;
mod lessons;
mod payments;
mod users;

use std::rc::Rc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::auth::Session;
use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

struct ClientInner<T> {
    base_url: String,
    transport: T,
    session: Session,
}

/// Shared handle to the REST backend.
pub struct ApiClient<T = HttpTransport> {
    inner: Rc<ClientInner<T>>,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> PartialEq for ApiClient<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl ApiClient<HttpTransport> {
    /// Client for the backend named in the configuration.
    pub fn from_config(config: &store::ClientConfig, session: Session) -> Self {
        Self::new(&config.api.base_url, HttpTransport::new(), session)
    }
}

impl<T> ApiClient<T> {
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T, session: Session) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            inner: Rc::new(ClientInner {
                base_url,
                transport,
                session,
            }),
        }
    }

    pub(crate) fn call(&self, method: Method, path: impl Into<String>) -> Call<'_, T> {
        Call {
            client: self,
            method,
            path: path.into(),
            query: Vec::new(),
            body: Ok(None),
        }
    }

    pub(crate) fn get(&self, path: impl Into<String>) -> Call<'_, T> {
        self.call(Method::GET, path)
    }

    pub(crate) fn post(&self, path: impl Into<String>) -> Call<'_, T> {
        self.call(Method::POST, path)
    }

    pub(crate) fn patch(&self, path: impl Into<String>) -> Call<'_, T> {
        self.call(Method::PATCH, path)
    }

    pub(crate) fn delete(&self, path: impl Into<String>) -> Call<'_, T> {
        self.call(Method::DELETE, path)
    }
}

/// One request being assembled.
pub(crate) struct Call<'a, T> {
    client: &'a ApiClient<T>,
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Result<Option<Value>, ApiError>,
}

impl<T: Transport> Call<'_, T> {
    pub(crate) fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub(crate) fn json(mut self, body: &impl Serialize) -> Self {
        self.body = serde_json::to_value(body)
            .map(Some)
            .map_err(ApiError::from);
        self
    }

    pub(crate) async fn send(self) -> Result<ApiResponse, ApiError> {
        let Call {
            client,
            method,
            path,
            query,
            body,
        } = self;
        let body = body?;
        let session = &client.inner.session;
        let ticket = session.ticket();

        let request = ApiRequest {
            method,
            url: format!("{}{}", client.inner.base_url, path),
            query,
            bearer: Some(ticket.token.unwrap_or_default()),
            body,
        };
        tracing::debug!(method = %request.method, %path, "api request");

        let response = client.inner.transport.send(request).await?;
        match response.status {
            401 | 403 => {
                if session.expire(ticket.generation, response.status) {
                    tracing::warn!(status = response.status, %path, "authorization rejected, ending session");
                }
                Err(ApiError::Unauthorized {
                    status: response.status,
                })
            }
            status if !response.is_success() => {
                let message = response.error_message();
                tracing::debug!(status, %path, %message, "api request failed");
                Err(ApiError::Status { status, message })
            }
            _ => Ok(response),
        }
    }

    /// Send and decode the JSON body.
    pub(crate) async fn fetch<R: DeserializeOwned>(self) -> Result<R, ApiError> {
        self.send().await?.json()
    }

    /// Send and discard the body.
    pub(crate) async fn execute(self) -> Result<(), ApiError> {
        self.send().await.map(|_| ())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory transport for exercising the client without a network.

    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::error::ApiError;
    use crate::transport::{ApiRequest, ApiResponse, Transport};

    type Responder = Box<dyn Fn(&ApiRequest) -> ApiResponse>;

    #[derive(Clone)]
    pub struct FakeTransport {
        pub requests: Rc<RefCell<Vec<ApiRequest>>>,
        responder: Rc<Responder>,
    }

    impl FakeTransport {
        pub fn new(responder: impl Fn(&ApiRequest) -> ApiResponse + 'static) -> Self {
            Self {
                requests: Rc::new(RefCell::new(Vec::new())),
                responder: Rc::new(Box::new(responder)),
            }
        }

        /// Answers every request with the same status and body.
        pub fn always(status: u16, body: &'static str) -> Self {
            Self::new(move |_| ApiResponse::new(status, body))
        }

        pub fn last(&self) -> ApiRequest {
            self.requests.borrow().last().cloned().expect("no request sent")
        }
    }

    impl Transport for FakeTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
            self.requests.borrow_mut().push(request.clone());
            // Let sibling requests dispatch before any response arrives
            tokio::task::yield_now().await;
            Ok((self.responder)(&request))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::testing::FakeTransport;
    use super::*;
    use crate::transport::ApiResponse;

    fn client(transport: FakeTransport) -> ApiClient<FakeTransport> {
        ApiClient::new("http://api.test/", transport, Session::new())
    }

    #[tokio::test]
    async fn test_bearer_token_attached() {
        let transport = FakeTransport::always(200, "[]");
        let api = client(transport.clone());
        api.session().begin("tok-123");

        let lessons = api.featured_lessons().await.unwrap();
        assert!(lessons.is_empty());

        let request = transport.last();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url, "http://api.test/lessons/featured");
        assert_eq!(request.bearer.as_deref(), Some("tok-123"));
    }

    #[tokio::test]
    async fn test_no_session_sends_empty_bearer_and_tears_down() {
        let transport = FakeTransport::always(401, "");
        let api = client(transport.clone());
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        api.session().on_teardown(move |_| counter.set(counter.get() + 1));

        let err = api.featured_lessons().await.unwrap_err();
        assert_eq!(err, ApiError::Unauthorized { status: 401 });
        assert_eq!(transport.last().bearer.as_deref(), Some(""));
        assert_eq!(fired.get(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_unauthorized_tears_down_once() {
        let transport = FakeTransport::always(401, r#"{"message":"unauthorized"}"#);
        let api = client(transport.clone());
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        api.session().on_teardown(move |_| counter.set(counter.get() + 1));
        api.session().begin("tok");

        let (a, b, c) = tokio::join!(
            api.my_lessons("ana@example.com"),
            api.saved_lessons("ana@example.com"),
            api.role_of("ana@example.com"),
        );

        assert!(a.unwrap_err().is_unauthorized());
        assert!(b.unwrap_err().is_unauthorized());
        assert!(c.unwrap_err().is_unauthorized());
        assert_eq!(transport.requests.borrow().len(), 3);
        assert_eq!(fired.get(), 1);
        assert!(!api.session().is_active());
    }

    #[tokio::test]
    async fn test_forbidden_also_ends_session() {
        let api = client(FakeTransport::always(403, ""));
        api.session().begin("tok");
        let err = api.admin_stats().await.unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert!(!api.session().is_active());
    }

    #[tokio::test]
    async fn test_other_errors_keep_session() {
        let api = client(FakeTransport::always(404, r#"{"message":"Lesson not found"}"#));
        api.session().begin("tok");

        let err = api.lesson("missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Lesson not found");
        assert!(api.session().is_active());
    }

    #[tokio::test]
    async fn test_decode_error() {
        let api = client(FakeTransport::always(200, r#"{"not":"a list"}"#));
        let err = api.public_lessons().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_transport_error_passes_through() {
        struct Offline;
        impl Transport for Offline {
            async fn send(&self, _: ApiRequest) -> Result<ApiResponse, ApiError> {
                Err(ApiError::Transport("offline".into()))
            }
        }

        let api = ApiClient::new("http://api.test", Offline, Session::new());
        api.session().begin("tok");
        let err = api.users().await.unwrap_err();
        assert_eq!(err, ApiError::Transport("offline".into()));
        assert!(api.session().is_active());
    }
}
