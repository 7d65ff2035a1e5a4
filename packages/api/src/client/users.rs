//! User and role routes.

use serde_json::json;
use urlencoding::encode;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{NewUser, PremiumResponse, ProfileUpdate, Role, RoleResponse, User};
use crate::transport::Transport;

impl<T: Transport> ApiClient<T> {
    /// `GET /users`
    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.get("/users").fetch().await
    }

    /// `POST /users` — creates the record on first login, no-op afterwards.
    pub async fn save_user(&self, user: &NewUser) -> Result<(), ApiError> {
        self.post("/users").json(user).execute().await
    }

    /// `GET /users/:email`
    pub async fn user(&self, email: &str) -> Result<User, ApiError> {
        self.get(format!("/users/{}", encode(email))).fetch().await
    }

    /// `PATCH /users/:id/role`
    pub async fn set_role(&self, id: &str, role: Role) -> Result<(), ApiError> {
        self.patch(format!("/users/{}/role", encode(id)))
            .json(&json!({ "role": role }))
            .execute()
            .await
    }

    /// `DELETE /users/:id`
    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.delete(format!("/users/{}", encode(id))).execute().await
    }

    /// `GET /users/:email/role`
    pub async fn role_of(&self, email: &str) -> Result<Role, ApiError> {
        let response: RoleResponse = self
            .get(format!("/users/{}/role", encode(email)))
            .fetch()
            .await?;
        Ok(response.role)
    }

    /// `GET /users/:email/isPremium`
    pub async fn is_premium(&self, email: &str) -> Result<bool, ApiError> {
        let response: PremiumResponse = self
            .get(format!("/users/{}/isPremium", encode(email)))
            .fetch()
            .await?;
        Ok(response.is_premium)
    }

    /// `PATCH /users/profile`
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError> {
        self.patch("/users/profile").json(update).execute().await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::auth::Session;
    use crate::client::testing::FakeTransport;
    use crate::models::Role;
    use crate::transport::ApiResponse;
    use crate::ApiClient;

    #[tokio::test]
    async fn test_role_and_premium_lookup() {
        let transport = FakeTransport::new(|r| {
            if r.url.ends_with("/role") {
                ApiResponse::new(200, r#"{"role":"admin"}"#)
            } else {
                ApiResponse::new(200, r#"{"isPremium":true}"#)
            }
        });
        let api = ApiClient::new("http://api.test", transport.clone(), Session::new());

        assert_eq!(api.role_of("ana@example.com").await.unwrap(), Role::Admin);
        assert!(api.is_premium("ana@example.com").await.unwrap());
        assert_eq!(
            transport.last().url,
            "http://api.test/users/ana%40example.com/isPremium"
        );
    }

    #[tokio::test]
    async fn test_reserved_characters_stay_in_one_segment() {
        let transport = FakeTransport::always(200, r#"{"role":"user"}"#);
        let api = ApiClient::new("http://api.test", transport.clone(), Session::new());

        api.role_of("a#b@example.com").await.unwrap();
        assert_eq!(
            transport.last().url,
            "http://api.test/users/a%23b%40example.com/role"
        );

        api.role_of("a?b/c@example.com").await.unwrap();
        let url = reqwest::Url::parse(&transport.last().url).unwrap();
        assert_eq!(url.path(), "/users/a%3Fb%2Fc%40example.com/role");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[tokio::test]
    async fn test_missing_role_defaults_to_user() {
        let api = ApiClient::new("http://api.test", FakeTransport::always(200, "{}"), Session::new());
        assert_eq!(api.role_of("bo@example.com").await.unwrap(), Role::User);
    }

    #[tokio::test]
    async fn test_set_role_body() {
        let transport = FakeTransport::always(200, "");
        let api = ApiClient::new("http://api.test", transport.clone(), Session::new());
        api.set_role("u1", Role::Admin).await.unwrap();

        let request = transport.last();
        assert_eq!(request.url, "http://api.test/users/u1/role");
        assert_eq!(request.body, Some(json!({ "role": "admin" })));
    }
}
