use super::ApiClient;
use crate::error::ApiError;
use crate::models::{AdminProfile, AdminStats};
use crate::transport::Transport;

impl<T: Transport> ApiClient<T> {
    /// `GET /admin/stats`
    pub async fn admin_stats(&self) -> Result<AdminStats, ApiError> {
        self.get("/admin/stats").fetch().await
    }

    /// `GET /admin/profile`
    pub async fn admin_profile(&self) -> Result<AdminProfile, ApiError> {
        self.get("/admin/profile").fetch().await
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::Session;
    use crate::client::testing::FakeTransport;
    use crate::ApiClient;

    #[tokio::test]
    async fn test_admin_profile_flattens_user() {
        let transport = FakeTransport::always(
            200,
            r#"{"_id":"a1","email":"root@example.com","name":"Root","role":"admin","lessonsReviewed":4}"#,
        );
        let api = ApiClient::new("http://api.test", transport, Session::new());

        let profile = api.admin_profile().await.unwrap();
        assert_eq!(profile.user.display_name(), "Root");
        assert!(profile.user.role.is_admin());
        assert_eq!(profile.lessons_reviewed, 4);
        assert_eq!(profile.lessons_featured, 0);
    }
}
