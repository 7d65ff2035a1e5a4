//! Lesson, comment and report routes.

use serde_json::json;
use urlencoding::encode;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{
    Comment, Created, Lesson, LessonUpdate, NewComment, NewLesson, NewReport, Report,
    ReportedLesson,
};
use crate::transport::Transport;

impl<T: Transport> ApiClient<T> {
    /// `GET /lessons` — the public feed.
    pub async fn public_lessons(&self) -> Result<Vec<Lesson>, ApiError> {
        self.get("/lessons").fetch().await
    }

    /// `GET /lessons/:id`
    pub async fn lesson(&self, id: &str) -> Result<Lesson, ApiError> {
        self.get(format!("/lessons/{}", encode(id))).fetch().await
    }

    /// `POST /lessons`
    pub async fn create_lesson(&self, lesson: &NewLesson) -> Result<Created, ApiError> {
        self.post("/lessons").json(lesson).fetch().await
    }

    /// `GET /lessons/my-lessons?email=`
    pub async fn my_lessons(&self, email: &str) -> Result<Vec<Lesson>, ApiError> {
        self.get("/lessons/my-lessons")
            .query("email", email)
            .fetch()
            .await
    }

    /// `GET /lessons/saved?email=` — the user's favorites.
    pub async fn saved_lessons(&self, email: &str) -> Result<Vec<Lesson>, ApiError> {
        self.get("/lessons/saved").query("email", email).fetch().await
    }

    /// `GET /lessons/featured`
    pub async fn featured_lessons(&self) -> Result<Vec<Lesson>, ApiError> {
        self.get("/lessons/featured").fetch().await
    }

    /// `GET /lessons/admin` — every lesson, for moderation.
    pub async fn admin_lessons(&self) -> Result<Vec<Lesson>, ApiError> {
        self.get("/lessons/admin").fetch().await
    }

    /// `PATCH /lessons/:id`
    pub async fn update_lesson(&self, id: &str, update: &LessonUpdate) -> Result<(), ApiError> {
        self.patch(format!("/lessons/{}", encode(id)))
            .json(update)
            .execute()
            .await
    }

    /// `PATCH /lessons/:id/trash` — soft delete by the author.
    pub async fn trash_lesson(&self, id: &str) -> Result<(), ApiError> {
        self.patch(format!("/lessons/{}/trash", encode(id))).execute().await
    }

    /// `PATCH /lessons/:id/featured`
    pub async fn set_featured(&self, id: &str, featured: bool) -> Result<(), ApiError> {
        self.patch(format!("/lessons/{}/featured", encode(id)))
            .json(&json!({ "isFeatured": featured }))
            .execute()
            .await
    }

    /// `PATCH /lessons/:id/reviewed`
    pub async fn set_reviewed(&self, id: &str, reviewed: bool) -> Result<(), ApiError> {
        self.patch(format!("/lessons/{}/reviewed", encode(id)))
            .json(&json!({ "isReviewed": reviewed }))
            .execute()
            .await
    }

    /// `DELETE /lessons/:id/admin`
    pub async fn delete_lesson_admin(&self, id: &str) -> Result<(), ApiError> {
        self.delete(format!("/lessons/{}/admin", encode(id))).execute().await
    }

    /// `PATCH /lessons/:id/like` — toggles the caller's like.
    pub async fn toggle_like(&self, id: &str, email: &str) -> Result<(), ApiError> {
        self.patch(format!("/lessons/{}/like", encode(id)))
            .json(&json!({ "email": email }))
            .execute()
            .await
    }

    /// `PATCH /lessons/:id/favorite` — toggles the lesson in the caller's favorites.
    pub async fn toggle_favorite(&self, id: &str, email: &str) -> Result<(), ApiError> {
        self.patch(format!("/lessons/{}/favorite", encode(id)))
            .json(&json!({ "email": email }))
            .execute()
            .await
    }

    /// `POST /lessons/:id/report`
    pub async fn report_lesson(&self, id: &str, report: &NewReport) -> Result<(), ApiError> {
        self.post(format!("/lessons/{}/report", encode(id)))
            .json(report)
            .execute()
            .await
    }

    /// `GET /lessons/:id/reports`
    pub async fn lesson_reports(&self, id: &str) -> Result<Vec<Report>, ApiError> {
        self.get(format!("/lessons/{}/reports", encode(id))).fetch().await
    }

    /// `PATCH /admin/lessons/:id/ignore-reports`
    pub async fn ignore_reports(&self, id: &str) -> Result<(), ApiError> {
        self.patch(format!("/admin/lessons/{}/ignore-reports", encode(id)))
            .execute()
            .await
    }

    /// `GET /admin/reported-lessons`
    pub async fn reported_lessons(&self) -> Result<Vec<ReportedLesson>, ApiError> {
        self.get("/admin/reported-lessons").fetch().await
    }

    /// `GET /lessons/:id/comments`
    pub async fn comments(&self, id: &str) -> Result<Vec<Comment>, ApiError> {
        self.get(format!("/lessons/{}/comments", encode(id))).fetch().await
    }

    /// `POST /lessons/:id/comments`
    pub async fn add_comment(&self, id: &str, comment: &NewComment) -> Result<(), ApiError> {
        self.post(format!("/lessons/{}/comments", encode(id)))
            .json(comment)
            .execute()
            .await
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::json;

    use crate::auth::Session;
    use crate::client::testing::FakeTransport;
    use crate::models::{AccessLevel, NewLesson, NewReport};
    use crate::transport::ApiResponse;
    use crate::ApiClient;

    fn client(transport: &FakeTransport) -> ApiClient<FakeTransport> {
        let session = Session::new();
        session.begin("tok");
        ApiClient::new("http://api.test", transport.clone(), session)
    }

    #[tokio::test]
    async fn test_route_table() {
        let transport = FakeTransport::always(200, "");
        let api = client(&transport);

        api.trash_lesson("l1").await.unwrap();
        api.set_featured("l1", true).await.unwrap();
        api.set_reviewed("l1", false).await.unwrap();
        api.delete_lesson_admin("l1").await.unwrap();
        api.ignore_reports("l1").await.unwrap();

        let sent: Vec<(Method, String)> = transport
            .requests
            .borrow()
            .iter()
            .map(|r| (r.method.clone(), r.url.clone()))
            .collect();
        assert_eq!(
            sent,
            vec![
                (Method::PATCH, "http://api.test/lessons/l1/trash".to_string()),
                (Method::PATCH, "http://api.test/lessons/l1/featured".to_string()),
                (Method::PATCH, "http://api.test/lessons/l1/reviewed".to_string()),
                (Method::DELETE, "http://api.test/lessons/l1/admin".to_string()),
                (
                    Method::PATCH,
                    "http://api.test/admin/lessons/l1/ignore-reports".to_string()
                ),
            ]
        );
        let requests = transport.requests.borrow();
        assert_eq!(requests[1].body, Some(json!({ "isFeatured": true })));
        assert_eq!(requests[2].body, Some(json!({ "isReviewed": false })));
    }

    #[tokio::test]
    async fn test_my_lessons_passes_email_query() {
        let transport = FakeTransport::always(200, r#"[{"_id":"l1","title":"One"}]"#);
        let api = client(&transport);

        let lessons = api.my_lessons("ana@example.com").await.unwrap();
        assert_eq!(lessons.len(), 1);

        let request = transport.last();
        assert_eq!(request.url, "http://api.test/lessons/my-lessons");
        assert_eq!(
            request.query,
            vec![("email".to_string(), "ana@example.com".to_string())]
        );
    }

    #[tokio::test]
    async fn test_create_lesson_body() {
        let transport = FakeTransport::new(|_| ApiResponse::new(201, r#"{"insertedId":"new1"}"#));
        let api = client(&transport);

        let lesson = NewLesson {
            title: "Patience".into(),
            description: "Slow is smooth".into(),
            category: "Mindset".into(),
            emotional_tone: "Realization".into(),
            access_level: AccessLevel::Premium,
            author_email: "ana@example.com".into(),
            ..NewLesson::default()
        };
        let created = api.create_lesson(&lesson).await.unwrap();
        assert_eq!(created.inserted_id.as_deref(), Some("new1"));

        let body = transport.last().body.unwrap();
        assert_eq!(body["emotionalTone"], "Realization");
        assert_eq!(body["accessLevel"], "premium");
        assert_eq!(body["visibility"], "public");
        assert_eq!(body["authorEmail"], "ana@example.com");
    }

    #[tokio::test]
    async fn test_report_and_comments() {
        let transport = FakeTransport::new(|r| {
            if r.method == Method::GET {
                ApiResponse::new(
                    200,
                    r#"[{"_id":"c1","lessonId":"l1","userName":"Bo","comment":"Thanks!"}]"#,
                )
            } else {
                ApiResponse::new(200, r#"{"acknowledged":true}"#)
            }
        });
        let api = client(&transport);

        api.report_lesson(
            "l1",
            &NewReport {
                reason: "Other".into(),
                reporter_email: "bo@example.com".into(),
                reporter_name: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(transport.last().url, "http://api.test/lessons/l1/report");
        assert_eq!(transport.last().body.unwrap()["reporterEmail"], "bo@example.com");

        let comments = api.comments("l1").await.unwrap();
        assert_eq!(comments[0].content, "Thanks!");
        assert_eq!(comments[0].user_name, "Bo");
    }
}
