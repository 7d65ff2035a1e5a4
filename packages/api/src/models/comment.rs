use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment under a lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub lesson_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub user_photo: Option<String>,
    #[serde(alias = "comment")]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /lessons/:id/comments`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub user_name: String,
    pub user_email: String,
    pub user_photo: Option<String>,
    pub content: String,
}
