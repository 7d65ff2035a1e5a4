use serde::{Deserialize, Serialize};

use super::user::User;

/// Platform totals shown on the admin dashboard (`GET /admin/stats`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub premium_users: u64,
    #[serde(default)]
    pub total_lessons: u64,
    #[serde(default)]
    pub public_lessons: u64,
    #[serde(default)]
    pub private_lessons: u64,
    #[serde(default)]
    pub reported_lessons: u64,
    #[serde(default)]
    pub todays_lessons: u64,
}

/// `GET /admin/profile`: the admin's own record plus moderation activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub lessons_reviewed: u64,
    #[serde(default)]
    pub lessons_featured: u64,
    #[serde(default)]
    pub reports_resolved: u64,
}
