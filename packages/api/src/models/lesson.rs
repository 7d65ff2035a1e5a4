//! # Lesson records
//!
//! | Type | Used for |
//! |------|----------|
//! | [`Lesson`] | Every lesson list and the detail view. Counters and moderation flags default when absent. |
//! | [`NewLesson`] | Body of `POST /lessons`; the only place author fields are sent. |
//! | [`LessonUpdate`] | Body of `PATCH /lessons/:id`; deliberately has no author fields. |
//!
//! Categories and emotional tones are plain strings on the wire; the fixed option
//! lists the forms offer are [`CATEGORIES`] and [`EMOTIONAL_TONES`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const CATEGORIES: &[&str] = &[
    "Personal Growth",
    "Career",
    "Relationships",
    "Mindset",
    "Mistakes Learned",
];

pub const EMOTIONAL_TONES: &[&str] = &["Motivational", "Sad", "Realization", "Gratitude"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    pub const ALL: [Visibility; 2] = [Visibility::Public, Visibility::Private];

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Visibility::Public => "Public",
            Visibility::Private => "Private",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    #[default]
    Free,
    Premium,
}

impl AccessLevel {
    pub const ALL: [AccessLevel; 2] = [AccessLevel::Free, AccessLevel::Premium];

    pub fn as_str(self) -> &'static str {
        match self {
            AccessLevel::Free => "free",
            AccessLevel::Premium => "premium",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AccessLevel::Free => "Free",
            AccessLevel::Premium => "Premium",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

/// A lesson as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub emotional_tone: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub access_level: AccessLevel,

    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub author_email: String,
    #[serde(default)]
    pub author_photo: Option<String>,

    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub favorites_count: u64,
    #[serde(default)]
    pub reports_count: u64,
    /// Emails of users who liked the lesson.
    #[serde(default)]
    pub likes: Vec<String>,
    /// Emails of users who saved the lesson.
    #[serde(default)]
    pub favorites: Vec<String>,

    #[serde(default)]
    pub is_flagged: bool,
    #[serde(default)]
    pub is_reviewed: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_deleted: bool,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Lesson {
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_premium(&self) -> bool {
        self.access_level == AccessLevel::Premium
    }

    /// Flagged by moderation or carrying at least one report.
    pub fn is_reported(&self) -> bool {
        self.is_flagged || self.reports_count > 0
    }

    /// Premium lessons are locked for non-premium viewers other than the author.
    pub fn is_locked_for(&self, viewer_email: Option<&str>, viewer_premium: bool) -> bool {
        self.is_premium() && !viewer_premium && viewer_email != Some(self.author_email.as_str())
    }

    pub fn is_authored_by(&self, email: &str) -> bool {
        self.author_email == email
    }

    pub fn liked_by(&self, email: &str) -> bool {
        self.likes.iter().any(|e| e == email)
    }

    pub fn favorited_by(&self, email: &str) -> bool {
        self.favorites.iter().any(|e| e == email)
    }

    /// Add or remove `email` from the likers. Returns whether it is now liked.
    pub fn toggle_like(&mut self, email: &str) -> bool {
        toggle_member(&mut self.likes, &mut self.likes_count, email)
    }

    /// Add or remove `email` from the savers. Returns whether it is now saved.
    pub fn toggle_favorite(&mut self, email: &str) -> bool {
        toggle_member(&mut self.favorites, &mut self.favorites_count, email)
    }

    /// First `max_chars` characters of the description, with an ellipsis when cut.
    pub fn excerpt(&self, max_chars: usize) -> String {
        let mut chars = self.description.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{}…", head.trim_end())
        } else {
            head
        }
    }
}

fn toggle_member(members: &mut Vec<String>, count: &mut u64, email: &str) -> bool {
    if let Some(pos) = members.iter().position(|e| e == email) {
        members.remove(pos);
        *count = count.saturating_sub(1);
        false
    } else {
        members.push(email.to_string());
        *count += 1;
        true
    }
}

/// Body of `POST /lessons`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLesson {
    pub title: String,
    pub description: String,
    pub category: String,
    pub emotional_tone: String,
    pub image: Option<String>,
    pub visibility: Visibility,
    pub access_level: AccessLevel,
    pub author_name: String,
    pub author_email: String,
    pub author_photo: Option<String>,
}

/// Body of `PATCH /lessons/:id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonUpdate {
    pub title: String,
    pub description: String,
    pub category: String,
    pub emotional_tone: String,
    pub image: Option<String>,
    pub visibility: Visibility,
    pub access_level: AccessLevel,
}

impl From<&Lesson> for LessonUpdate {
    fn from(lesson: &Lesson) -> Self {
        Self {
            title: lesson.title.clone(),
            description: lesson.description.clone(),
            category: lesson.category.clone(),
            emotional_tone: lesson.emotional_tone.clone(),
            image: lesson.image.clone(),
            visibility: lesson.visibility,
            access_level: lesson.access_level,
        }
    }
}

impl LessonUpdate {
    /// Apply the edit to a cached copy of the lesson.
    pub fn apply_to(&self, lesson: &mut Lesson) {
        lesson.title = self.title.clone();
        lesson.description = self.description.clone();
        lesson.category = self.category.clone();
        lesson.emotional_tone = self.emotional_tone.clone();
        lesson.image = self.image.clone();
        lesson.visibility = self.visibility;
        lesson.access_level = self.access_level;
    }
}

/// Response of `POST /lessons`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Created {
    #[serde(default)]
    pub inserted_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(id: &str) -> Lesson {
        serde_json::from_value(serde_json::json!({ "_id": id, "title": id })).unwrap()
    }

    #[test]
    fn test_sparse_lesson_defaults() {
        let l = lesson("a");
        assert_eq!(l.visibility, Visibility::Public);
        assert_eq!(l.access_level, AccessLevel::Free);
        assert_eq!(l.likes_count, 0);
        assert!(!l.is_featured);
        assert!(l.created_at.is_none());
    }

    #[test]
    fn test_full_lesson_json() {
        let l: Lesson = serde_json::from_str(
            r#"{
                "_id": "l1",
                "title": "Failing forward",
                "description": "What I learned",
                "category": "Career",
                "emotionalTone": "Realization",
                "visibility": "private",
                "accessLevel": "premium",
                "authorEmail": "ana@example.com",
                "likes": ["bo@example.com"],
                "likesCount": 1,
                "isFeatured": true,
                "createdAt": "2025-03-01T10:00:00.000Z"
            }"#,
        )
        .unwrap();

        assert!(!l.is_public());
        assert!(l.is_premium());
        assert_eq!(l.emotional_tone, "Realization");
        assert!(l.liked_by("bo@example.com"));
        assert!(!l.favorited_by("bo@example.com"));
        assert!(l.is_featured);
    }

    #[test]
    fn test_premium_lock() {
        let mut l = lesson("p");
        l.access_level = AccessLevel::Premium;
        l.author_email = "author@example.com".into();

        assert!(l.is_locked_for(None, false));
        assert!(l.is_locked_for(Some("reader@example.com"), false));
        assert!(!l.is_locked_for(Some("reader@example.com"), true));
        assert!(!l.is_locked_for(Some("author@example.com"), false));

        l.access_level = AccessLevel::Free;
        assert!(!l.is_locked_for(None, false));
    }

    #[test]
    fn test_toggle_like_and_favorite() {
        let mut l = lesson("t");
        assert!(l.toggle_like("bo@example.com"));
        assert_eq!(l.likes_count, 1);
        assert!(l.liked_by("bo@example.com"));
        assert!(!l.toggle_like("bo@example.com"));
        assert_eq!(l.likes_count, 0);

        l.favorites_count = 0;
        l.favorites = vec!["bo@example.com".into()];
        assert!(!l.toggle_favorite("bo@example.com"));
        assert_eq!(l.favorites_count, 0);
        assert!(l.toggle_favorite("ana@example.com"));
        assert_eq!(l.favorites_count, 1);
    }

    #[test]
    fn test_excerpt() {
        let mut l = lesson("e");
        l.description = "short".into();
        assert_eq!(l.excerpt(10), "short");
        l.description = "a rather long description".into();
        assert_eq!(l.excerpt(8), "a rather…");
    }

    #[test]
    fn test_update_serialises_without_author() {
        let mut l = lesson("u");
        l.author_email = "ana@example.com".into();
        let body = serde_json::to_value(LessonUpdate::from(&l)).unwrap();
        assert!(body.get("authorEmail").is_none());
        assert_eq!(body["visibility"], "public");
        assert_eq!(body["accessLevel"], "free");
    }

    #[test]
    fn test_visibility_parse() {
        assert_eq!(Visibility::parse("private"), Some(Visibility::Private));
        assert_eq!(Visibility::parse("Private"), None);
        assert_eq!(AccessLevel::parse("premium"), Some(AccessLevel::Premium));
    }
}
