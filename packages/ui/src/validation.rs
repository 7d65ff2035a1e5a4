//! Client-side form validation.
//!
//! Each validator returns the first problem as user-facing text. The backend is
//! still the authority; this only saves a round trip.

use api::{AccessLevel, Lesson, LessonUpdate, NewComment, NewLesson, Visibility};

use crate::auth::SessionUser;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_COMMENT_LEN: usize = 1000;

pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return Err("Enter a valid email address".to_string());
    };
    if local.is_empty() || !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.')
    {
        return Err("Enter a valid email address".to_string());
    }
    if email.chars().any(char::is_whitespace) {
        return Err("Enter a valid email address".to_string());
    }
    Ok(())
}

/// At least six characters with one uppercase and one lowercase letter.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    if !password.chars().any(char::is_uppercase) {
        return Err("Password must contain an uppercase letter".to_string());
    }
    if !password.chars().any(char::is_lowercase) {
        return Err("Password must contain a lowercase letter".to_string());
    }
    Ok(())
}

/// An optional image/photo URL: empty is fine, otherwise it must be http(s).
pub fn validate_optional_url(url: &str) -> Result<(), String> {
    let url = url.trim();
    if url.is_empty() || url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err("Image URL must start with http:// or https://".to_string())
    }
}

pub fn validate_login(email: &str, password: &str) -> Result<(), String> {
    validate_email(email)?;
    if password.is_empty() {
        return Err("Enter your password".to_string());
    }
    Ok(())
}

pub fn validate_registration(
    name: &str,
    email: &str,
    photo_url: &str,
    password: &str,
) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required".to_string());
    }
    validate_email(email)?;
    validate_optional_url(photo_url)?;
    validate_password(password)
}

pub fn validate_display_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        Err("Name is required".to_string())
    } else {
        Ok(())
    }
}

/// Build a comment from composer text.
pub fn comment_from(user: &SessionUser, text: &str) -> Result<NewComment, String> {
    let content = text.trim();
    if content.is_empty() {
        return Err("Comment cannot be empty".to_string());
    }
    if content.chars().count() > MAX_COMMENT_LEN {
        return Err(format!("Comment is limited to {MAX_COMMENT_LEN} characters"));
    }
    Ok(NewComment {
        user_name: user.display_name().to_string(),
        user_email: user.email.clone(),
        user_photo: user.photo_url.clone(),
        content: content.to_string(),
    })
}

/// Editable state of the add/update lesson form.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub emotional_tone: String,
    pub image: String,
    pub visibility: Visibility,
    pub access_level: AccessLevel,
}

impl Default for LessonDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: String::new(),
            emotional_tone: String::new(),
            image: String::new(),
            visibility: Visibility::Public,
            access_level: AccessLevel::Free,
        }
    }
}

impl From<&Lesson> for LessonDraft {
    fn from(lesson: &Lesson) -> Self {
        Self {
            title: lesson.title.clone(),
            description: lesson.description.clone(),
            category: lesson.category.clone(),
            emotional_tone: lesson.emotional_tone.clone(),
            image: lesson.image.clone().unwrap_or_default(),
            visibility: lesson.visibility,
            access_level: lesson.access_level,
        }
    }
}

impl LessonDraft {
    /// Check the draft. Premium access requires a premium author.
    pub fn validate(&self, author_premium: bool) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("Description is required".to_string());
        }
        if self.category.trim().is_empty() {
            return Err("Choose a category".to_string());
        }
        if self.emotional_tone.trim().is_empty() {
            return Err("Choose an emotional tone".to_string());
        }
        validate_optional_url(&self.image)?;
        if self.access_level == AccessLevel::Premium && !author_premium {
            return Err("Upgrade to Premium to publish premium lessons".to_string());
        }
        Ok(())
    }

    fn image(&self) -> Option<String> {
        let image = self.image.trim();
        (!image.is_empty()).then(|| image.to_string())
    }

    pub fn into_new_lesson(self, author: &SessionUser) -> NewLesson {
        NewLesson {
            image: self.image(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category,
            emotional_tone: self.emotional_tone,
            visibility: self.visibility,
            access_level: self.access_level,
            author_name: author.display_name().to_string(),
            author_email: author.email.clone(),
            author_photo: author.photo_url.clone(),
        }
    }

    pub fn into_update(self) -> LessonUpdate {
        LessonUpdate {
            image: self.image(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category,
            emotional_tone: self.emotional_tone,
            visibility: self.visibility,
            access_level: self.access_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> SessionUser {
        SessionUser {
            email: "ana@example.com".to_string(),
            name: Some("Ana".to_string()),
            photo_url: None,
        }
    }

    fn draft() -> LessonDraft {
        LessonDraft {
            title: " Slow down ".to_string(),
            description: "Rushing cost me more than it saved.".to_string(),
            category: "Personal Growth".to_string(),
            emotional_tone: "Realization".to_string(),
            ..LessonDraft::default()
        }
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("Abc12").is_err());
        assert!(validate_password("abcdef").is_err());
        assert!(validate_password("ABCDEF").is_err());
        assert!(validate_password("Abcdef").is_ok());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("ana@example").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ana example@x.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_registration_order() {
        assert_eq!(
            validate_registration("", "bad", "", "x"),
            Err("Name is required".to_string())
        );
        assert!(validate_registration("Ana", "ana@example.com", "ftp://x", "Abcdef").is_err());
        assert!(validate_registration("Ana", "ana@example.com", "", "Abcdef").is_ok());
    }

    #[test]
    fn test_premium_draft_requires_premium_author() {
        let mut d = draft();
        d.access_level = AccessLevel::Premium;
        assert!(d.validate(false).is_err());
        assert!(d.validate(true).is_ok());
    }

    #[test]
    fn test_draft_required_fields() {
        assert!(draft().validate(false).is_ok());
        let mut d = draft();
        d.category.clear();
        assert_eq!(d.validate(false), Err("Choose a category".to_string()));
    }

    #[test]
    fn test_into_new_lesson_carries_author() {
        let lesson = draft().into_new_lesson(&author());
        assert_eq!(lesson.title, "Slow down");
        assert_eq!(lesson.author_email, "ana@example.com");
        assert_eq!(lesson.author_name, "Ana");
        assert_eq!(lesson.image, None);
    }

    #[test]
    fn test_comment_from() {
        assert!(comment_from(&author(), "   ").is_err());
        let comment = comment_from(&author(), " thanks ").unwrap();
        assert_eq!(comment.content, "thanks");
        assert_eq!(comment.user_name, "Ana");
        assert!(comment_from(&author(), &"x".repeat(MAX_COMMENT_LEN + 1)).is_err());
    }
}
