//! Lesson reports and the admin view of reported lessons.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reasons a reader can pick when reporting a lesson.
pub const REPORT_REASONS: &[&str] = &[
    "Inappropriate Content",
    "Hate Speech or Harassment",
    "Misleading or False Information",
    "Spam or Promotional Content",
    "Sensitive or Disturbing Content",
    "Other",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub lesson_id: String,
    pub reason: String,
    #[serde(default)]
    pub reporter_email: String,
    #[serde(default)]
    pub reporter_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /lessons/:id/report`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub reason: String,
    pub reporter_email: String,
    pub reporter_name: Option<String>,
}

/// One row of `GET /admin/reported-lessons`: a lesson and its report tally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedLesson {
    #[serde(rename = "_id", alias = "lessonId")]
    pub lesson_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author_email: String,
    #[serde(default)]
    pub report_count: u64,
    #[serde(default)]
    pub reports: Vec<Report>,
}

impl ReportedLesson {
    /// Distinct reasons, in the order they were first reported.
    pub fn reasons(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for report in &self.reports {
            if !seen.contains(&report.reason.as_str()) {
                seen.push(&report.reason);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reported_lesson_reasons() {
        let row: ReportedLesson = serde_json::from_str(
            r#"{
                "_id": "l9",
                "title": "Hot take",
                "reportCount": 3,
                "reports": [
                    {"reason": "Spam or Promotional Content", "reporterEmail": "a@x.com"},
                    {"reason": "Other", "reporterEmail": "b@x.com"},
                    {"reason": "Spam or Promotional Content", "reporterEmail": "c@x.com"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(row.lesson_id, "l9");
        assert_eq!(row.report_count, 3);
        assert_eq!(row.reasons(), vec!["Spam or Promotional Content", "Other"]);
    }
}
