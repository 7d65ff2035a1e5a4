//! Wire models exchanged with the backend.

mod admin;
mod comment;
mod lesson;
mod payment;
mod report;
mod user;

pub use admin::{AdminProfile, AdminStats};
pub use comment::{Comment, NewComment};
pub use lesson::{
    AccessLevel, Created, Lesson, LessonUpdate, NewLesson, Visibility, CATEGORIES,
    EMOTIONAL_TONES,
};
pub use payment::{CheckoutRequest, CheckoutSession, PaymentConfirmation};
pub use report::{NewReport, ReportedLesson, Report, REPORT_REASONS};
pub use user::{NewUser, ProfileUpdate, Role, User};
pub(crate) use user::{PremiumResponse, RoleResponse};
