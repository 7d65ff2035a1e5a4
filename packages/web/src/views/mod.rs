mod auth_callback;
pub use auth_callback::AuthCallback;

mod errors;
pub use errors::{Forbidden, NotFound};
pub(crate) use errors::MissingRecord;

mod home;
pub use home::Home;

mod lesson_detail;
pub use lesson_detail::LessonDetail;

mod login;
pub use login::Login;

mod payment;
pub use payment::{PaymentCancel, PaymentSuccess, Pricing};

mod public_lessons;
pub use public_lessons::PublicLessons;

mod register;
pub use register::Register;

mod dashboard;
pub use dashboard::{
    AddLesson, DashboardHome, DashboardLayout, MyFavorites, MyLessons, Profile, UpdateLesson,
};

mod admin;
pub use admin::{AdminHome, AdminProfile, ManageLessons, ManageUsers, ReportedLessons};
