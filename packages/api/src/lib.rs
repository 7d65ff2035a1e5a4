//! # API crate — the client's view of the outside world
//!
//! Everything the Digital Life Lessons frontend knows about the REST backend and
//! the identity provider lives here. The crate has no UI dependency, so its
//! request policy can be tested natively with a fake transport.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | The shared [`Session`](auth::Session) (bearer token, generation, teardown listeners), the Identity Toolkit client and the Google redirect flow |
//! | [`client`] | [`ApiClient`]: bearer injection, 401/403 teardown, one typed method per backend route |
//! | [`models`] | Wire models (`User`, `Lesson`, `Comment`, `Report`, admin stats, payments) |
//! | [`transport`] | The [`Transport`] seam and its `reqwest` implementation |
//!
//! ## Backend routes
//!
//! - **Lessons**: `public_lessons`, `lesson`, `create_lesson`, `my_lessons`, `saved_lessons`,
//!   `featured_lessons`, `admin_lessons`, `update_lesson`, `trash_lesson`, `set_featured`,
//!   `set_reviewed`, `delete_lesson_admin`, `toggle_like`, `toggle_favorite`
//! - **Reports & comments**: `report_lesson`, `lesson_reports`, `ignore_reports`,
//!   `reported_lessons`, `comments`, `add_comment`
//! - **Users**: `users`, `save_user`, `user`, `set_role`, `delete_user`, `role_of`,
//!   `is_premium`, `update_profile`
//! - **Admin**: `admin_stats`, `admin_profile`
//! - **Payments**: `checkout_session`, `confirm_payment`

pub mod auth;
pub mod client;
mod error;
pub mod models;
pub mod transport;

pub use client::ApiClient;
pub use error::ApiError;
pub use models::*;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

pub use reqwest::Method;
