//! Admin-only pages, mounted behind the admin guard.

mod home;
mod lessons;
mod profile;
mod reported;
mod users;

pub use home::AdminHome;
pub use lessons::ManageLessons;
pub use profile::AdminProfile;
pub use reported::ReportedLessons;
pub use users::ManageUsers;
