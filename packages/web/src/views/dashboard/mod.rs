mod add_lesson;
pub use add_lesson::AddLesson;

mod favorites;
pub use favorites::MyFavorites;

mod home;
pub use home::DashboardHome;

mod layout;
pub use layout::DashboardLayout;

mod lesson_form;

mod my_lessons;
pub use my_lessons::MyLessons;

mod profile;
pub use profile::Profile;

mod update_lesson;
pub use update_lesson::UpdateLesson;
