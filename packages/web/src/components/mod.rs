mod lesson_card;
pub use lesson_card::LessonCard;

mod lesson_grid;
pub use lesson_grid::LessonGrid;

mod navbar;
pub use navbar::{Footer, Navbar};

mod shell;
pub use shell::Shell;
