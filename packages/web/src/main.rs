use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::{AuthProvider, QueryProvider, ThemeSignal, ToastHost};

use components::Shell;
use guards::{AdminGuard, PrivateGuard};
use views::{
    AddLesson, AdminHome, AdminProfile, AuthCallback, DashboardHome, DashboardLayout, Home,
    LessonDetail, Login, ManageLessons, ManageUsers, MyFavorites, MyLessons, NotFound,
    PaymentCancel, PaymentSuccess, Pricing, Profile, PublicLessons, Register, ReportedLessons,
    UpdateLesson,
};

mod components;
mod config;
mod guards;
mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/lessons")]
        PublicLessons {},
        #[route("/login?:redirect")]
        Login { redirect: String },
        #[route("/register")]
        Register {},
        #[route("/auth/callback")]
        AuthCallback {},

        #[layout(PrivateGuard)]
            #[route("/lessons/:id")]
            LessonDetail { id: String },
            #[route("/pricing")]
            Pricing {},
            #[route("/payment/success?:session_id")]
            PaymentSuccess { session_id: String },
            #[route("/payment/cancel")]
            PaymentCancel {},

            #[nest("/dashboard")]
            #[layout(DashboardLayout)]
                #[route("/")]
                DashboardHome {},
                #[route("/add-lesson")]
                AddLesson {},
                #[route("/my-lessons")]
                MyLessons {},
                #[route("/update-lesson/:id")]
                UpdateLesson { id: String },
                #[route("/my-favorites")]
                MyFavorites {},
                #[route("/profile")]
                Profile {},

                #[layout(AdminGuard)]
                #[nest("/admin")]
                    #[route("/")]
                    AdminHome {},
                    #[route("/manage-users")]
                    ManageUsers {},
                    #[route("/manage-lessons")]
                    ManageLessons {},
                    #[route("/reported-lessons")]
                    ReportedLessons {},
                    #[route("/profile")]
                    AdminProfile {},
                #[end_nest]
                #[end_layout]
            #[end_layout]
            #[end_nest]
        #[end_layout]

        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const DAISY_CSS: &str = "https://cdn.jsdelivr.net/npm/daisyui@4.12.10/dist/full.min.css";
const TAILWIND_JS: &str = "https://cdn.tailwindcss.com";

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("failed to initialise logging: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let client_config = use_hook(config::load);
    use_context_provider(|| client_config.clone());

    let mut theme: ThemeSignal = use_context_provider(|| Signal::new(Option::<String>::None));
    use_hook(|| ui::load_theme_from_storage(&mut theme));

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: DAISY_CSS }
        document::Script { src: TAILWIND_JS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ToastHost {
            AuthProvider {
                config: client_config,
                QueryProvider {
                    Router::<Route> {}
                }
            }
        }
    }
}
