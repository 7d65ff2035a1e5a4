use dioxus::prelude::*;
use ui::icons::FaStar;
use ui::{is_admin, is_premium, use_auth, use_premium, use_role, Avatar, Icon, LogoutButton, ThemeToggle};

use crate::Route;

#[component]
pub fn Navbar() -> Element {
    let auth = use_auth();
    let role = use_role();
    let premium = use_premium();

    let state = auth();
    let admin = is_admin(&state, &role.read());
    let premium_user = is_premium(&state, &premium.read());

    rsx! {
        nav {
            class: "navbar bg-base-100 shadow-sm px-4",
            div {
                class: "flex-1 gap-2",
                Link {
                    to: Route::Home {},
                    class: "btn btn-ghost text-xl",
                    "Digital Life Lessons"
                }
            }
            div {
                class: "flex-none gap-1 items-center",
                ul {
                    class: "menu menu-horizontal px-1 hidden md:flex",
                    li { Link { to: Route::Home {}, "Home" } }
                    li { Link { to: Route::PublicLessons {}, "Public Lessons" } }
                    if state.user.is_some() {
                        li { Link { to: Route::AddLesson {}, "Add Lesson" } }
                        li { Link { to: Route::MyLessons {}, "My Lessons" } }
                        if !premium_user {
                            li { Link { to: Route::Pricing {}, "Upgrade" } }
                        }
                    }
                }
                ThemeToggle {}

                if state.loading {
                    span { class: "loading loading-dots loading-sm" }
                } else if let Some(user) = state.user.clone() {
                    if premium_user {
                        span {
                            class: "badge badge-warning gap-1",
                            Icon { icon: FaStar, width: 10, height: 10 }
                            "Premium"
                        }
                    }
                    div {
                        class: "dropdown dropdown-end",
                        div {
                            tabindex: "0",
                            role: "button",
                            class: "btn btn-ghost btn-circle avatar",
                            title: "{user.display_name()}",
                            Avatar {
                                name: user.display_name().to_string(),
                                photo_url: user.photo_url.clone(),
                                size: 36,
                            }
                        }
                        ul {
                            tabindex: "0",
                            class: "menu menu-sm dropdown-content bg-base-100 rounded-box z-10 mt-3 w-52 p-2 shadow",
                            li {
                                class: "menu-title",
                                "{user.display_name()}"
                            }
                            li { Link { to: Route::Profile {}, "Profile" } }
                            li { Link { to: Route::DashboardHome {}, "Dashboard" } }
                            if admin {
                                li { Link { to: Route::AdminHome {}, "Admin Panel" } }
                            }
                            li {
                                LogoutButton { class: "text-error" }
                            }
                        }
                    }
                } else {
                    Link {
                        to: Route::Login { redirect: String::new() },
                        class: "btn btn-ghost btn-sm",
                        "Login"
                    }
                    Link {
                        to: Route::Register {},
                        class: "btn btn-primary btn-sm",
                        "Sign up"
                    }
                }
            }
        }
    }
}

#[component]
pub fn Footer() -> Element {
    let year = chrono::Utc::now().format("%Y").to_string();
    rsx! {
        footer {
            class: "footer footer-center bg-base-200 p-6",
            aside {
                p { class: "font-semibold", "Digital Life Lessons" }
                p { class: "view-muted", "Preserve what life taught you and learn from others." }
                p { class: "text-xs", "© {year} Digital Life Lessons" }
            }
        }
    }
}
