use dioxus::prelude::*;
use ui::icons::{
    FaBookmark, FaChartLine, FaFlag, FaHouse, FaListUl, FaPlus, FaUser, FaUserShield, FaUsers,
};
use ui::{is_admin, use_auth, use_role, Icon};

use crate::Route;

/// Dashboard frame: side menu plus the routed page. Admin entries appear once
/// the role resolves to admin.
#[component]
pub fn DashboardLayout() -> Element {
    let auth = use_auth();
    let role = use_role();
    let admin = is_admin(&auth.read(), &role.read());

    rsx! {
        div {
            class: "dashboard",
            aside {
                class: "dashboard-menu",
                ul {
                    class: "menu bg-base-200 rounded-box w-full",
                    li { class: "menu-title", "Dashboard" }
                    MenuItem { to: Route::DashboardHome {}, label: "Overview",
                        Icon { icon: FaHouse, width: 14, height: 14 }
                    }
                    MenuItem { to: Route::AddLesson {}, label: "Add Lesson",
                        Icon { icon: FaPlus, width: 14, height: 14 }
                    }
                    MenuItem { to: Route::MyLessons {}, label: "My Lessons",
                        Icon { icon: FaListUl, width: 14, height: 14 }
                    }
                    MenuItem { to: Route::MyFavorites {}, label: "My Favorites",
                        Icon { icon: FaBookmark, width: 14, height: 14 }
                    }
                    MenuItem { to: Route::Profile {}, label: "Profile",
                        Icon { icon: FaUser, width: 14, height: 14 }
                    }

                    if admin {
                        li { class: "menu-title mt-4", "Admin" }
                        MenuItem { to: Route::AdminHome {}, label: "Statistics",
                            Icon { icon: FaChartLine, width: 14, height: 14 }
                        }
                        MenuItem { to: Route::ManageUsers {}, label: "Manage Users",
                            Icon { icon: FaUsers, width: 14, height: 14 }
                        }
                        MenuItem { to: Route::ManageLessons {}, label: "Manage Lessons",
                            Icon { icon: FaListUl, width: 14, height: 14 }
                        }
                        MenuItem { to: Route::ReportedLessons {}, label: "Reported Lessons",
                            Icon { icon: FaFlag, width: 14, height: 14 }
                        }
                        MenuItem { to: Route::AdminProfile {}, label: "Admin Profile",
                            Icon { icon: FaUserShield, width: 14, height: 14 }
                        }
                    }
                }
            }
            section {
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn MenuItem(to: Route, label: String, children: Element) -> Element {
    let current = use_route::<Route>();
    let active = current == to;
    rsx! {
        li {
            Link {
                to: to.clone(),
                class: if active { "active" } else { "" },
                {children}
                "{label}"
            }
        }
    }
}
