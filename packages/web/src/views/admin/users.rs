use api::{AdminStats, Role, User};
use dioxus::prelude::*;
use ui::{
    keys, use_auth, use_backend, use_query, use_query_client, use_toast, Avatar, Badge,
    ConfirmDialog, LoadError, Spinner,
};

#[component]
pub fn ManageUsers() -> Element {
    let auth = use_auth();
    let backend = use_backend();
    let users_client = use_query_client::<Vec<User>>();
    let stats_client = use_query_client::<AdminStats>();
    let toast = use_toast();
    let mut pending_delete = use_signal(|| Option::<User>::None);

    let fetch_backend = backend.clone();
    let mut users = use_query(keys::users, move |_| {
        let backend = fetch_backend.clone();
        async move { backend.users().await }
    });

    let role_backend = backend.clone();
    let role_users = users_client.clone();
    let change_role = move |user: User| {
        let backend = role_backend.clone();
        let users_client = role_users.clone();
        spawn(async move {
            let next = user.role.toggled();
            let request = backend.set_role(&user.id, next);
            let result = users_client
                .mutate_optimistic(
                    &keys::users(),
                    |list: &mut Vec<User>| {
                        if let Some(u) = list.iter_mut().find(|u| u.id == user.id) {
                            u.role = next;
                        }
                    },
                    request,
                )
                .await;
            match result {
                Ok(()) => toast.success(format!("{} is now {}", user.display_name(), next.as_str())),
                Err(err) => toast.error(format!("Could not change the role: {err}")),
            }
        });
    };

    let confirm_delete = move |user: User| {
        let backend = backend.clone();
        let users_client = users_client.clone();
        let stats_client = stats_client.clone();
        spawn(async move {
            let request = backend.delete_user(&user.id);
            match users_client
                .mutate_optimistic(
                    &keys::users(),
                    |list: &mut Vec<User>| list.retain(|u| u.id != user.id),
                    request,
                )
                .await
            {
                Ok(()) => {
                    stats_client.invalidate(&keys::admin_stats());
                    toast.success(format!("{} deleted", user.display_name()));
                }
                Err(err) => toast.error(format!("Could not delete the user: {err}")),
            }
        });
    };

    let me = auth().email().map(str::to_string).unwrap_or_default();

    rsx! {
        h1 { class: "text-3xl font-bold mb-6", "Manage users" }
        match users() {
            None => rsx! { Spinner {} },
            Some(Err(err)) => rsx! {
                LoadError { message: err.to_string(), on_retry: move |_| users.restart() }
            },
            Some(Ok(list)) => rsx! {
                div {
                    class: "overflow-x-auto",
                    table {
                        class: "table",
                        thead {
                            tr {
                                th { "User" }
                                th { "Email" }
                                th { "Role" }
                                th { "Plan" }
                                th {}
                            }
                        }
                        tbody {
                            for user in list {
                                UserRow {
                                    key: "{user.id}",
                                    is_self: user.email == me,
                                    user: user.clone(),
                                    on_toggle_role: change_role.clone(),
                                    on_delete: move |u| pending_delete.set(Some(u)),
                                }
                            }
                        }
                    }
                }
            },
        }

        if let Some(user) = pending_delete() {
            ConfirmDialog {
                title: format!("Delete {}?", user.display_name()),
                message: "The account record is removed from the platform.".to_string(),
                on_confirm: move |_| confirm_delete(user.clone()),
                on_close: move |_| pending_delete.set(None),
            }
        }
    }
}

#[component]
fn UserRow(
    user: User,
    is_self: bool,
    on_toggle_role: EventHandler<User>,
    on_delete: EventHandler<User>,
) -> Element {
    let toggle_target = user.clone();
    let delete_target = user.clone();
    let role_action = match user.role {
        Role::Admin => "Make user",
        Role::User => "Make admin",
    };

    rsx! {
        tr {
            td {
                div {
                    class: "flex items-center gap-2",
                    Avatar {
                        name: user.display_name().to_string(),
                        photo_url: user.photo_url.clone(),
                        size: 32,
                    }
                    span { "{user.display_name()}" }
                }
            }
            td { "{user.email}" }
            td {
                if user.role.is_admin() {
                    Badge { label: "admin", tone: "badge-secondary" }
                } else {
                    Badge { label: "user" }
                }
            }
            td {
                if user.is_premium {
                    Badge { label: "Premium", tone: "badge-warning" }
                } else {
                    Badge { label: "Free" }
                }
            }
            td {
                class: "flex gap-1",
                button {
                    class: "btn btn-xs btn-outline",
                    disabled: is_self,
                    onclick: move |_| on_toggle_role.call(toggle_target.clone()),
                    "{role_action}"
                }
                button {
                    class: "btn btn-xs btn-error btn-outline",
                    disabled: is_self,
                    onclick: move |_| on_delete.call(delete_target.clone()),
                    "Delete"
                }
            }
        }
    }
}
