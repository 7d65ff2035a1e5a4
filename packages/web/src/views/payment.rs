//! Upgrade flow: pricing page, checkout redirect and the two return pages.

use api::CheckoutRequest;
use dioxus::prelude::*;
use ui::icons::{FaCheck, FaCrown, FaXmark};
use ui::{browser, is_premium, use_auth, use_auth_actions, use_backend, use_premium, use_toast, Icon, Spinner};

use crate::Route;

const PLAN_ROWS: &[(&str, &str, &str)] = &[
    ("Create and share lessons", "Free lessons", "Free and premium lessons"),
    ("Premium lessons", "Locked", "Read every premium lesson"),
    ("Ad-free experience", "No", "Yes"),
    ("Priority listing", "No", "Yes"),
    ("Lifetime access", "No", "One-time payment"),
];

#[component]
pub fn Pricing() -> Element {
    let auth = use_auth();
    let premium = use_premium();
    let backend = use_backend();
    let toast = use_toast();
    let mut redirecting = use_signal(|| false);

    let state = auth();
    if is_premium(&state, &premium.read()) {
        return rsx! {
            div {
                class: "flex flex-col items-center text-center gap-4 py-20",
                Icon { icon: FaCrown, width: 48, height: 48 }
                h1 { class: "text-3xl font-bold", "You are Premium" }
                p { class: "view-muted", "Every premium lesson is unlocked for you. Thank you for your support!" }
                Link { to: Route::PublicLessons {}, class: "btn btn-primary", "Browse lessons" }
            }
        };
    }

    let upgrade = move |_| {
        let Some(user) = auth().user else {
            return;
        };
        let backend = backend.clone();
        spawn(async move {
            redirecting.set(true);
            let request = CheckoutRequest {
                email: user.email.clone(),
                name: user.name.clone(),
            };
            match backend.checkout_session(&request).await {
                Ok(session) => browser::redirect(&session.url),
                Err(err) => {
                    redirecting.set(false);
                    toast.error(format!("Could not start checkout: {err}"));
                }
            }
        });
    };

    rsx! {
        div {
            class: "flex flex-col items-center gap-2 mb-8 text-center",
            h1 { class: "text-3xl font-bold", "Upgrade to Premium" }
            p { class: "view-muted", "A single payment unlocks Premium for life." }
        }

        div {
            class: "overflow-x-auto max-w-3xl mx-auto",
            table {
                class: "table",
                thead {
                    tr {
                        th { "Feature" }
                        th { "Free" }
                        th { "Premium" }
                    }
                }
                tbody {
                    for (feature, free, paid) in PLAN_ROWS.iter() {
                        tr {
                            key: "{feature}",
                            td { "{feature}" }
                            td {
                                class: "view-muted",
                                Icon { icon: FaXmark, width: 12, height: 12 }
                                " {free}"
                            }
                            td {
                                Icon { icon: FaCheck, width: 12, height: 12 }
                                " {paid}"
                            }
                        }
                    }
                }
            }
        }

        div {
            class: "flex justify-center mt-8",
            button {
                class: "btn btn-warning btn-lg",
                disabled: redirecting(),
                onclick: upgrade,
                if redirecting() { "Redirecting to checkout..." } else { "Upgrade now" }
            }
        }
    }
}

#[component]
pub fn PaymentSuccess(session_id: String) -> Element {
    let backend = use_backend();
    let actions = use_auth_actions();
    let mut outcome = use_signal(|| Option::<Result<(), String>>::None);

    use_hook(move || {
        spawn(async move {
            match backend.confirm_payment(&session_id).await {
                Ok(confirmation) => {
                    tracing::info!(
                        premium = confirmation.is_premium,
                        transaction = ?confirmation.transaction_id,
                        "payment confirmed"
                    );
                    actions.refresh_premium();
                    outcome.set(Some(Ok(())));
                }
                Err(err) => outcome.set(Some(Err(err.to_string()))),
            }
        });
    });

    rsx! {
        match outcome() {
            None => rsx! { Spinner { label: "Confirming your payment..." } },
            Some(Ok(())) => rsx! {
                div {
                    class: "flex flex-col items-center text-center gap-4 py-20",
                    Icon { icon: FaCrown, width: 48, height: 48 }
                    h1 { class: "text-3xl font-bold", "Welcome to Premium" }
                    p { class: "view-muted", "Your payment went through. Premium lessons are now unlocked." }
                    Link { to: Route::PublicLessons {}, class: "btn btn-primary", "Start reading" }
                }
            },
            Some(Err(err)) => rsx! {
                div {
                    class: "flex flex-col items-center text-center gap-4 py-20",
                    h1 { class: "text-2xl font-bold", "We could not confirm your payment" }
                    div { class: "alert alert-error max-w-md", "{err}" }
                    Link { to: Route::Pricing {}, class: "btn", "Back to pricing" }
                }
            },
        }
    }
}

#[component]
pub fn PaymentCancel() -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center text-center gap-4 py-20",
            Icon { icon: FaXmark, width: 48, height: 48 }
            h1 { class: "text-3xl font-bold", "Payment cancelled" }
            p { class: "view-muted", "No charge was made. You can upgrade whenever you are ready." }
            div {
                class: "flex gap-3",
                Link { to: Route::Pricing {}, class: "btn btn-warning", "Try again" }
                Link { to: Route::Home {}, class: "btn", "Back to home" }
            }
        }
    }
}
