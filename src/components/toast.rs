//! Toast Notification Component
//!
//! Renders the single live notification from the channel: message, severity
//! styling, optional remediation action, and a dismiss button. Visibility
//! timing is owned by the context; this component only reflects it.

use leptos::prelude::*;

use crate::services::wallet::open_install_page;
use crate::session::{ActionEffect, ActiveNotification};
use crate::state::wallet::use_wallet_context;

fn run_action(effect: ActionEffect) {
    match effect {
        ActionEffect::OpenInstallPage => open_install_page(),
    }
}

#[component]
pub fn Toast() -> impl IntoView {
    let ctx = use_wallet_context();

    view! {
        {move || {
            ctx.toast.with(|t| t.active().cloned()).map(|active| {
                let ActiveNotification { notification, visible, .. } = active;
                let class = format!(
                    "toast {} {}",
                    notification.severity.css_class(),
                    if visible { "toast-visible" } else { "toast-leaving" },
                );
                let action = notification.action.map(|action| {
                    let label = action.label;
                    let effect = action.effect;
                    view! {
                        <button class="toast-action" on:click=move |_| run_action(effect)>
                            {label}
                        </button>
                    }
                });

                view! {
                    <div class=class>
                        <span class="toast-message">{notification.message}</span>
                        {action}
                        <button
                            class="toast-dismiss"
                            on:click=move |_| ctx.dismiss_notification()
                        >
                            "×"
                        </button>
                    </div>
                }
            })
        }}
    }
}
