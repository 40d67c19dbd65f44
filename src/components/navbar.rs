//! Navigation Bar Component
//!
//! "lomi." brand, nav links, and the wallet widget on the right. The widget
//! renders exactly one of: connect button, install button, connected-account
//! panel — chosen by [`crate::session::wallet_affordance`].

use leptos::prelude::*;

use crate::components::Toast;
use crate::services::wallet::{self, InjectedProvider};
use crate::session::WalletAffordance;
use crate::state::wallet::use_wallet_context;
use crate::utils::format::{format_balance, truncate_address};

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_wallet_context();

    // One-shot provider detection on mount; the availability flag ignores
    // any re-run.
    Effect::new(move || {
        ctx.resolve_availability(wallet::detect_provider());
    });

    view! {
        <div class="navbar-row">
            <nav class="navbar">
                <div class="brand">"lomi."</div>
                <ul class="nav-links">
                    <li class="nav-link nav-link-active">"Home"</li>
                    <li class="nav-link">"Campaigns"</li>
                    <li class="nav-link">"How it works"</li>
                    <li class="nav-link">"About"</li>
                </ul>

                <Toast/>

                {move || match ctx.affordance() {
                    WalletAffordance::AccountPanel { account, balance } => {
                        account_panel(account, balance).into_any()
                    }
                    WalletAffordance::Install => view! {
                        <button
                            class="btn btn-install"
                            on:click=move |_| wallet::open_install_page()
                        >
                            <span class="btn-icon">"↗"</span>
                            "Install Metamask"
                        </button>
                    }
                    .into_any(),
                    WalletAffordance::Connect { enabled } => view! {
                        <button
                            class="btn btn-connect"
                            disabled=!enabled
                            on:click=move |_| ctx.connect(InjectedProvider)
                        >
                            {if enabled { "Connect Wallet" } else { "Connecting..." }}
                        </button>
                    }
                    .into_any(),
                }}
            </nav>
        </div>
    }
}

/// Connected-account panel: badge, truncated address, balance line and the
/// dropdown with the disconnect action.
fn account_panel(account: String, balance: Option<f64>) -> impl IntoView {
    let ctx = use_wallet_context();

    let display_address = truncate_address(&account);
    let balance_label = match balance {
        Some(eth) => format!("{} ETH", format_balance(eth)),
        None => "Loading...".to_string(),
    };

    view! {
        <div class="wallet-panel">
            <span class="badge-connected">"Connected"</span>
            <div class="wallet-meta">
                <span class="wallet-address">{display_address}</span>
                <span class="wallet-balance">{balance_label}</span>
            </div>
            <button class="btn btn-wallet" on:click=move |_| ctx.toggle_menu()>
                <span class=move || {
                    if ctx.menu_open.get() { "chevron chevron-open" } else { "chevron" }
                }>
                    "▾"
                </span>
            </button>
            {move || {
                ctx.menu_open.get().then(|| {
                    view! {
                        <div class="wallet-menu">
                            <button
                                class="wallet-menu-item"
                                on:click=move |_| ctx.disconnect()
                            >
                                "Disconnect Wallet"
                            </button>
                        </div>
                    }
                })
            }}
        </div>
    }
}
