//! Wallet state management
//!
//! [`WalletContext`] wraps the session core in Leptos signals and owns every
//! piece of asynchronous glue: the connect flow, the balance refresh, and the
//! toast timers. All mutation goes through the pure types in
//! [`crate::session`], so this layer stays a thin scheduler.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;

use crate::services::wallet::ProviderGateway;
use crate::session::{
    wallet_affordance, Notification, NotificationChannel, ProviderAvailability, WalletAffordance,
    WalletSession,
};
use crate::utils::constants::{TOAST_DWELL_MS, TOAST_EXIT_MS};

/// Global wallet context
#[derive(Clone, Copy)]
pub struct WalletContext {
    pub availability: RwSignal<ProviderAvailability>,
    pub session: RwSignal<WalletSession>,
    pub toast: RwSignal<NotificationChannel>,
    pub menu_open: RwSignal<bool>,
}

impl WalletContext {
    pub fn new() -> Self {
        Self {
            availability: RwSignal::new(ProviderAvailability::Unknown),
            session: RwSignal::new(WalletSession::new()),
            toast: RwSignal::new(NotificationChannel::new()),
            menu_open: RwSignal::new(false),
        }
    }

    /// Record the one-shot provider detection result. Later calls are ignored
    /// by the availability flag itself.
    pub fn resolve_availability(&self, present: bool) {
        self.availability.update(|availability| availability.resolve(present));
        if !present {
            log::warn!("no injected wallet provider detected");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.session.with(|s| s.connection().is_connected())
    }

    pub fn account(&self) -> Option<String> {
        self.session
            .with(|s| s.connection().account().map(|a| a.to_string()))
    }

    /// The single affordance the navbar should render right now.
    pub fn affordance(&self) -> WalletAffordance {
        let availability = self.availability.get();
        self.session.with(|s| wallet_affordance(availability, s.connection()))
    }

    /// Run the connect flow against `gateway`. A no-op while another attempt
    /// is in flight; every failure ends as a toast, never an error return.
    pub fn connect<G>(self, gateway: G)
    where
        G: ProviderGateway + 'static,
    {
        let started = self.session.try_update(|s| s.begin_connect()).unwrap_or(false);
        if !started {
            return;
        }

        leptos::task::spawn_local(async move {
            let outcome = gateway.request_accounts().await;
            if let Err(error) = &outcome {
                log::warn!("wallet connect failed: {error}");
            }

            let failure = self
                .session
                .try_update(|s| s.complete_connect(outcome))
                .flatten();

            match failure {
                Some(notification) => self.notify(notification),
                None => {
                    if let Some(account) = self.account() {
                        log::info!("wallet connected: {account}");
                    }
                    self.refresh_balance(&gateway).await;
                }
            }
        });
    }

    /// Fetch the balance for the connected account. A fetch that is overtaken
    /// by a newer request or a disconnect is discarded by the generation
    /// check; failures keep the loading placeholder without a toast.
    async fn refresh_balance<G>(self, gateway: &G)
    where
        G: ProviderGateway,
    {
        let Some((account, generation)) =
            self.session.try_update(|s| s.begin_balance_refresh()).flatten()
        else {
            return;
        };

        let balance = match gateway.fetch_balance(&account).await {
            Ok(balance) => Some(balance),
            Err(error) => {
                log::warn!("balance fetch failed for {account}: {error}");
                None
            }
        };

        self.session.try_update(|s| s.apply_balance(generation, balance));
    }

    /// Local disconnect: clears account and balance, closes the account menu.
    /// Provider-level permission is left untouched.
    pub fn disconnect(&self) {
        self.session.update(|s| s.disconnect());
        self.menu_open.set(false);
        log::info!("wallet disconnected");
    }

    /// Show `notification` and arm its auto-dismiss timers: hidden after the
    /// dwell time, cleared after the exit transition. Both timers carry the
    /// toast's serial so they cannot act on a replacement.
    pub fn notify(self, notification: Notification) {
        let Some(serial) = self.toast.try_update(|t| t.post(notification)) else {
            return;
        };

        leptos::task::spawn_local(async move {
            TimeoutFuture::new(TOAST_DWELL_MS).await;
            let expired = self.toast.try_update(|t| t.expire(serial)).unwrap_or(false);
            if expired {
                TimeoutFuture::new(TOAST_EXIT_MS).await;
                self.toast.try_update(|t| t.remove(serial));
            }
        });
    }

    /// User dismissal: hide immediately, clear after the exit transition.
    pub fn dismiss_notification(self) {
        let Some(serial) = self.toast.try_update(|t| t.dismiss()).flatten() else {
            return;
        };

        leptos::task::spawn_local(async move {
            TimeoutFuture::new(TOAST_EXIT_MS).await;
            self.toast.try_update(|t| t.remove(serial));
        });
    }

    pub fn toggle_menu(&self) {
        self.menu_open.update(|open| *open = !*open);
    }
}

impl Default for WalletContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_wallet_context() -> WalletContext {
    let context = WalletContext::new();
    provide_context(context);
    context
}

pub fn use_wallet_context() -> WalletContext {
    expect_context::<WalletContext>()
}
