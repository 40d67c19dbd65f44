//! Wallet connection session core.
//!
//! Host-independent state machine behind the navbar's wallet widget: the
//! connect/disconnect lifecycle, the balance refresh protocol, and the
//! notification channel. Browser access lives in [`crate::services::wallet`];
//! everything here is plain data so it can be exercised in native unit tests.

use std::fmt;

/// EIP-1193 rejection code: the user declined the permission request.
pub const ERR_USER_REJECTED: i64 = 4001;
/// EIP-1193 rejection code: a permission request is already pending.
pub const ERR_REQUEST_PENDING: i64 = -32002;

/// Connection lifecycle of the wallet widget. Exactly one variant is active
/// at any time.
#[derive(Clone, Debug, PartialEq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected {
        account: String,
        balance: Option<f64>,
    },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected { .. })
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self, ConnectionState::Connecting)
    }

    pub fn account(&self) -> Option<&str> {
        match self {
            ConnectionState::Connected { account, .. } => Some(account),
            _ => None,
        }
    }

    pub fn balance(&self) -> Option<f64> {
        match self {
            ConnectionState::Connected { balance, .. } => *balance,
            _ => None,
        }
    }
}

/// Whether an injected provider was found in the host environment.
///
/// Resolved exactly once at startup; `resolve` ignores every call after the
/// first so the flag can never flip back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProviderAvailability {
    #[default]
    Unknown,
    Present,
    Absent,
}

impl ProviderAvailability {
    pub fn resolve(&mut self, present: bool) {
        if *self == ProviderAvailability::Unknown {
            *self = if present {
                ProviderAvailability::Present
            } else {
                ProviderAvailability::Absent
            };
        }
    }

    pub fn is_absent(&self) -> bool {
        *self == ProviderAvailability::Absent
    }
}

/// Failure classified out of an account-access negotiation.
#[derive(Clone, Debug, PartialEq)]
pub enum ConnectError {
    /// No injected provider in the host environment.
    NoProvider,
    /// The provider resolved with an empty account list.
    NoAccounts,
    /// The user declined the permission request (code 4001).
    Rejected,
    /// A permission request is already open in the wallet (code -32002).
    AlreadyPending,
    /// Anything else; the payload is the provider's message, kept for logs.
    Other(String),
}

impl ConnectError {
    /// Classify a provider rejection by its numeric code.
    pub fn from_provider_code(code: Option<i64>, message: Option<String>) -> Self {
        match code {
            Some(ERR_USER_REJECTED) => ConnectError::Rejected,
            Some(ERR_REQUEST_PENDING) => ConnectError::AlreadyPending,
            _ => ConnectError::Other(
                message.unwrap_or_else(|| "unknown provider error".to_string()),
            ),
        }
    }

    fn severity(&self) -> Severity {
        match self {
            ConnectError::NoProvider | ConnectError::NoAccounts => Severity::Warning,
            ConnectError::Rejected | ConnectError::AlreadyPending => Severity::Info,
            ConnectError::Other(_) => Severity::Error,
        }
    }

    fn action(&self) -> Option<NotificationAction> {
        match self {
            ConnectError::NoProvider => Some(NotificationAction {
                label: "Install Metamask",
                effect: ActionEffect::OpenInstallPage,
            }),
            _ => None,
        }
    }

    /// The toast surfaced for this failure.
    pub fn into_notification(self) -> Notification {
        let severity = self.severity();
        let action = self.action();
        Notification {
            message: self.to_string(),
            severity,
            action,
        }
    }
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectError::NoProvider => {
                write!(f, "No Metamask detected. Please install Metamask to continue.")
            }
            ConnectError::NoAccounts => write!(f, "No accounts found"),
            ConnectError::Rejected => write!(f, "Wallet connection request was rejected."),
            ConnectError::AlreadyPending => {
                write!(f, "A connection request is already pending. Check your wallet.")
            }
            ConnectError::Other(_) => {
                write!(f, "Failed to connect to wallet. Please try again.")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Error => "toast-error",
            Severity::Warning => "toast-warning",
            Severity::Info => "toast-info",
        }
    }
}

/// What an action button does when clicked. Dispatch happens in the toast
/// component; the core only records intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionEffect {
    OpenInstallPage,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NotificationAction {
    pub label: &'static str,
    pub effect: ActionEffect,
}

/// A transient user-visible message with an optional remediation action.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub action: Option<NotificationAction>,
}

/// The single live toast plus its visibility flag.
///
/// `serial` ties expiry/removal timers to the notification they were armed
/// for: a timer whose serial no longer matches is a no-op, so a replaced
/// toast can never be hidden or cleared by its predecessor's timers.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveNotification {
    pub serial: u64,
    pub notification: Notification,
    pub visible: bool,
}

/// Governs the visible lifecycle of at most one notification.
#[derive(Debug, Default)]
pub struct NotificationChannel {
    next_serial: u64,
    active: Option<ActiveNotification>,
}

impl NotificationChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ActiveNotification> {
        self.active.as_ref()
    }

    /// Replace whatever is live with `notification` and return the serial the
    /// caller should arm the dwell timer with.
    pub fn post(&mut self, notification: Notification) -> u64 {
        self.next_serial += 1;
        self.active = Some(ActiveNotification {
            serial: self.next_serial,
            notification,
            visible: true,
        });
        self.next_serial
    }

    /// User-initiated dismissal: hides immediately, returns the serial for the
    /// exit-delay removal timer.
    pub fn dismiss(&mut self) -> Option<u64> {
        let active = self.active.as_mut()?;
        active.visible = false;
        Some(active.serial)
    }

    /// Dwell timer fired. Hides the toast only if it is still the one the
    /// timer was armed for and it has not been dismissed already.
    pub fn expire(&mut self, serial: u64) -> bool {
        match self.active.as_mut() {
            Some(active) if active.serial == serial && active.visible => {
                active.visible = false;
                true
            }
            _ => false,
        }
    }

    /// Exit-delay timer fired; clear the slot if `serial` is still the hidden
    /// occupant.
    pub fn remove(&mut self, serial: u64) {
        if let Some(active) = &self.active {
            if active.serial == serial && !active.visible {
                self.active = None;
            }
        }
    }
}

/// The connect/disconnect state machine plus the balance refresh protocol.
///
/// Transitions are driven from the reactive layer: the async glue calls
/// `begin_*` before awaiting the provider and feeds the resolved outcome back
/// in. Balance fetches carry a generation so a response that was overtaken by
/// a newer request (or a disconnect) is discarded instead of overwriting
/// fresher state.
#[derive(Clone, Debug, PartialEq)]
pub struct WalletSession {
    connection: ConnectionState,
    balance_generation: u64,
}

impl Default for WalletSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletSession {
    pub fn new() -> Self {
        Self {
            connection: ConnectionState::Disconnected,
            balance_generation: 0,
        }
    }

    pub fn connection(&self) -> &ConnectionState {
        &self.connection
    }

    /// Enter `Connecting`. Returns `false` (and changes nothing) if a connect
    /// attempt is already in flight.
    pub fn begin_connect(&mut self) -> bool {
        if self.connection.is_connecting() {
            return false;
        }
        // A reconnect may change the account; outstanding fetches are stale.
        self.balance_generation += 1;
        self.connection = ConnectionState::Connecting;
        true
    }

    /// Resolve the in-flight connect attempt. On success the first returned
    /// account becomes the session account with no balance yet; every failure
    /// returns to `Disconnected` and yields the toast to surface.
    pub fn complete_connect(
        &mut self,
        outcome: Result<Vec<String>, ConnectError>,
    ) -> Option<Notification> {
        if !self.connection.is_connecting() {
            return None;
        }

        let error = match outcome {
            Ok(accounts) => match accounts.into_iter().next() {
                Some(account) => {
                    self.connection = ConnectionState::Connected {
                        account,
                        balance: None,
                    };
                    return None;
                }
                None => ConnectError::NoAccounts,
            },
            Err(error) => error,
        };

        self.connection = ConnectionState::Disconnected;
        Some(error.into_notification())
    }

    /// Local state reset: clears account and balance and invalidates any
    /// outstanding balance fetch. Provider-level permission is not revoked.
    pub fn disconnect(&mut self) {
        self.balance_generation += 1;
        self.connection = ConnectionState::Disconnected;
    }

    /// Start a balance refresh for the connected account. Returns the account
    /// to query and the generation the result must be applied with, or `None`
    /// when there is no connected account.
    pub fn begin_balance_refresh(&mut self) -> Option<(String, u64)> {
        match &mut self.connection {
            ConnectionState::Connected { account, balance } => {
                *balance = None;
                self.balance_generation += 1;
                Some((account.clone(), self.balance_generation))
            }
            _ => None,
        }
    }

    /// Apply a resolved balance fetch. `None` marks a silent failure (the
    /// panel keeps its loading placeholder). Returns whether the result was
    /// applied; stale generations and non-connected states are ignored.
    pub fn apply_balance(&mut self, generation: u64, fetched: Option<f64>) -> bool {
        if generation != self.balance_generation {
            return false;
        }
        match &mut self.connection {
            ConnectionState::Connected { balance, .. } => {
                *balance = fetched;
                true
            }
            _ => false,
        }
    }
}

/// The single wallet affordance the navbar renders for a given
/// availability/connection combination.
#[derive(Clone, Debug, PartialEq)]
pub enum WalletAffordance {
    /// Connect button; disabled while a connect attempt is in flight.
    Connect { enabled: bool },
    /// Install button shown when no provider was detected.
    Install,
    /// Connected-account panel with address and optional balance.
    AccountPanel {
        account: String,
        balance: Option<f64>,
    },
}

/// Pick the affordance for the current state. Total over both inputs, so the
/// widget always renders exactly one of the three.
pub fn wallet_affordance(
    availability: ProviderAvailability,
    connection: &ConnectionState,
) -> WalletAffordance {
    match connection {
        ConnectionState::Connected { account, balance } => WalletAffordance::AccountPanel {
            account: account.clone(),
            balance: *balance,
        },
        _ if availability.is_absent() => WalletAffordance::Install,
        state => WalletAffordance::Connect {
            enabled: !state.is_connecting(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts(list: &[&str]) -> Result<Vec<String>, ConnectError> {
        Ok(list.iter().map(|a| a.to_string()).collect())
    }

    #[test]
    fn connect_success_uses_first_account() {
        let mut session = WalletSession::new();
        assert!(session.begin_connect());
        assert!(session.connection().is_connecting());

        let toast = session.complete_connect(accounts(&["0xABCDEF1234567890", "0xfeed"]));
        assert_eq!(toast, None);
        assert_eq!(session.connection().account(), Some("0xABCDEF1234567890"));
        assert_eq!(session.connection().balance(), None);
    }

    #[test]
    fn second_connect_attempt_is_a_no_op_while_connecting() {
        let mut session = WalletSession::new();
        assert!(session.begin_connect());
        assert!(!session.begin_connect());
        assert!(session.connection().is_connecting());
    }

    #[test]
    fn reconnect_is_allowed_from_connected() {
        let mut session = WalletSession::new();
        session.begin_connect();
        session.complete_connect(accounts(&["0xaaa1111122222"]));
        assert!(session.begin_connect());
        assert!(session.connection().is_connecting());
    }

    #[test]
    fn missing_provider_warns_and_offers_install_action() {
        let mut session = WalletSession::new();
        session.begin_connect();

        let toast = session
            .complete_connect(Err(ConnectError::NoProvider))
            .expect("failure must produce a toast");
        assert_eq!(session.connection(), &ConnectionState::Disconnected);
        assert_eq!(toast.severity, Severity::Warning);
        let action = toast.action.expect("install action");
        assert_eq!(action.label, "Install Metamask");
        assert_eq!(action.effect, ActionEffect::OpenInstallPage);
    }

    #[test]
    fn empty_account_list_is_a_warning_without_action() {
        let mut session = WalletSession::new();
        session.begin_connect();

        let toast = session.complete_connect(accounts(&[])).expect("toast");
        assert_eq!(session.connection(), &ConnectionState::Disconnected);
        assert_eq!(toast.severity, Severity::Warning);
        assert_eq!(toast.message, "No accounts found");
        assert_eq!(toast.action, None);
    }

    #[test]
    fn user_rejection_is_informational() {
        let mut session = WalletSession::new();
        session.begin_connect();

        let error = ConnectError::from_provider_code(Some(4001), None);
        assert_eq!(error, ConnectError::Rejected);

        let toast = session.complete_connect(Err(error)).expect("toast");
        assert_eq!(session.connection(), &ConnectionState::Disconnected);
        assert_eq!(toast.severity, Severity::Info);
        assert_eq!(toast.action, None);
    }

    #[test]
    fn pending_request_is_informational() {
        let error = ConnectError::from_provider_code(Some(-32002), None);
        assert_eq!(error, ConnectError::AlreadyPending);
        assert_eq!(error.into_notification().severity, Severity::Info);
    }

    #[test]
    fn unknown_failure_is_an_error_with_generic_message() {
        let error = ConnectError::from_provider_code(None, Some("boom".to_string()));
        assert_eq!(error, ConnectError::Other("boom".to_string()));

        let toast = error.into_notification();
        assert_eq!(toast.severity, Severity::Error);
        assert_eq!(toast.message, "Failed to connect to wallet. Please try again.");
        assert_eq!(toast.action, None);
    }

    #[test]
    fn disconnect_clears_account_and_balance() {
        let mut session = WalletSession::new();
        session.begin_connect();
        session.complete_connect(accounts(&["0xABCDEF1234567890"]));
        let (_, generation) = session.begin_balance_refresh().unwrap();
        assert!(session.apply_balance(generation, Some(1.5)));
        assert_eq!(session.connection().balance(), Some(1.5));

        session.disconnect();
        assert_eq!(session.connection(), &ConnectionState::Disconnected);
        assert_eq!(session.connection().account(), None);
        assert_eq!(session.connection().balance(), None);
    }

    #[test]
    fn balance_is_only_applied_for_the_current_generation() {
        let mut session = WalletSession::new();
        session.begin_connect();
        session.complete_connect(accounts(&["0xABCDEF1234567890"]));

        let (_, stale) = session.begin_balance_refresh().unwrap();
        let (_, current) = session.begin_balance_refresh().unwrap();

        assert!(!session.apply_balance(stale, Some(9.9)));
        assert_eq!(session.connection().balance(), None);

        assert!(session.apply_balance(current, Some(1.5)));
        assert_eq!(session.connection().balance(), Some(1.5));
    }

    #[test]
    fn disconnect_invalidates_in_flight_balance_fetch() {
        let mut session = WalletSession::new();
        session.begin_connect();
        session.complete_connect(accounts(&["0xABCDEF1234567890"]));
        let (_, generation) = session.begin_balance_refresh().unwrap();

        session.disconnect();
        assert!(!session.apply_balance(generation, Some(2.0)));
        assert_eq!(session.connection().balance(), None);
    }

    #[test]
    fn failed_fetch_leaves_balance_absent() {
        let mut session = WalletSession::new();
        session.begin_connect();
        session.complete_connect(accounts(&["0xABCDEF1234567890"]));
        let (_, generation) = session.begin_balance_refresh().unwrap();

        assert!(session.apply_balance(generation, None));
        assert!(session.connection().is_connected());
        assert_eq!(session.connection().balance(), None);
    }

    #[test]
    fn balance_refresh_requires_a_connected_account() {
        let mut session = WalletSession::new();
        assert_eq!(session.begin_balance_refresh(), None);
        session.begin_connect();
        assert_eq!(session.begin_balance_refresh(), None);
    }

    #[test]
    fn availability_resolves_exactly_once() {
        let mut availability = ProviderAvailability::Unknown;
        availability.resolve(false);
        assert_eq!(availability, ProviderAvailability::Absent);

        availability.resolve(true);
        assert_eq!(availability, ProviderAvailability::Absent);
    }

    #[test]
    fn exactly_one_affordance_per_state() {
        use ProviderAvailability::*;

        let connected = ConnectionState::Connected {
            account: "0xABCDEF1234567890".to_string(),
            balance: Some(1.5),
        };

        assert_eq!(
            wallet_affordance(Absent, &ConnectionState::Disconnected),
            WalletAffordance::Install
        );
        assert_eq!(
            wallet_affordance(Present, &ConnectionState::Disconnected),
            WalletAffordance::Connect { enabled: true }
        );
        assert_eq!(
            wallet_affordance(Unknown, &ConnectionState::Disconnected),
            WalletAffordance::Connect { enabled: true }
        );
        assert_eq!(
            wallet_affordance(Present, &ConnectionState::Connecting),
            WalletAffordance::Connect { enabled: false }
        );
        // The connected panel wins regardless of how availability resolved.
        assert_eq!(
            wallet_affordance(Absent, &connected),
            WalletAffordance::AccountPanel {
                account: "0xABCDEF1234567890".to_string(),
                balance: Some(1.5),
            }
        );
    }

    fn warning(message: &str) -> Notification {
        Notification {
            message: message.to_string(),
            severity: Severity::Warning,
            action: None,
        }
    }

    #[test]
    fn posting_replaces_the_live_notification() {
        let mut channel = NotificationChannel::new();
        let first = channel.post(warning("first"));
        let second = channel.post(warning("second"));
        assert_ne!(first, second);

        let active = channel.active().unwrap();
        assert_eq!(active.notification.message, "second");
        assert!(active.visible);
    }

    #[test]
    fn stale_expiry_timer_cannot_hide_a_newer_notification() {
        let mut channel = NotificationChannel::new();
        let first = channel.post(warning("first"));
        let second = channel.post(warning("second"));

        assert!(!channel.expire(first));
        assert!(channel.active().unwrap().visible);

        assert!(channel.expire(second));
        assert!(!channel.active().unwrap().visible);
    }

    #[test]
    fn dismissal_hides_immediately_and_removal_clears() {
        let mut channel = NotificationChannel::new();
        let serial = channel.post(warning("oops"));

        assert_eq!(channel.dismiss(), Some(serial));
        assert!(!channel.active().unwrap().visible);

        channel.remove(serial);
        assert_eq!(channel.active(), None);
    }

    #[test]
    fn stale_removal_timer_cannot_clear_a_newer_notification() {
        let mut channel = NotificationChannel::new();
        let first = channel.post(warning("first"));
        channel.dismiss();
        channel.post(warning("second"));

        channel.remove(first);
        let active = channel.active().unwrap();
        assert_eq!(active.notification.message, "second");
        assert!(active.visible);
    }

    #[test]
    fn expiry_after_dismissal_is_a_no_op() {
        let mut channel = NotificationChannel::new();
        let serial = channel.post(warning("oops"));
        channel.dismiss();
        assert!(!channel.expire(serial));
    }

    #[test]
    fn removal_requires_the_toast_to_be_hidden() {
        let mut channel = NotificationChannel::new();
        let serial = channel.post(warning("oops"));

        channel.remove(serial);
        assert!(channel.active().is_some());
    }
}
