//! Injected Wallet Provider Interop via wasm-bindgen
//!
//! JavaScript interop for the browser-injected Ethereum provider
//! (`window.ethereum`, the object Metamask and compatible extensions expose).
//! The rest of the crate talks to the provider through the [`ProviderGateway`]
//! trait so the session logic can be driven by a test double.

use serde::Deserialize;
use wasm_bindgen::prelude::*;

use crate::session::ConnectError;
use crate::utils::constants::METAMASK_INSTALL_URL;
use crate::utils::format::{parse_wei_hex, wei_to_eth};

#[wasm_bindgen(inline_js = "
export function hasInjectedProvider() {
    return typeof window.ethereum !== 'undefined' && window.ethereum !== null;
}

export async function requestAccounts() {
    return await window.ethereum.request({ method: 'eth_requestAccounts' });
}

export async function getBalance(account) {
    return await window.ethereum.request({
        method: 'eth_getBalance',
        params: [account, 'latest']
    });
}
")]
extern "C" {
    /// Check whether an injected provider exists in this browsing context
    fn hasInjectedProvider() -> bool;

    /// Ask the provider for account access; resolves with an account array
    #[wasm_bindgen(catch)]
    async fn requestAccounts() -> Result<JsValue, JsValue>;

    /// Read the raw hex-encoded wei balance of an account
    #[wasm_bindgen(catch)]
    async fn getBalance(account: &str) -> Result<JsValue, JsValue>;
}

/// One-shot provider detection, run once at mount. No retries, no polling.
pub fn detect_provider() -> bool {
    hasInjectedProvider()
}

/// Open the wallet install page in a new browsing context. Fire-and-forget.
pub fn open_install_page() {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.open_with_url_and_target(METAMASK_INSTALL_URL, "_blank") {
            log::warn!("failed to open install page: {:?}", err);
        }
    }
}

/// Shape of an EIP-1193 provider rejection (`{ code, message, ... }`).
#[derive(Debug, Default, Deserialize)]
struct ProviderRejection {
    code: Option<i64>,
    message: Option<String>,
}

/// Classify a rejection thrown by `window.ethereum.request`.
///
/// Metamask rejects with a plain `{ code, message }` object which
/// deserializes directly; some providers throw `Error` instances whose
/// fields are not enumerable, so missing fields are re-read through
/// `Reflect` before classification.
fn classify_rejection(raw: JsValue) -> ConnectError {
    let mut shape =
        serde_wasm_bindgen::from_value::<ProviderRejection>(raw.clone()).unwrap_or_default();

    if shape.code.is_none() {
        shape.code = js_sys::Reflect::get(&raw, &JsValue::from_str("code"))
            .ok()
            .and_then(|v| v.as_f64())
            .map(|v| v as i64);
    }
    if shape.message.is_none() {
        shape.message = js_sys::Reflect::get(&raw, &JsValue::from_str("message"))
            .ok()
            .and_then(|v| v.as_string())
            .or_else(|| raw.as_string());
    }

    ConnectError::from_provider_code(shape.code, shape.message)
}

/// A balance fetch failure. Recovered silently by the caller; only logged.
#[derive(Clone, Debug, PartialEq)]
pub enum BalanceError {
    /// The provider rejected the `eth_getBalance` call.
    Provider(String),
    /// The provider resolved with something that is not a hex quantity.
    Malformed(String),
}

impl std::fmt::Display for BalanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalanceError::Provider(message) => write!(f, "provider error: {}", message),
            BalanceError::Malformed(raw) => write!(f, "malformed balance value: {:?}", raw),
        }
    }
}

/// Narrow capability the session controller needs from the host environment.
#[allow(async_fn_in_trait)]
pub trait ProviderGateway {
    /// Negotiate account access; resolves with the provider's account list.
    async fn request_accounts(&self) -> Result<Vec<String>, ConnectError>;

    /// Fetch the native-unit balance of `account`, converted to ETH.
    async fn fetch_balance(&self, account: &str) -> Result<f64, BalanceError>;
}

/// The real gateway backed by `window.ethereum`.
#[derive(Clone, Copy, Debug, Default)]
pub struct InjectedProvider;

impl ProviderGateway for InjectedProvider {
    async fn request_accounts(&self) -> Result<Vec<String>, ConnectError> {
        if !hasInjectedProvider() {
            return Err(ConnectError::NoProvider);
        }

        let raw = requestAccounts().await.map_err(classify_rejection)?;
        serde_wasm_bindgen::from_value(raw)
            .map_err(|err| ConnectError::Other(format!("unexpected account list: {}", err)))
    }

    async fn fetch_balance(&self, account: &str) -> Result<f64, BalanceError> {
        let raw = getBalance(account)
            .await
            .map_err(|err| BalanceError::Provider(describe_js_value(&err)))?;

        let hex = raw
            .as_string()
            .ok_or_else(|| BalanceError::Malformed(describe_js_value(&raw)))?;
        let wei = parse_wei_hex(&hex).ok_or(BalanceError::Malformed(hex))?;

        Ok(wei_to_eth(wei))
    }
}

fn describe_js_value(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
