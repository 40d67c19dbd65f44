//! Application constants

/// Install page opened by the "Install Metamask" remediation action.
pub const METAMASK_INSTALL_URL: &str = "https://metamask.io/download/";

// Chain units (Ethereum mainnet)
pub const WEI_PER_ETH: f64 = 1_000_000_000_000_000_000.0;
pub const BALANCE_DISPLAY_DECIMALS: usize = 4;

// Toast timing
pub const TOAST_DWELL_MS: u32 = 5_000;
pub const TOAST_EXIT_MS: u32 = 300;
