//! Currency capability registry.
//!
//! The order/escrow state machine never names coins. Whether a coin can be
//! released programmatically (2-of-3 multisig custody) and what its canonical
//! divisibility is are data looked up here, so new coins are added by
//! configuration rather than by editing the state machine.

use std::collections::HashMap;
use std::env;

use once_cell::sync::Lazy;

/// Canonical base-unit divisibility used when a coin is not registered
/// (10^8, the satoshi convention).
pub const DEFAULT_COIN_DIVISIBILITY: u64 = 100_000_000;

/// Per-coin metadata.
#[derive(Debug, Clone)]
pub struct CurrencyInfo {
    pub code: String,
    /// Canonical divisibility of the coin's base unit. A listing's
    /// `coinDivisibility` must match this exactly.
    pub divisibility: u64,
    /// Whether escrow for this coin can be released through the multisig
    /// path. Coins without this capability reject release attempts in any
    /// order state.
    pub supports_programmatic_release: bool,
}

static DEFAULT_CURRENCIES: Lazy<Vec<CurrencyInfo>> = Lazy::new(|| {
    vec![
        CurrencyInfo {
            code: "BTC".into(),
            divisibility: DEFAULT_COIN_DIVISIBILITY,
            supports_programmatic_release: true,
        },
        CurrencyInfo {
            code: "BCH".into(),
            divisibility: DEFAULT_COIN_DIVISIBILITY,
            supports_programmatic_release: true,
        },
        CurrencyInfo {
            code: "LTC".into(),
            divisibility: DEFAULT_COIN_DIVISIBILITY,
            supports_programmatic_release: true,
        },
        // ZEC custody lacks the multisig release path.
        CurrencyInfo {
            code: "ZEC".into(),
            divisibility: DEFAULT_COIN_DIVISIBILITY,
            supports_programmatic_release: false,
        },
    ]
});

/// Lookup table from coin code (case-insensitive) to [`CurrencyInfo`].
#[derive(Debug, Clone, Default)]
pub struct CurrencyRegistry {
    currencies: HashMap<String, CurrencyInfo>,
}

impl CurrencyRegistry {
    /// Registry preloaded with the built-in coin table.
    pub fn with_defaults() -> Self {
        let mut registry = Self::default();
        for info in DEFAULT_CURRENCIES.iter() {
            registry.insert(info.clone());
        }
        registry
    }

    /// Built-in table with the `ESCROW_RELEASE_DISABLED_COINS` override
    /// applied (comma-separated coin codes whose release capability is
    /// turned off).
    pub fn from_env() -> Self {
        let mut registry = Self::with_defaults();
        if let Ok(disabled) = env::var("ESCROW_RELEASE_DISABLED_COINS") {
            for code in disabled.split(',') {
                let code = code.trim();
                if code.is_empty() {
                    continue;
                }
                tracing::info!(coin = %code, "escrow release disabled by configuration");
                registry.set_release_capability(code, false);
            }
        }
        registry
    }

    pub fn insert(&mut self, info: CurrencyInfo) {
        self.currencies.insert(info.code.to_uppercase(), info);
    }

    pub fn get(&self, code: &str) -> Option<&CurrencyInfo> {
        self.currencies.get(&code.to_uppercase())
    }

    /// Canonical divisibility for `code`, falling back to
    /// [`DEFAULT_COIN_DIVISIBILITY`] for unregistered coins.
    pub fn divisibility(&self, code: &str) -> u64 {
        self.get(code)
            .map(|info| info.divisibility)
            .unwrap_or(DEFAULT_COIN_DIVISIBILITY)
    }

    /// Whether escrow for `code` may be released programmatically.
    /// Unregistered coins are not release-capable until configured.
    pub fn supports_programmatic_release(&self, code: &str) -> bool {
        self.get(code)
            .map(|info| info.supports_programmatic_release)
            .unwrap_or(false)
    }

    fn set_release_capability(&mut self, code: &str, capable: bool) {
        let key = code.to_uppercase();
        match self.currencies.get_mut(&key) {
            Some(info) => info.supports_programmatic_release = capable,
            None => self.insert(CurrencyInfo {
                code: key,
                divisibility: DEFAULT_COIN_DIVISIBILITY,
                supports_programmatic_release: capable,
            }),
        }
    }
}
