//! # Store Configuration State
//!
//! Shop identity shown by clients: name, branch, contact line, currency.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`MERKA_*`, `.env` included)
//! 2. Defaults (this file)
//!
//! Read-only after startup, so it is shared behind an `Arc` without a lock.

use merka_core::Money;
use serde::{Deserialize, Serialize};

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigState {
    /// Product name shown in the footer and page title
    pub store_name: String,

    /// Branch shown in the monitor header
    pub branch: String,

    /// Contact phone shown in the footer
    pub contact_phone: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "Software Merka 4.0".to_string(),
            branch: "Sucursal Centro".to_string(),
            contact_phone: "+506 6449 8045".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `MERKA_STORE_NAME`
    /// - `MERKA_BRANCH`
    /// - `MERKA_CONTACT_PHONE`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`], through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup("MERKA_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(branch) = lookup("MERKA_BRANCH") {
            config.branch = branch;
        }

        if let Some(phone) = lookup("MERKA_CONTACT_PHONE") {
            config.contact_phone = phone;
        }

        config
    }

    /// Formats an amount with the configured symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / 100;
        let frac = (cents % 100).abs() * divisor / 100;

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}
