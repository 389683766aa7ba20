//! Configuration for the conversion pipeline.
//!
//! Everything the batch driver and the field mappers need flows through
//! this structure; the parsing functions themselves take no ambient state.

use crate::constants::{
    DEFAULT_CURRENCY, DEFAULT_FIRM_OFFICE, DEFAULT_SITE_TAG, MAX_DEFAULT_WORKERS,
};
use serde::{Deserialize, Serialize};

/// Settings for a batch conversion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Number of statement files converted concurrently
    pub workers: usize,

    /// Abort the whole batch on the first file-level error instead of
    /// collecting per-file errors and continuing
    pub fail_fast: bool,

    /// Currency literal stamped into balances rows
    pub currency: String,

    /// Branch office identifier for the Firm/Office column
    pub firm_office: String,

    /// Site tag embedded in output file names
    pub site_tag: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get().min(MAX_DEFAULT_WORKERS),
            fail_fast: false,
            currency: DEFAULT_CURRENCY.to_string(),
            firm_office: DEFAULT_FIRM_OFFICE.to_string(),
            site_tag: DEFAULT_SITE_TAG.to_string(),
        }
    }
}

impl ConvertConfig {
    /// Create configuration with a custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Abort the batch on the first failed file
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Override the currency literal
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Override the Firm/Office literal
    pub fn with_firm_office(mut self, firm_office: impl Into<String>) -> Self {
        self.firm_office = firm_office.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConvertConfig::default();
        assert!(config.workers >= 1);
        assert!(config.workers <= MAX_DEFAULT_WORKERS);
        assert!(!config.fail_fast);
        assert_eq!(config.currency, "CNY");
        assert_eq!(config.firm_office, "Shanghai Bunge");
    }

    #[test]
    fn test_builders() {
        let config = ConvertConfig::default()
            .with_workers(0)
            .with_fail_fast()
            .with_currency("USD");
        assert_eq!(config.workers, 1);
        assert!(config.fail_fast);
        assert_eq!(config.currency, "USD");
    }
}
