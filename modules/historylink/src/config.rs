//! Configuration for the historylink module

use serde::{Deserialize, Serialize};

/// Historylink module configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Page size used when a list request does not specify one
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,

    /// Largest page size a client may ask for
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,

    /// Maximum length (in characters) of any record or impact text field
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            max_text_length: default_max_text_length(),
        }
    }
}

fn default_page_size() -> u64 {
    10
}

fn default_max_page_size() -> u64 {
    100
}

fn default_max_text_length() -> usize {
    255
}
