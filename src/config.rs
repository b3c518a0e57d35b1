//! Configuration to acknowledge user preferences as well as set defaults.
//!
//! Specifically, we try to find a quire.toml, and if present we load settings
//! from there. Selection behavior (whether the heading line joins a section
//! selection) lives here and is handed to every resolver call explicitly; the
//! resolver itself never reads ambient state.

use facet::Facet;
use std::fs;

#[derive(Facet, Clone)]
/// User preferences loaded from quire.toml or falling back to defaults.
pub struct Config {
    #[facet(default = true)]
    /// Whether section selections include the heading line itself.
    pub include_heading: bool,
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes that count as notes when scanning folders.
    pub file_extensions: Vec<String>,
    #[facet(default = 100)]
    /// Maximum line width for editor text wrapping.
    pub wrap_width: usize,
}

impl Config {
    #[must_use]
    /// Load configuration from quire.toml if present.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load() -> Self {
        if let Ok(contents) = fs::read_to_string("quire.toml") {
            if let Ok(config) = facet_toml::from_str::<Self>(&contents) {
                return config;
            }
        }
        facet_toml::from_str::<Self>("").unwrap()
    }
}
