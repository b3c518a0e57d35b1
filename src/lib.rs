//! quire: section-aware selection and note merging for markdown vaults.
//!
//! The core is two independent pieces: [`section`], a pure resolver mapping a
//! heading line to the line range of its section, and [`merge_plan`], an
//! ordered, user-filterable set of merge candidates. Around them sit the
//! storage collaborator ([`vault`]), configuration ([`config`]) and the TUI
//! ([`app_state`], [`ui`]) whose reader and editor surfaces both drive the
//! same resolver.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod input;
pub mod merge_plan;
pub mod section;
pub mod ui;
pub mod vault;
