//! Command-line front end for [`forumcode_bbparser`].
//!
//! The binary renders forum markup from files or standard input, checks
//! posts for markup that would be shown as text, lists the smiley
//! vocabulary and builds quote replies. Settings come from an optional YAML
//! file, see [`Config`].

pub mod commands;
pub mod config;

pub use commands::{
    check_sources, quote_source, read_sources, render_sources, smiley_json, smiley_table,
    CheckReport, Source,
};
pub use config::{Config, ConfigError, MAX_QUOTE_DEPTH};
