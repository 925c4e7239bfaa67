//! locale-tools
//!
//! Maintenance utilities for per-language i18n JSON files: deep-merge overlay
//! translations into each file, and strip corrupted numeric keys.

pub mod cli;
pub mod config;
pub mod document;
pub mod locales;
pub mod logging;
pub mod ops;
pub mod runner;

mod test_utils;
