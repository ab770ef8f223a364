//! issuedeck - Terminal client for an issue tracker REST API
//!
//! This library crate exposes internal modules for integration testing.

pub mod api;
pub mod cli;
pub mod config;
pub mod data;
pub mod filter;
pub mod tui;
pub mod util;
