//! monofont CLI library.
//!
//! This crate provides the core functionality for the `monofont` binary:
//! job loading, logging setup, and the conversion, preview and inspection
//! commands.

pub mod commands;
pub mod input;
pub mod logging;
