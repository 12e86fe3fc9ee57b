//! I/O helpers for the generators.

pub mod config;
pub mod files;
