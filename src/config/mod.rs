//! Configuration module for SplitMark
//!
//! This module handles the theme preference and window/layout settings,
//! including serialization to JSON and persistence through the
//! application's key-value store.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
