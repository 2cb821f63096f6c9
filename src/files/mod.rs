//! File operations module for SplitMark
//!
//! Native pickers for importing and exporting markdown files.

pub mod dialogs;
