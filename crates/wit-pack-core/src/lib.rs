#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Helpers shared by the wit-pack generator and its command-line front end.
//!
//! - [`utils`]: identifier case conversion between WIT's kebab-case and the
//!   conventions of the target languages
//! - [`Colors`]: ANSI styling for CLI status lines

mod colors;
pub mod utils;

#[cfg(test)]
mod colors_tests;
#[cfg(test)]
mod utils_tests;

pub use colors::Colors;
