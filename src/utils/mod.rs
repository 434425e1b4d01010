//! Utility functions and helpers.

pub mod text;

pub use text::{capitalize_first, title_case};
