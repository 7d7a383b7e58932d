//! The three staged searchers, highest confidence first.

pub mod conceptual;
pub mod keyword;
pub mod text;
