//! Implementation of the `#[derive(Searchable)]` macro.
//!
//! Generates a schema descriptor and a path accessor from `#[search(...)]`
//! field annotations.

mod attrs;
mod derive;

pub use derive::searchable_derive_impl;
