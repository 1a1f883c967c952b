//! `SplitBuddy` - shared expense splitting for small groups
//!
//! Users create groups, log shared expenses with equal or custom splits, and see who
//! owes whom. All state is kept as JSON in a string-keyed store; a Discord bot is the
//! front end.

// Hard errors: no unsafe code, and no silently ignored results or broken doc links
#![deny(
    unsafe_code,
    unreachable_code,
    unreachable_patterns,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warnings: docs on public items, clippy's stricter groups, and panicking shortcuts
// outside tests. `missing_docs` stays a warning since poise macros emit undocumented items.
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::needless_pass_by_value,
    clippy::redundant_closure_for_method_calls,
    clippy::wildcard_imports,
    rust_2018_idioms,
)]
// Allowed crate-wide
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
)]

/// Discord bot interface - commands, handlers, and bot context
pub mod bot;
/// Configuration management for database and application settings
pub mod config;
/// Core business logic - framework-agnostic validation, splitting, balances and storage
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;

#[cfg(test)]
pub mod test_utils;
