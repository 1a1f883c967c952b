//! Core business logic - framework-agnostic expense splitting.
//!
//! The validator, split resolver and balance engine are pure functions over a group
//! snapshot. Persistence goes through [`repository::GroupRepository`], which wraps any
//! [`store::KeyValueStore`].

/// Balance computation
pub mod balance;
/// Expense recording
pub mod expense;
/// Group creation, listing and seeding
pub mod group;
/// Typed group, expense and balance model
pub mod model;
/// Group detail reports and formatting
pub mod report;
/// Typed access to the stored group list
pub mod repository;
/// Username session marker
pub mod session;
/// Split resolution
pub mod split;
/// Key-value persistence
pub mod store;
/// Expense proposal validation
pub mod validation;
