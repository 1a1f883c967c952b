//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Expense commands
pub mod expense;

/// General utility commands
pub mod general;

/// Group management commands
pub mod group;

/// Username login commands
pub mod session;

// Export commands
pub use expense::*;
pub use general::*;
pub use group::*;
pub use session::*;
