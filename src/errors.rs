//! Unified error types and result handling.
//!
//! Input errors (a malformed expense proposal, an empty group) are recoverable and
//! meant to be shown back to the user. Everything else is an infrastructure failure.

use thiserror::Error;

/// All errors produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field was left empty.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the empty field
        field: &'static str,
    },

    /// The amount text does not parse to a finite number in `(0, MAX_AMOUNT]`.
    #[error("Amount must be a valid positive number (got '{input}')")]
    InvalidAmount {
        /// The text the user entered
        input: String,
    },

    /// A custom share entry does not parse to a non-negative number.
    #[error("Invalid amount entered for {member}: '{input}'")]
    InvalidShareValue {
        /// Member the share was entered for
        member: String,
        /// The text the user entered
        input: String,
    },

    /// Custom shares do not add up to the expense amount.
    #[error("Sum of custom splits ({total:.2}) must equal the total amount ({amount:.2})")]
    ShareSumMismatch {
        /// Expense amount
        amount: f64,
        /// Sum of the entered shares
        total: f64,
    },

    /// Balances were requested for a group with no members.
    #[error("Group has no members")]
    NoMembers,

    /// The payer is not part of the group.
    #[error("Payer '{payer}' is not a member of this group")]
    UnknownPayer {
        /// The rejected payer
        payer: String,
    },

    /// No readable group with this id exists in the store.
    #[error("Group not found: {id}")]
    GroupNotFound {
        /// Group id or name that was looked up
        id: String,
    },

    /// A group with this name already exists.
    #[error("A group named '{name}' already exists")]
    DuplicateGroupName {
        /// The rejected name
        name: String,
    },

    /// Persisted group data failed validation at the storage boundary.
    #[error("Invalid group data: {message}")]
    InvalidGroupData {
        /// What was wrong with the data
        message: String,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the failure
        message: String,
    },

    /// Database error from `SeaORM`.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// JSON (de)serialization of stored groups failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Formatting a message failed.
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error.
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl Error {
    /// Whether this error is a user-correctable input error rather than a system failure.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::InvalidAmount { .. }
                | Self::InvalidShareValue { .. }
                | Self::ShareSumMismatch { .. }
                | Self::NoMembers
                | Self::UnknownPayer { .. }
                | Self::GroupNotFound { .. }
                | Self::DuplicateGroupName { .. }
        )
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_user_errors() {
        assert!(Error::MissingField { field: "title" }.is_user_error());
        assert!(
            Error::InvalidAmount {
                input: "abc".to_string()
            }
            .is_user_error()
        );
        assert!(Error::NoMembers.is_user_error());
        assert!(
            Error::DuplicateGroupName {
                name: "Flat".to_string()
            }
            .is_user_error()
        );
        assert!(
            !Error::Config {
                message: "bad".to_string()
            }
            .is_user_error()
        );
    }

    #[test]
    fn test_share_sum_mismatch_message() {
        let err = Error::ShareSumMismatch {
            amount: 100.0,
            total: 101.0,
        };
        assert_eq!(
            err.to_string(),
            "Sum of custom splits (101.00) must equal the total amount (100.00)"
        );
    }
}
