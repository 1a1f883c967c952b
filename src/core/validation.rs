//! Expense proposal validation.
//!
//! Turns the raw text a user entered for a new expense into an [`ExpenseDraft`], or
//! rejects it with the input error to show back to them. Validation is pure: ids are
//! only assigned once a draft is turned into an [`Expense`](super::model::Expense).

use super::model::{Member, Shares};
use crate::errors::{Error, Result};
use std::collections::BTreeMap;

/// Largest allowed difference between the sum of custom shares and the amount.
pub const SHARE_TOLERANCE: f64 = 0.01;

/// Largest accepted expense amount. Keeps every balance well inside `i64`.
pub const MAX_AMOUNT: f64 = 1e12;

/// Split choice as entered, before any parsing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SplitInput {
    /// Divide evenly
    #[default]
    Equal,
    /// Raw share text per member; members without an entry owe nothing
    Custom(BTreeMap<Member, String>),
}

/// A proposed expense exactly as the user entered it.
#[derive(Debug, Clone, Default)]
pub struct ExpenseProposal {
    /// Required title
    pub title: String,
    /// Optional description
    pub description: String,
    /// Amount text, required
    pub amount: String,
    /// Optional category
    pub category: String,
    /// Optional date text
    pub date: String,
    /// Paying member, required
    pub payer: String,
    /// Split choice
    pub split: SplitInput,
}

/// Validated split policy.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitPolicy {
    /// Divide evenly across the effective member set
    Equal,
    /// Parsed custom shares, summing to the amount within [`SHARE_TOLERANCE`]
    Custom(Shares),
}

/// An accepted proposal, ready for share resolution and construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Positive, finite amount
    pub amount: f64,
    /// Category
    pub category: String,
    /// Date text
    pub date: String,
    /// Paying member, part of the effective member set
    pub payer: Member,
    /// Validated split policy
    pub policy: SplitPolicy,
}

/// Validates a proposal against the effective member set of its group.
///
/// Checks run in this order: required fields, amount, payer membership, and for
/// custom splits each share value followed by the share sum.
pub fn validate_expense(proposal: &ExpenseProposal, members: &[Member]) -> Result<ExpenseDraft> {
    if proposal.title.trim().is_empty() {
        return Err(Error::MissingField { field: "title" });
    }
    if proposal.amount.trim().is_empty() {
        return Err(Error::MissingField { field: "amount" });
    }
    if proposal.payer.trim().is_empty() {
        return Err(Error::MissingField { field: "payer" });
    }

    let amount = parse_amount(&proposal.amount)?;

    if !members.iter().any(|m| *m == proposal.payer) {
        return Err(Error::UnknownPayer {
            payer: proposal.payer.clone(),
        });
    }

    let policy = match &proposal.split {
        SplitInput::Equal => SplitPolicy::Equal,
        SplitInput::Custom(entries) => SplitPolicy::Custom(parse_custom_shares(
            amount, entries, members,
        )?),
    };

    Ok(ExpenseDraft {
        title: proposal.title.trim().to_string(),
        description: proposal.description.trim().to_string(),
        amount,
        category: proposal.category.trim().to_string(),
        date: proposal.date.trim().to_string(),
        payer: proposal.payer.clone(),
        policy,
    })
}

/// Parses an amount that must be finite, strictly positive and at most [`MAX_AMOUNT`].
pub fn parse_amount(input: &str) -> Result<f64> {
    match input.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 && amount <= MAX_AMOUNT => Ok(amount),
        _ => Err(Error::InvalidAmount {
            input: input.to_string(),
        }),
    }
}

fn parse_custom_shares(
    amount: f64,
    entries: &BTreeMap<Member, String>,
    members: &[Member],
) -> Result<Shares> {
    let mut shares = Shares::new();
    let mut total = 0.0;

    for member in members {
        let input = entries.get(member).map_or("", |s| s.trim());
        let value = if input.is_empty() {
            0.0
        } else {
            match input.parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => v,
                _ => {
                    return Err(Error::InvalidShareValue {
                        member: member.clone(),
                        input: input.to_string(),
                    });
                }
            }
        };
        shares.insert(member.clone(), value);
        total += value;
    }

    if (total - amount).abs() > SHARE_TOLERANCE {
        return Err(Error::ShareSumMismatch { amount, total });
    }

    Ok(shares)
}

/// Parses share text of the form `alice=60, bob=40` into raw per-member entries.
///
/// Values are kept as text; [`validate_expense`] parses them.
pub fn parse_share_entries(text: &str) -> Result<BTreeMap<Member, String>> {
    let mut entries = BTreeMap::new();
    for fragment in text.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        let Some((member, value)) = fragment.split_once('=') else {
            return Err(Error::InvalidShareValue {
                member: fragment.to_string(),
                input: fragment.to_string(),
            });
        };
        let member = member.trim();
        if member.is_empty() {
            return Err(Error::InvalidShareValue {
                member: String::new(),
                input: fragment.to_string(),
            });
        }
        entries.insert(member.to_string(), value.trim().to_string());
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{members, proposal};

    fn custom(entries: &[(&str, &str)]) -> SplitInput {
        SplitInput::Custom(
            entries
                .iter()
                .map(|(m, v)| ((*m).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_valid_equal_proposal() {
        let draft = validate_expense(&proposal("Dinner", "100", "alice"), &members(&["alice", "bob"]))
            .unwrap();
        assert_eq!(draft.amount, 100.0);
        assert_eq!(draft.payer, "alice");
        assert_eq!(draft.policy, SplitPolicy::Equal);
    }

    #[test]
    fn test_missing_fields() {
        let group = members(&["alice"]);
        let cases = [
            (proposal("", "10", "alice"), "title"),
            (proposal("Taxi", "", "alice"), "amount"),
            (proposal("Taxi", "10", ""), "payer"),
        ];
        for (p, field) in cases {
            let err = validate_expense(&p, &group).unwrap_err();
            assert!(
                matches!(err, Error::MissingField { field: f } if f == field),
                "expected missing {field}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_non_numeric_amount_is_invalid() {
        let err = validate_expense(&proposal("Taxi", "abc", "alice"), &members(&["alice"]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAmount { input } if input == "abc"));
    }

    #[test]
    fn test_non_positive_and_non_finite_amounts_are_invalid() {
        for text in ["0", "-5", "NaN", "inf", "-inf"] {
            let err = parse_amount(text).unwrap_err();
            assert!(matches!(err, Error::InvalidAmount { .. }), "{text}");
        }
        assert_eq!(parse_amount(" 12.5 ").unwrap(), 12.5);
    }

    #[test]
    fn test_amount_above_maximum_is_invalid() {
        let err = parse_amount("20000000000000000000").unwrap_err();
        assert!(matches!(err, Error::InvalidAmount { input } if input == "20000000000000000000"));
        assert!(parse_amount("1000000000001").is_err());
        assert_eq!(parse_amount("1000000000000").unwrap(), MAX_AMOUNT);
    }

    #[test]
    fn test_payer_outside_group_rejected() {
        let err = validate_expense(&proposal("Taxi", "10", "mallory"), &members(&["alice", "bob"]))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownPayer { payer } if payer == "mallory"));
    }

    #[test]
    fn test_custom_share_sum_mismatch() {
        let mut p = proposal("Hotel", "100", "a");
        p.split = custom(&[("a", "60"), ("b", "41")]);
        let err = validate_expense(&p, &members(&["a", "b"])).unwrap_err();
        assert!(matches!(
            err,
            Error::ShareSumMismatch { amount, total } if amount == 100.0 && total == 101.0
        ));
    }

    #[test]
    fn test_custom_share_within_tolerance_accepted() {
        let mut p = proposal("Hotel", "100", "a");
        p.split = custom(&[("a", "33.33"), ("b", "33.33"), ("c", "33.33")]);
        let draft = validate_expense(&p, &members(&["a", "b", "c"])).unwrap();
        let SplitPolicy::Custom(shares) = draft.policy else {
            panic!("expected custom policy");
        };
        assert_eq!(shares.len(), 3);
        assert_eq!(shares["b"], 33.33);
    }

    #[test]
    fn test_custom_missing_entry_counts_as_zero() {
        let mut p = proposal("Gift", "50", "a");
        p.split = custom(&[("a", "50")]);
        let draft = validate_expense(&p, &members(&["a", "b"])).unwrap();
        let SplitPolicy::Custom(shares) = draft.policy else {
            panic!("expected custom policy");
        };
        assert_eq!(shares["b"], 0.0);
    }

    #[test]
    fn test_custom_invalid_share_value() {
        let mut p = proposal("Gift", "50", "a");
        p.split = custom(&[("a", "25"), ("b", "lots")]);
        let err = validate_expense(&p, &members(&["a", "b"])).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidShareValue { member, input } if member == "b" && input == "lots"
        ));
    }

    #[test]
    fn test_custom_negative_share_rejected() {
        let mut p = proposal("Gift", "50", "a");
        p.split = custom(&[("a", "60"), ("b", "-10")]);
        let err = validate_expense(&p, &members(&["a", "b"])).unwrap_err();
        assert!(matches!(err, Error::InvalidShareValue { .. }));
    }

    #[test]
    fn test_custom_entries_for_non_members_ignored() {
        let mut p = proposal("Gift", "50", "a");
        p.split = custom(&[("a", "50"), ("zed", "1000")]);
        let draft = validate_expense(&p, &members(&["a"])).unwrap();
        let SplitPolicy::Custom(shares) = draft.policy else {
            panic!("expected custom policy");
        };
        assert!(!shares.contains_key("zed"));
    }

    #[test]
    fn test_parse_share_entries() {
        let entries = parse_share_entries(" alice = 60, bob=40 ,").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries["alice"], "60");
        assert_eq!(entries["bob"], "40");

        assert!(parse_share_entries("").unwrap().is_empty());
        assert!(matches!(
            parse_share_entries("alice 60").unwrap_err(),
            Error::InvalidShareValue { .. }
        ));
        assert!(parse_share_entries("=5").is_err());
    }
}
