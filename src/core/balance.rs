//! Balance computation - each member's net position within a group.
//!
//! Balances are a pure recomputation over a snapshot of the member list and expenses;
//! nothing here is persisted or updated incrementally.

use super::model::{BalanceEntry, Expense, Member};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// How expenses are charged to members when computing balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceMode {
    /// Every expense is divided equally over the group's current members,
    /// whatever split it was recorded with.
    #[default]
    GroupEqual,
    /// Every member is charged the share recorded on the expense.
    RecordedShares,
}

/// Computes balances with the default [`BalanceMode::GroupEqual`] rule.
///
/// For each expense, `amount / members.len()` is charged to every member and the
/// payer is credited the full amount. Results are in member order, rounded to whole units.
pub fn compute_balances(members: &[Member], expenses: &[Expense]) -> Result<Vec<BalanceEntry>> {
    compute_balances_with(members, expenses, BalanceMode::GroupEqual)
}

/// Computes balances under the given mode, one entry per member in member order.
pub fn compute_balances_with(
    members: &[Member],
    expenses: &[Expense],
    mode: BalanceMode,
) -> Result<Vec<BalanceEntry>> {
    Ok(net_positions(members, expenses, mode)?
        .into_iter()
        .map(|(member, balance)| BalanceEntry {
            member,
            balance: round_half_up(balance),
        })
        .collect())
}

/// Unrounded net position of each member, in member order.
pub fn net_positions(
    members: &[Member],
    expenses: &[Expense],
    mode: BalanceMode,
) -> Result<Vec<(Member, f64)>> {
    if members.is_empty() {
        return Err(Error::NoMembers);
    }

    let mut totals = vec![0.0_f64; members.len()];
    match mode {
        BalanceMode::GroupEqual => {
            #[allow(clippy::cast_precision_loss)] // member counts are tiny
            let head_count = members.len() as f64;
            for expense in expenses {
                let per_head = expense.amount / head_count;
                for (total, member) in totals.iter_mut().zip(members) {
                    if *member == expense.payer {
                        *total += expense.amount - per_head;
                    } else {
                        *total -= per_head;
                    }
                }
            }
        }
        BalanceMode::RecordedShares => {
            let index: HashMap<&str, usize> = members
                .iter()
                .enumerate()
                .map(|(i, m)| (m.as_str(), i))
                .collect();
            for expense in expenses {
                match index.get(expense.payer.as_str()) {
                    Some(&i) => totals[i] += expense.amount,
                    None => warn!(
                        expense_id = %expense.id,
                        payer = %expense.payer,
                        "Payer is not a group member; credit ignored"
                    ),
                }
                for (member, share) in &expense.split.shares {
                    match index.get(member.as_str()) {
                        Some(&i) => totals[i] -= share,
                        None => warn!(
                            expense_id = %expense.id,
                            member = %member,
                            "Share holder is not a group member; share ignored"
                        ),
                    }
                }
            }
        }
    }

    Ok(members.iter().cloned().zip(totals).collect())
}

/// Rounds to the nearest integer, halves towards positive infinity.
///
/// Values outside `i64` saturate at its bounds.
#[must_use]
pub fn round_half_up(value: f64) -> i64 {
    // Saturating cast; validated amounts are capped at MAX_AMOUNT per expense.
    #[allow(clippy::cast_possible_truncation)]
    let rounded = (value + 0.5).floor() as i64;
    rounded
}
