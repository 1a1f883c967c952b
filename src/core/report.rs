//! Group report generation.
//!
//! This module builds the group detail view: expense list, total and balances.
//! All functions are framework-agnostic and return structured data or plain text
//! that the bot layer can place in an embed.

use super::{
    balance::{BalanceMode, compute_balances_with},
    model::{BalanceEntry, Expense, Group},
};
use crate::errors::Result;
use std::fmt::Write;

/// Everything shown on a group's detail view.
#[derive(Debug, Clone)]
pub struct GroupSummary {
    /// Group id
    pub group_id: String,
    /// Group name
    pub name: String,
    /// Sum of all expense amounts
    pub total: f64,
    /// Expenses in recorded order
    pub expenses: Vec<Expense>,
    /// One balance per member, in member order
    pub balances: Vec<BalanceEntry>,
}

/// Builds the detail view of `group`, computing balances under `mode`.
pub fn summarize_group(group: &Group, mode: BalanceMode) -> Result<GroupSummary> {
    Ok(GroupSummary {
        group_id: group.id.clone(),
        name: group.name.clone(),
        total: group.total(),
        expenses: group.expenses.clone(),
        balances: compute_balances_with(&group.members, &group.expenses, mode)?,
    })
}

/// Formats an amount with the currency symbol, dropping the fraction for whole amounts.
///
/// # Returns
/// Formatted string like "₹100" or "₹12.50"
#[must_use]
pub fn format_amount(amount: f64, currency: &str) -> String {
    if amount.fract().abs() < f64::EPSILON {
        format!("{currency}{amount:.0}")
    } else {
        format!("{currency}{amount:.2}")
    }
}

/// Formats one balance line, e.g. `alice: will receive ₹50` or `bob: owes ₹50`.
#[must_use]
pub fn format_balance(entry: &BalanceEntry, currency: &str) -> String {
    if entry.balance >= 0 {
        format!("{}: will receive {currency}{}", entry.member, entry.balance)
    } else {
        format!("{}: owes {currency}{}", entry.member, entry.balance.unsigned_abs())
    }
}

/// Formats one expense line, e.g. `Dinner | Paid by alice | ₹100`.
#[must_use]
pub fn format_expense_line(expense: &Expense, currency: &str) -> String {
    format!(
        "{} | Paid by {} | {}",
        expense.title,
        expense.payer,
        format_amount(expense.amount, currency)
    )
}

/// Renders the whole summary as plain text.
pub fn format_group_summary(summary: &GroupSummary, currency: &str) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{}", summary.name)?;

    if summary.expenses.is_empty() {
        writeln!(out, "No expenses yet.")?;
    } else {
        for expense in &summary.expenses {
            writeln!(out, "{}", format_expense_line(expense, currency))?;
        }
        writeln!(out, "Total: {}", format_amount(summary.total, currency))?;
    }

    writeln!(out, "\nBalances")?;
    for entry in &summary.balances {
        writeln!(out, "{}", format_balance(entry, currency))?;
    }
    Ok(out)
}
