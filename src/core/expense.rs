//! Expense business logic - recording a new expense against a group.
//!
//! Recording runs validation, share resolution and construction in that order, then
//! appends the expense to its group and saves the group list. Nothing is written when
//! any step rejects the proposal.

use super::model::{Expense, Group, Shares, Split, SplitKind};
use super::repository::GroupRepository;
use super::split::{effective_members, resolve};
use super::store::KeyValueStore;
use super::validation::{ExpenseDraft, ExpenseProposal, SplitPolicy, validate_expense};
use crate::errors::Result;
use tracing::info;
use uuid::Uuid;

/// Turns a validated draft and its resolved shares into an expense with a fresh id.
#[must_use]
pub fn build_expense(draft: ExpenseDraft, shares: Shares) -> Expense {
    let kind = match draft.policy {
        SplitPolicy::Equal => SplitKind::Equal,
        SplitPolicy::Custom(_) => SplitKind::Custom,
    };
    Expense {
        id: Uuid::new_v4().to_string(),
        title: draft.title,
        description: draft.description,
        amount: draft.amount,
        category: draft.category,
        date: draft.date,
        payer: draft.payer,
        split: Split { kind, shares },
    }
}

/// Validates `proposal` against `group` and builds the expense, without storing it.
///
/// The acting user counts as a member for this expense even if the group does not list them.
pub fn prepare_expense(
    group: &Group,
    acting_user: Option<&str>,
    proposal: &ExpenseProposal,
) -> Result<Expense> {
    let members = effective_members(&group.members, acting_user);
    let draft = validate_expense(proposal, &members)?;
    let shares = resolve(draft.amount, &draft.policy, &members)?;
    Ok(build_expense(draft, shares))
}

/// Records a new expense in the group with `group_id`.
pub async fn record_expense<S: KeyValueStore>(
    repo: &GroupRepository<S>,
    group_id: &str,
    acting_user: Option<&str>,
    proposal: &ExpenseProposal,
) -> Result<Expense> {
    let expense = repo
        .update_group(group_id, |group| {
            let expense = prepare_expense(group, acting_user, proposal)?;
            group.expenses.push(expense.clone());
            Ok(expense)
        })
        .await?;

    info!(
        group_id,
        expense_id = %expense.id,
        amount = expense.amount,
        payer = %expense.payer,
        split = ?expense.split.kind,
        "Expense recorded"
    );
    Ok(expense)
}
