//! Expense Discord commands - `addexpense`.
//!
//! The command collects the same fields as an expense form: title, amount, split
//! choice with optional custom shares, and free-form description, category and date.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, reply_rejection, require_login},
        core::{
            expense, report,
            validation::{ExpenseProposal, SplitInput, parse_share_entries},
        },
        errors::{Error, Result},
    };

    /// How an expense should be split.
    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum SplitChoice {
        #[name = "Equal"]
        Equal,
        #[name = "Custom"]
        Custom,
    }

    /// Records a shared expense in a group.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, prefix_command)]
    pub async fn addexpense(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Group name"]
        #[autocomplete = "autocomplete::autocomplete_group_name"]
        group: String,
        #[description = "What the expense was for"] title: String,
        #[description = "Total amount"] amount: String,
        #[description = "How to split it (default: Equal)"] split: Option<SplitChoice>,
        #[description = "Custom shares, e.g. alice=60, bob=40"] shares: Option<String>,
        #[description = "Who paid (default: you)"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        payer: Option<String>,
        #[description = "Optional description"] description: Option<String>,
        #[description = "Optional category"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: Option<String>,
        #[description = "Optional date (YYYY-MM-DD)"] date: Option<String>,
    ) -> Result<()> {
        let Some(user) = require_login(ctx).await? else {
            return Ok(());
        };
        let data = ctx.data();

        let split = match split.unwrap_or(SplitChoice::Equal) {
            SplitChoice::Equal => SplitInput::Equal,
            SplitChoice::Custom => {
                match parse_share_entries(shares.as_deref().unwrap_or_default()) {
                    Ok(entries) => SplitInput::Custom(entries),
                    Err(e) => return reply_rejection(ctx, e).await,
                }
            }
        };

        let proposal = ExpenseProposal {
            title,
            description: description.unwrap_or_default(),
            amount,
            category: category.unwrap_or_default(),
            date: date.unwrap_or_default(),
            payer: payer.unwrap_or_else(|| user.clone()),
            split,
        };

        let recorded = match data.repository.find_group_by_id_or_name(&group).await {
            Ok(found) => {
                expense::record_expense(&data.repository, &found.id, Some(&user), &proposal).await
            }
            Err(e) => Err(e),
        };

        match recorded {
            Ok(expense) => {
                let currency = &data.settings.currency_symbol;
                let share_list: Vec<String> = expense
                    .split
                    .shares
                    .iter()
                    .map(|(member, share)| {
                        format!("{member} {}", report::format_amount(*share, currency))
                    })
                    .collect();
                ctx.say(format!(
                    "✅ Added **{}** ({}) to **{group}**, paid by {}\nShares: {}",
                    expense.title,
                    report::format_amount(expense.amount, currency),
                    expense.payer,
                    share_list.join(", ")
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_rejection(ctx, e).await,
        }
    }
}

// Re-export all commands
pub use inner::*;
