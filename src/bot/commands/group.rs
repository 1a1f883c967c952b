//! Group Discord commands - creating, listing and showing groups.
//!
//! These commands go through the core group and report modules; the detail view shows
//! the same expense list and balances regardless of which split each expense used.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, reply_rejection, require_login},
        core::{group, report},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Discord's limit on the length of an embed field value.
    const FIELD_VALUE_LIMIT: usize = 1024;
    /// Discord's limit on the number of fields in one embed.
    const MAX_FIELDS: usize = 25;

    /// Creates a new group. You are added as a member automatically.
    #[poise::command(slash_command, prefix_command)]
    pub async fn creategroup(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Group name"] name: String,
        #[description = "Members, comma-separated (e.g. alice, bob)"] members: String,
    ) -> Result<()> {
        let Some(user) = require_login(ctx).await? else {
            return Ok(());
        };

        match group::create_group(&ctx.data().repository, &name, &members, Some(&user)).await {
            Ok(created) => {
                ctx.say(format!(
                    "✅ Created group **{}** with {}",
                    created.name,
                    created.members.join(", ")
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_rejection(ctx, e).await,
        }
    }

    /// Lists all groups with their expense totals.
    #[poise::command(slash_command, prefix_command)]
    pub async fn groups(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        if require_login(ctx).await?.is_none() {
            return Ok(());
        }

        let currency = &ctx.data().settings.currency_symbol;
        let groups = group::list_groups(&ctx.data().repository).await?;

        if groups.is_empty() {
            ctx.say("No groups yet. Create one with `/creategroup`.")
                .await?;
            return Ok(());
        }

        let fields: Vec<(String, String, bool)> = groups
            .iter()
            .take(MAX_FIELDS)
            .map(|g| {
                let value = format!(
                    "Members: {}\nTotal: {}",
                    g.members.join(", "),
                    report::format_amount(g.total(), currency)
                );
                (g.name.clone(), truncate(&value), false)
            })
            .collect();

        let embed = serenity::CreateEmbed::default()
            .title("👥 Groups")
            .color(0x0034_98DB)
            .fields(fields)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Total: {} | {} group{}",
                report::format_amount(group::overall_total(&groups), currency),
                groups.len(),
                if groups.len() == 1 { "" } else { "s" }
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows a group's expenses and who owes whom.
    #[poise::command(slash_command, prefix_command)]
    pub async fn group(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Group name"]
        #[autocomplete = "autocomplete::autocomplete_group_name"]
        group: String,
    ) -> Result<()> {
        let data = ctx.data();
        let currency = &data.settings.currency_symbol;

        let summary = match data.repository.find_group_by_id_or_name(&group).await {
            Ok(found) => report::summarize_group(&found, data.settings.balance_mode),
            Err(e) => Err(e),
        };
        let summary = match summary {
            Ok(summary) => summary,
            Err(e) => return reply_rejection(ctx, e).await,
        };

        let expenses = if summary.expenses.is_empty() {
            "No expenses yet.".to_string()
        } else {
            summary
                .expenses
                .iter()
                .map(|e| report::format_expense_line(e, currency))
                .collect::<Vec<_>>()
                .join("\n")
        };
        let balances = summary
            .balances
            .iter()
            .map(|b| report::format_balance(b, currency))
            .collect::<Vec<_>>()
            .join("\n");

        let embed = serenity::CreateEmbed::default()
            .title(format!("📒 {}", summary.name))
            .description(format!(
                "Total spent: {}",
                report::format_amount(summary.total, currency)
            ))
            .color(0x0034_98DB)
            .field("Expenses", truncate(&expenses), false)
            .field("Balances", truncate(&balances), false)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Group ID: {}",
                summary.group_id
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Cuts text to fit an embed field, ending on a whole line where possible.
    fn truncate(text: &str) -> String {
        if text.len() <= FIELD_VALUE_LIMIT {
            return text.to_string();
        }
        let mut out = String::new();
        for line in text.lines() {
            if out.len() + line.len() + 2 > FIELD_VALUE_LIMIT - 1 {
                break;
            }
            out.push_str(line);
            out.push('\n');
        }
        out.push('…');
        out
    }
}

// Re-export all commands
pub use inner::*;
