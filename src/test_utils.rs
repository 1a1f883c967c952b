//! Shared test utilities for `SplitBuddy`.
//!
//! This module provides common helper functions for setting up test stores
//! and creating test expenses with sensible defaults.

use crate::{
    core::{
        model::{Expense, Member, Split, SplitKind},
        repository::GroupRepository,
        split::round_to_cents,
        store::{KeyValueStore, MemoryStore, SeaOrmStore},
        validation::ExpenseProposal,
    },
    errors::Result,
};

/// Creates an in-memory `SQLite` store with all tables initialized.
pub async fn setup_test_store() -> Result<SeaOrmStore> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(SeaOrmStore::new(db))
}

/// Creates a group repository over a fresh [`MemoryStore`].
#[must_use]
pub fn memory_repository() -> GroupRepository<MemoryStore> {
    GroupRepository::new(MemoryStore::new())
}

/// A [`MemoryStore`] that yields to the scheduler around every access, so that
/// concurrent read-modify-writes interleave at each await point.
#[derive(Debug, Default)]
pub struct YieldingStore {
    inner: MemoryStore,
}

impl KeyValueStore for YieldingStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        tokio::task::yield_now().await;
        let value = self.inner.get(key).await;
        tokio::task::yield_now().await;
        value
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        tokio::task::yield_now().await;
        self.inner.set(key, value).await
    }
}

/// Creates a group repository over a fresh [`YieldingStore`].
#[must_use]
pub fn yielding_repository() -> GroupRepository<YieldingStore> {
    GroupRepository::new(YieldingStore::default())
}

/// Converts string literals into an owned member list.
#[must_use]
pub fn members(names: &[&str]) -> Vec<Member> {
    names.iter().map(|n| (*n).to_string()).collect()
}

/// An equal-split proposal with the given title, amount text and payer.
#[must_use]
pub fn proposal(title: &str, amount: &str, payer: &str) -> ExpenseProposal {
    ExpenseProposal {
        title: title.to_string(),
        amount: amount.to_string(),
        payer: payer.to_string(),
        ..Default::default()
    }
}

/// An equal-split expense over `split_among`, shares rounded to cents.
///
/// # Defaults
/// * `title`: `"Test expense"`
/// * `category`, `date`, `description`: empty
#[must_use]
pub fn equal_expense(payer: &str, amount: f64, split_among: &[&str]) -> Expense {
    #[allow(clippy::cast_precision_loss)]
    let share = round_to_cents(amount / split_among.len() as f64);
    test_expense(
        payer,
        amount,
        SplitKind::Equal,
        split_among.iter().map(|m| ((*m).to_string(), share)).collect(),
    )
}

/// A custom-split expense with explicit shares.
#[must_use]
pub fn custom_expense(payer: &str, amount: f64, shares: &[(&str, f64)]) -> Expense {
    test_expense(
        payer,
        amount,
        SplitKind::Custom,
        shares.iter().map(|(m, s)| ((*m).to_string(), *s)).collect(),
    )
}

fn test_expense(
    payer: &str,
    amount: f64,
    kind: SplitKind,
    shares: crate::core::model::Shares,
) -> Expense {
    Expense {
        id: uuid::Uuid::new_v4().to_string(),
        title: "Test expense".to_string(),
        description: String::new(),
        amount,
        category: String::new(),
        date: String::new(),
        payer: payer.to_string(),
        split: Split { kind, shares },
    }
}
