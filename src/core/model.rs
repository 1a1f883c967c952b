//! Strongly-typed group and expense model.
//!
//! These types serialize to exactly the JSON layout kept under the `groups` key:
//! an array of groups, each owning its expenses, each expense carrying its split.
//! Groups are validated on the way in (`Group: TryFrom<RawGroup>`), so code past
//! the storage boundary never sees duplicate members or non-positive amounts.

use crate::errors::Error;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

/// A group member, identified only by their username.
pub type Member = String;

/// Owed share per member.
pub type Shares = BTreeMap<Member, f64>;

/// How an expense was divided when it was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitKind {
    /// Evenly across the effective member set
    Equal,
    /// Explicit per-member amounts
    Custom,
}

/// The split recorded on an expense, with its resolved shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// Split policy used
    #[serde(rename = "type")]
    pub kind: SplitKind,
    /// Resolved owed share per member
    #[serde(default)]
    pub shares: Shares,
}

/// A shared expense. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Short title, required
    pub title: String,
    /// Free-form description
    #[serde(rename = "desc", default)]
    pub description: String,
    /// Total amount paid, always positive
    pub amount: f64,
    /// Free-form category
    #[serde(default)]
    pub category: String,
    /// Free-form date text as entered
    #[serde(default)]
    pub date: String,
    /// Member who paid
    pub payer: Member,
    /// How the amount is divided
    pub split: Split,
}

/// A named collection of members sharing expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGroup")]
pub struct Group {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Display name
    pub name: String,
    /// Members in insertion order, unique
    pub members: Vec<Member>,
    /// Expenses in the order they were recorded
    pub expenses: Vec<Expense>,
}

/// Unvalidated group as read from storage.
#[derive(Debug, Deserialize)]
struct RawGroup {
    id: String,
    name: String,
    members: Vec<Member>,
    #[serde(default)]
    expenses: Vec<Expense>,
}

impl TryFrom<RawGroup> for Group {
    type Error = Error;

    fn try_from(raw: RawGroup) -> Result<Self, Self::Error> {
        if raw.id.trim().is_empty() {
            return Err(Error::InvalidGroupData {
                message: format!("group '{}' has an empty id", raw.name),
            });
        }

        let mut seen = HashSet::with_capacity(raw.members.len());
        if let Some(duplicate) = raw.members.iter().find(|m| !seen.insert(m.as_str())) {
            return Err(Error::InvalidGroupData {
                message: format!("group '{}' lists member '{duplicate}' twice", raw.id),
            });
        }

        if let Some(bad) = raw
            .expenses
            .iter()
            .find(|e| !e.amount.is_finite() || e.amount <= 0.0)
        {
            return Err(Error::InvalidGroupData {
                message: format!(
                    "expense '{}' in group '{}' has invalid amount {}",
                    bad.id, raw.id, bad.amount
                ),
            });
        }

        Ok(Self {
            id: raw.id,
            name: raw.name,
            members: raw.members,
            expenses: raw.expenses,
        })
    }
}

impl Group {
    /// Creates an empty group with a fresh id.
    ///
    /// Callers are responsible for passing a deduplicated member list.
    #[must_use]
    pub fn new(name: String, members: Vec<Member>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            members,
            expenses: Vec::new(),
        }
    }

    /// Sum of all expense amounts in this group.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Whether `member` belongs to this group (exact, case-sensitive).
    #[must_use]
    pub fn has_member(&self, member: &str) -> bool {
        self.members.iter().any(|m| m == member)
    }
}

/// A member's net position. Derived, never persisted.
///
/// Positive means the group owes the member, negative means the member owes the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceEntry {
    /// The member
    pub member: Member,
    /// Net balance rounded to whole currency units
    pub balance: i64,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    const STORED: &str = r#"[
        {
            "id": "g1",
            "name": "Trip",
            "members": ["alice", "bob"],
            "expenses": [
                {
                    "id": "e1",
                    "title": "Dinner",
                    "desc": "Thai place",
                    "amount": 100,
                    "category": "food",
                    "date": "2024-05-01",
                    "payer": "alice",
                    "split": { "type": "custom", "shares": { "alice": 60, "bob": 40 } }
                }
            ]
        }
    ]"#;

    #[test]
    fn test_parse_stored_layout() {
        let groups: Vec<Group> = serde_json::from_str(STORED).unwrap();
        assert_eq!(groups.len(), 1);
        let expense = &groups[0].expenses[0];
        assert_eq!(expense.description, "Thai place");
        assert_eq!(expense.split.kind, SplitKind::Custom);
        assert_eq!(expense.split.shares["alice"], 60.0);
        assert_eq!(groups[0].total(), 100.0);
    }

    #[test]
    fn test_serialize_uses_stored_field_names() {
        let groups: Vec<Group> = serde_json::from_str(STORED).unwrap();
        let value = serde_json::to_value(&groups).unwrap();
        let expense = &value[0]["expenses"][0];
        assert_eq!(expense["desc"], "Thai place");
        assert_eq!(expense["split"]["type"], "custom");
        assert!(expense.get("description").is_none());
    }

    #[test]
    fn test_group_without_expenses_loads_empty() {
        let group: Group =
            serde_json::from_str(r#"{"id":"g2","name":"Flat","members":["a"]}"#).unwrap();
        assert!(group.expenses.is_empty());
    }

    #[test]
    fn test_duplicate_members_rejected() {
        let result: Result<Group, _> =
            serde_json::from_str(r#"{"id":"g3","name":"Dup","members":["a","b","a"]}"#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("member 'a' twice"), "{message}");
    }

    #[test]
    fn test_members_are_case_sensitive() {
        let group: Group =
            serde_json::from_str(r#"{"id":"g4","name":"Case","members":["Alice","alice"]}"#)
                .unwrap();
        assert_eq!(group.members.len(), 2);
        assert!(group.has_member("Alice"));
        assert!(!group.has_member("ALICE"));
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let json = r#"{"id":"g5","name":"Bad","members":["a"],"expenses":[
            {"id":"e","title":"t","amount":0,"payer":"a","split":{"type":"equal","shares":{}}}
        ]}"#;
        assert!(serde_json::from_str::<Group>(json).is_err());
    }

    #[test]
    fn test_empty_id_rejected() {
        assert!(serde_json::from_str::<Group>(r#"{"id":" ","name":"x","members":[]}"#).is_err());
    }

    #[test]
    fn test_new_group_gets_unique_id() {
        let a = Group::new("A".to_string(), vec!["x".to_string()]);
        let b = Group::new("A".to_string(), vec!["x".to_string()]);
        assert_ne!(a.id, b.id);
        assert!(a.expenses.is_empty());
    }
}
