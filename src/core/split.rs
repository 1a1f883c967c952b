//! Split resolution - turns a validated split policy into per-member shares.

use super::model::{Member, Shares};
use super::validation::SplitPolicy;
use crate::errors::{Error, Result};
use std::collections::HashSet;

/// Group members plus the acting user, deduplicated, in first-seen order.
#[must_use]
pub fn effective_members(members: &[Member], acting_user: Option<&str>) -> Vec<Member> {
    let mut seen = HashSet::with_capacity(members.len() + 1);
    members
        .iter()
        .map(String::as_str)
        .chain(acting_user.filter(|u| !u.is_empty()))
        .filter(|m| seen.insert(*m))
        .map(str::to_string)
        .collect()
}

/// Resolves the owed share of each member.
///
/// Equal shares are rounded to cents independently. The remainder is not
/// redistributed, so their sum can drift from `amount` by up to half a cent per member.
pub fn resolve(amount: f64, policy: &SplitPolicy, members: &[Member]) -> Result<Shares> {
    match policy {
        SplitPolicy::Equal => {
            if members.is_empty() {
                return Err(Error::NoMembers);
            }
            #[allow(clippy::cast_precision_loss)] // member counts are tiny
            let share = round_to_cents(amount / members.len() as f64);
            Ok(members.iter().map(|m| (m.clone(), share)).collect())
        }
        SplitPolicy::Custom(shares) => Ok(shares.clone()),
    }
}

/// Rounds to two decimal places.
#[must_use]
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::members;

    #[test]
    fn test_effective_members_adds_acting_user() {
        let set = effective_members(&members(&["alice", "bob"]), Some("carol"));
        assert_eq!(set, members(&["alice", "bob", "carol"]));
    }

    #[test]
    fn test_effective_members_deduplicates_in_order() {
        let set = effective_members(&members(&["bob", "alice", "bob"]), Some("alice"));
        assert_eq!(set, members(&["bob", "alice"]));
    }

    #[test]
    fn test_effective_members_without_user() {
        assert_eq!(effective_members(&members(&["a"]), None), members(&["a"]));
        assert_eq!(effective_members(&members(&["a"]), Some("")), members(&["a"]));
    }

    #[test]
    fn test_equal_split_even() {
        let shares = resolve(90.0, &SplitPolicy::Equal, &members(&["a", "b", "c"])).unwrap();
        assert_eq!(shares.len(), 3);
        assert!(shares.values().all(|s| *s == 30.0));
    }

    #[test]
    fn test_equal_split_rounds_each_share_without_redistribution() {
        let shares = resolve(100.0, &SplitPolicy::Equal, &members(&["a", "b", "c"])).unwrap();
        assert!(shares.values().all(|s| *s == 33.33));
        let total: f64 = shares.values().sum();
        assert!((total - 99.99).abs() < 1e-9);
    }

    #[test]
    fn test_equal_split_no_members() {
        let err = resolve(10.0, &SplitPolicy::Equal, &[]).unwrap_err();
        assert!(matches!(err, Error::NoMembers));
    }

    #[test]
    fn test_custom_split_passes_shares_through() {
        let mut shares = Shares::new();
        shares.insert("a".to_string(), 70.0);
        shares.insert("b".to_string(), 30.0);
        let resolved = resolve(100.0, &SplitPolicy::Custom(shares.clone()), &members(&["a", "b"]))
            .unwrap();
        assert_eq!(resolved, shares);
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(33.333_333), 33.33);
        assert_eq!(round_to_cents(16.666_666), 16.67);
        assert_eq!(round_to_cents(5.0), 5.0);
    }
}
