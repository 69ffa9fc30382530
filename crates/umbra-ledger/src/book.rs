//! The in-memory balance mapping shared by every [`BalanceStore`] backend.
//!
//! [`BalanceBook`] holds the arithmetic rules of the economy and nothing
//! else: backends wrap it with locking and (optionally) persistence.
//!
//! [`BalanceStore`]: crate::traits::BalanceStore

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use umbra_types::{Balance, UserId};

/// Result of a balance mutation or ensuring read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mutation {
    /// Balance after the operation.
    pub balance: Balance,
    /// `true` if the operation materialized a new zero record first.
    pub created: bool,
}

/// Mapping from user identity to balance.
///
/// Serializes as a flat JSON object `{ "<user>": <balance> }` with keys in
/// sorted order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BalanceBook {
    balances: BTreeMap<UserId, Balance>,
}

impl BalanceBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with a record.
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Balance of `user` without materializing a record.
    pub fn get(&self, user: &UserId) -> Option<Balance> {
        self.balances.get(user).copied()
    }

    /// Iterate records in user id order.
    pub fn iter(&self) -> impl Iterator<Item = (&UserId, Balance)> {
        self.balances.iter().map(|(k, v)| (k, *v))
    }

    /// Create a zero record for `user` if none exists.
    ///
    /// Returns `true` if a record was created.
    pub fn ensure(&mut self, user: &UserId) -> bool {
        if self.balances.contains_key(user) {
            return false;
        }
        self.balances.insert(user.clone(), 0);
        true
    }

    /// Ensure, then read.
    pub fn balance(&mut self, user: &UserId) -> Mutation {
        let created = self.ensure(user);
        Mutation {
            balance: self.balances[user],
            created,
        }
    }

    /// Ensure, then add `amount`. Negative amounts are accepted as-is; the
    /// sum saturates at the `i64` bounds.
    pub fn credit(&mut self, user: &UserId, amount: Balance) -> Mutation {
        let created = self.ensure(user);
        let slot = self.slot(user);
        *slot = slot.saturating_add(amount);
        Mutation {
            balance: *slot,
            created,
        }
    }

    /// Ensure, then subtract `amount`, flooring the result at zero.
    ///
    /// Debiting more than the balance is not an error: the excess is
    /// absorbed and the balance ends at 0.
    pub fn debit(&mut self, user: &UserId, amount: Balance) -> Mutation {
        let created = self.ensure(user);
        let slot = self.slot(user);
        *slot = slot.saturating_sub(amount).max(0);
        Mutation {
            balance: *slot,
            created,
        }
    }

    /// Overwrite the balance of `user`, creating the record if needed.
    /// No clamping.
    pub fn set(&mut self, user: &UserId, amount: Balance) {
        self.balances.insert(user.clone(), amount);
    }

    /// Drop the record of `user`. Only used to roll back a freshly created
    /// record whose write failed; the economy itself never deletes users.
    pub(crate) fn forget(&mut self, user: &UserId) -> Option<Balance> {
        self.balances.remove(user)
    }

    /// Copy of the full mapping.
    pub fn to_map(&self) -> BTreeMap<UserId, Balance> {
        self.balances.clone()
    }

    fn slot(&mut self, user: &UserId) -> &mut Balance {
        self.balances.entry(user.clone()).or_insert(0)
    }
}

impl From<BTreeMap<UserId, Balance>> for BalanceBook {
    fn from(balances: BTreeMap<UserId, Balance>) -> Self {
        Self { balances }
    }
}
