use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{AccountId, AuthorizationRegistry};

/// An in-memory [`AuthorizationRegistry`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryRegistry {
    members: BTreeSet<AccountId>,
}

impl MemoryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of authorized accounts.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if no account is authorized.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl FromIterator<AccountId> for MemoryRegistry {
    fn from_iter<T: IntoIterator<Item = AccountId>>(iter: T) -> Self {
        Self { members: iter.into_iter().collect() }
    }
}

impl AuthorizationRegistry for MemoryRegistry {
    fn contains(&self, account: &AccountId) -> bool {
        self.members.contains(account)
    }

    fn insert(&mut self, account: AccountId) {
        self.members.insert(account);
    }

    fn remove(&mut self, account: &AccountId) {
        self.members.remove(account);
    }

    fn members(&self) -> Vec<AccountId> {
        self.members.iter().copied().collect()
    }
}
