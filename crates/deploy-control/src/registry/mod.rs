//! The set of accounts allowed to create top-level contracts.
//!
//! Each account is either authorized (an entry is present) or not (no entry). Inserting and
//! removing are idempotent and cannot fail; every failure mode belongs to the governance call
//! that wraps the registry, see [`DeploymentControl`](crate::DeploymentControl).

mod memory;
pub use memory::*;

mod storage;
pub use storage::*;

use auto_impl::auto_impl;

use crate::AccountId;

/// A durable set of accounts permitted to create top-level contracts.
#[auto_impl(&mut, Box)]
pub trait AuthorizationRegistry {
    /// Returns `true` if `account` is authorized.
    fn contains(&self, account: &AccountId) -> bool;

    /// Marks `account` as authorized. Inserting a present account is a no-op.
    fn insert(&mut self, account: AccountId);

    /// Removes the authorization of `account`. Removing an absent account is a no-op.
    fn remove(&mut self, account: &AccountId);

    /// Returns all authorized accounts in ascending order.
    fn members(&self) -> Vec<AccountId>;
}
