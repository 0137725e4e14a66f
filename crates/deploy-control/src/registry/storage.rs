use std::collections::BTreeMap;

use auto_impl::auto_impl;

use crate::{
    constants::AUTHORIZED_DEPLOYERS_PREFIX, identity::blake2_128, AccountId, AuthorizationRegistry,
};

/// Length of a registry key: prefix, 16-byte hash of the account, then the account itself.
const KEY_LEN: usize = AUTHORIZED_DEPLOYERS_PREFIX.len() + 16 + 32;

/// A byte-oriented key-value store backing a [`StorageRegistry`].
#[auto_impl(&mut, Box)]
pub trait KeyValueStore {
    /// Returns the value stored under `key`.
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&mut self, key: Vec<u8>, value: Vec<u8>);

    /// Deletes `key`. Deleting a missing key is a no-op.
    fn delete(&mut self, key: &[u8]);

    /// Returns all keys starting with `prefix`, in ascending order.
    fn keys_with_prefix(&self, prefix: &[u8]) -> Vec<Vec<u8>>;
}

impl KeyValueStore for BTreeMap<Vec<u8>, Vec<u8>> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        BTreeMap::get(self, key).cloned()
    }

    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.insert(key, value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.remove(key);
    }

    fn keys_with_prefix(&self, prefix: &[u8]) -> Vec<Vec<u8>> {
        self.range(prefix.to_vec()..)
            .map(|(key, _)| key)
            .take_while(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }
}

/// An [`AuthorizationRegistry`] persisted in a [`KeyValueStore`].
///
/// Every member is a single entry with an empty value under
/// `AUTHORIZED_DEPLOYERS_PREFIX ++ blake2_128(account) ++ account`. The hash spreads keys evenly
/// while the trailing account keeps them reversible, so [`AuthorizationRegistry::members`] can be
/// served by a prefix scan.
#[derive(Clone, Debug, Default)]
pub struct StorageRegistry<S> {
    store: S,
}

impl<S: KeyValueStore> StorageRegistry<S> {
    /// Creates a registry over `store`.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the storage key of `account`.
    pub fn storage_key(account: &AccountId) -> Vec<u8> {
        let mut key = Vec::with_capacity(KEY_LEN);
        key.extend_from_slice(AUTHORIZED_DEPLOYERS_PREFIX);
        key.extend_from_slice(&blake2_128(account.as_ref()));
        key.extend_from_slice(account.as_ref());
        key
    }

    /// Recovers the account from a storage key produced by [`Self::storage_key`].
    pub fn account_from_key(key: &[u8]) -> Option<AccountId> {
        if key.len() != KEY_LEN || !key.starts_with(AUTHORIZED_DEPLOYERS_PREFIX) {
            return None;
        }
        let (hash, bytes) = key[AUTHORIZED_DEPLOYERS_PREFIX.len()..].split_at(16);
        if hash != blake2_128(bytes) {
            return None;
        }
        let bytes: [u8; 32] = bytes.try_into().ok()?;
        Some(AccountId::new(bytes))
    }

    /// Returns the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the registry and returns the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> AuthorizationRegistry for StorageRegistry<S> {
    fn contains(&self, account: &AccountId) -> bool {
        self.store.get(&Self::storage_key(account)).is_some()
    }

    fn insert(&mut self, account: AccountId) {
        self.store.put(Self::storage_key(&account), Vec::new());
    }

    fn remove(&mut self, account: &AccountId) {
        self.store.delete(&Self::storage_key(account));
    }

    fn members(&self) -> Vec<AccountId> {
        let mut members: Vec<_> = self
            .store
            .keys_with_prefix(AUTHORIZED_DEPLOYERS_PREFIX)
            .iter()
            .filter_map(|key| Self::account_from_key(key))
            .collect();
        members.sort_unstable();
        members
    }
}
