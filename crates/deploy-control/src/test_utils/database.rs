use core::convert::Infallible;

use alloy_primitives::{Address, Bytes, B256, U256};
use delegate::delegate;
use revm::{
    database::{AccountState, CacheDB, EmptyDB},
    primitives::{StorageKey, StorageValue},
    state::{AccountInfo, Bytecode},
};

/// An in-memory world state for gated execution tests.
#[derive(Debug, Default, Clone, derive_more::Deref, derive_more::DerefMut)]
pub struct MemoryDatabase {
    #[deref]
    #[deref_mut]
    db: CacheDB<EmptyDB>,
}

impl MemoryDatabase {
    /// Sets the balance for an account in the database.
    pub fn set_account_balance(&mut self, address: Address, balance: U256) {
        let account = self.db.load_account(address).unwrap();
        account.info.balance = balance;
        account.account_state = AccountState::None;
    }

    /// Sets the balance for an account in the database.
    pub fn account_balance(mut self, address: Address, balance: U256) -> Self {
        self.set_account_balance(address, balance);
        self
    }

    /// Returns the cached account info, or `None` if the account was never touched.
    pub fn account_info(&self, address: Address) -> Option<&AccountInfo> {
        self.db.cache.accounts.get(&address).map(|account| &account.info)
    }

    /// Returns the nonce of an account, zero for unknown accounts.
    pub fn nonce_of(&self, address: Address) -> u64 {
        self.account_info(address).map_or(0, |info| info.nonce)
    }

    /// Returns the deployed code of an account, if it has any.
    pub fn code_of(&self, address: Address) -> Option<Bytes> {
        let info = self.account_info(address)?;
        let code = match &info.code {
            Some(code) => code.clone(),
            None => self.db.cache.contracts.get(&info.code_hash)?.clone(),
        };
        let bytes = code.original_bytes();
        (!bytes.is_empty()).then_some(bytes)
    }

    /// Returns a storage slot of an account.
    pub fn storage_of(&self, address: Address, slot: StorageKey) -> Option<StorageValue> {
        self.db.cache.accounts.get(&address)?.storage.get(&slot).copied()
    }
}

impl revm::Database for MemoryDatabase {
    type Error = Infallible;

    delegate! {
        to self.db {
            fn basic(&mut self, address: Address) -> Result<Option<AccountInfo>, Self::Error>;
            fn code_by_hash(&mut self, code_hash: B256) -> Result<Bytecode, Self::Error>;
            fn storage(&mut self, address: Address, index: StorageKey) -> Result<StorageValue, Self::Error>;
            fn block_hash(&mut self, number: u64) -> Result<B256, Self::Error>;
        }
    }
}

impl revm::DatabaseCommit for MemoryDatabase {
    delegate! {
        to self.db {
            fn commit(&mut self, changes: revm::primitives::HashMap<Address, revm::state::Account>);
        }
    }
}
