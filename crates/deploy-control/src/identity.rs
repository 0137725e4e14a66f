//! Mapping between external 20-byte EVM addresses and native 32-byte accounts.
//!
//! Storage, balances and the deployer registry are keyed by [`AccountId`]. A transaction sent
//! through the EVM calling convention only carries an [`Address`], so the runtime derives the
//! account as `blake2b_256("evm:" ++ address)` with [`into_account_id`]. The derivation is
//! recomputed wherever it is needed; there is no lookup table to keep in sync.

use core::fmt;

use alloy_primitives::{Address, B256};
use blake2::{
    digest::consts::{U16, U32},
    Blake2b, Digest,
};
use serde::{Deserialize, Serialize};

use crate::constants::EVM_ADDRESS_PREFIX;

/// A 20-byte address of the external (EVM) calling convention.
pub type ExternalAddress = Address;

/// A native 32-byte account identifier.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::From,
    derive_more::Into,
    derive_more::Deref,
)]
#[serde(transparent)]
pub struct AccountId(B256);

impl AccountId {
    /// Creates an account id from raw bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(B256::new(bytes))
    }

    /// Derives the account of an EVM address. Same as [`into_account_id`].
    pub fn from_address(address: Address) -> Self {
        into_account_id(address)
    }
}

impl From<[u8; 32]> for AccountId {
    fn from(bytes: [u8; 32]) -> Self {
        Self::new(bytes)
    }
}

impl AsRef<[u8]> for AccountId {
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Derives the native account of an EVM address.
///
/// The account is the BLAKE2b-256 digest of [`EVM_ADDRESS_PREFIX`] followed by the 20 address
/// bytes. The function is pure and total.
pub fn into_account_id(address: Address) -> AccountId {
    let mut data = [0u8; EVM_ADDRESS_PREFIX.len() + 20];
    data[..EVM_ADDRESS_PREFIX.len()].copy_from_slice(EVM_ADDRESS_PREFIX);
    data[EVM_ADDRESS_PREFIX.len()..].copy_from_slice(address.as_slice());
    AccountId(blake2_256(&data))
}

/// BLAKE2b with a 32-byte digest.
pub(crate) fn blake2_256(data: &[u8]) -> B256 {
    B256::from_slice(&Blake2b::<U32>::digest(data))
}

/// BLAKE2b with a 16-byte digest.
pub(crate) fn blake2_128(data: &[u8]) -> [u8; 16] {
    let mut out = [0u8; 16];
    out.copy_from_slice(&Blake2b::<U16>::digest(data));
    out
}
