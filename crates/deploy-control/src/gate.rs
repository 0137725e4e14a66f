//! The admission check for top-level contract creations.

use core::fmt;

use alloy_primitives::Address;
use tracing::debug;

use crate::{into_account_id, AccountId, AddressOriginError, AuthorizationRegistry, Origin};

/// Outcome of an [`OriginGate`] check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The creation may proceed.
    Admit,
    /// The creation must be rejected.
    Deny,
}

impl Verdict {
    /// Returns `true` for [`Verdict::Admit`].
    pub const fn is_admit(self) -> bool {
        matches!(self, Self::Admit)
    }
}

impl From<bool> for Verdict {
    fn from(admitted: bool) -> Self {
        if admitted {
            Self::Admit
        } else {
            Self::Deny
        }
    }
}

/// Decides whether an identity may create a top-level contract.
///
/// The gate only reads the registry. It is consulted once per contract-creation transaction;
/// contracts created by other contracts during execution never reach it.
pub struct OriginGate<'a, R: ?Sized> {
    registry: &'a R,
}

impl<'a, R: AuthorizationRegistry + ?Sized> OriginGate<'a, R> {
    /// Creates a gate reading from `registry`.
    pub const fn new(registry: &'a R) -> Self {
        Self { registry }
    }

    /// Admits `identity` iff it is in the registry.
    pub fn check(&self, identity: &AccountId) -> Verdict {
        let verdict = Verdict::from(self.registry.contains(identity));
        debug!(%identity, ?verdict, "Checked deployer");
        verdict
    }

    /// Maps `address` to its native account and checks it.
    pub fn check_address(&self, address: Address) -> Verdict {
        self.check(&into_account_id(address))
    }

    /// Checks a native-side call that creates a contract on behalf of `address`.
    ///
    /// The origin must be signed by the account `address` maps to, and that account must be
    /// admitted. Returns the account on success.
    pub fn ensure_address_origin(
        &self,
        address: Address,
        origin: &Origin,
    ) -> Result<AccountId, AddressOriginError> {
        let account = into_account_id(address);
        let signer = origin.as_signed().ok_or(AddressOriginError::NotSigned)?;
        if *signer != account {
            return Err(AddressOriginError::AddressMismatch {
                address,
                expected: account,
                signer: *signer,
            });
        }
        match self.check(&account) {
            Verdict::Admit => Ok(account),
            Verdict::Deny => Err(AddressOriginError::UnauthorizedDeployer { address, account }),
        }
    }
}

impl<R: ?Sized> Clone for OriginGate<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: ?Sized> Copy for OriginGate<'_, R> {}

impl<R: ?Sized> fmt::Debug for OriginGate<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OriginGate").finish_non_exhaustive()
    }
}
