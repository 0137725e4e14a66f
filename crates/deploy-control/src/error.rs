//! Error types of the deployment control subsystem.

use alloy_primitives::Address;
use revm::context::result::{EVMError, InvalidTransaction};

use crate::{constants::UNAUTHORIZED_DEPLOYER_CODE, AccountId};

/// Error returned by governance calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// The origin of the call is not the governance authority.
    #[error("Bad origin: caller is not the governance authority")]
    BadOrigin,
}

/// Transaction validation error of gated execution.
///
/// Wraps the mainnet [`InvalidTransaction`] and adds the rejection of top-level contract
/// creations by unauthorized callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeploymentTransactionError {
    /// Base mainnet validation error.
    #[error(transparent)]
    Base(#[from] InvalidTransaction),
    /// The caller of a contract-creation transaction is not an authorized deployer.
    #[error("Unauthorized deployer: {caller} (account {account})")]
    UnauthorizedDeployer {
        /// The external address that signed the transaction
        caller: Address,
        /// The native account the caller maps to
        account: AccountId,
    },
}

impl DeploymentTransactionError {
    /// Returns the custom transaction-validity code reported to clients, if this error has one.
    ///
    /// Mainnet validation errors carry no custom code.
    pub const fn validity_code(&self) -> Option<u8> {
        match self {
            Self::Base(_) => None,
            Self::UnauthorizedDeployer { .. } => Some(UNAUTHORIZED_DEPLOYER_CODE),
        }
    }

    /// Returns `true` if the error is an unauthorized-deployer rejection.
    pub const fn is_unauthorized_deployer(&self) -> bool {
        matches!(self, Self::UnauthorizedDeployer { .. })
    }
}

impl<DBError> From<DeploymentTransactionError> for EVMError<DBError, DeploymentTransactionError> {
    fn from(value: DeploymentTransactionError) -> Self {
        Self::Transaction(value)
    }
}

/// Error of [`OriginGate::ensure_address_origin`](crate::OriginGate::ensure_address_origin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AddressOriginError {
    /// The origin is not a signed account.
    #[error("Origin is not signed")]
    NotSigned,
    /// The signer is not the account the external address maps to.
    #[error("Signer {signer} does not match account {expected} of address {address}")]
    AddressMismatch {
        /// The external address the call acts for
        address: Address,
        /// The account `address` maps to
        expected: AccountId,
        /// The account that signed the call
        signer: AccountId,
    },
    /// The mapped account is not an authorized deployer.
    #[error("Unauthorized deployer: {address} (account {account})")]
    UnauthorizedDeployer {
        /// The external address the call acts for
        address: Address,
        /// The account `address` maps to
        account: AccountId,
    },
}

/// Error loading a genesis configuration.
#[derive(Debug, thiserror::Error)]
pub enum GenesisError {
    /// The configuration is not valid JSON or does not match the expected shape.
    #[error("Failed to parse genesis config: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_codes() {
        let unauthorized = DeploymentTransactionError::UnauthorizedDeployer {
            caller: Address::ZERO,
            account: AccountId::from_address(Address::ZERO),
        };
        assert_eq!(unauthorized.validity_code(), Some(0));
        assert!(unauthorized.is_unauthorized_deployer());

        let base = DeploymentTransactionError::from(InvalidTransaction::NonceOverflowInTransaction);
        assert_eq!(base.validity_code(), None);
        assert!(!base.is_unauthorized_deployer());
    }

    #[test]
    fn test_into_evm_error() {
        let err: EVMError<core::convert::Infallible, _> =
            DeploymentTransactionError::UnauthorizedDeployer {
                caller: Address::ZERO,
                account: AccountId::default(),
            }
            .into();
        assert!(matches!(
            err,
            EVMError::Transaction(DeploymentTransactionError::UnauthorizedDeployer { .. })
        ));
    }
}
