//! Dispatch origins and the governance authority predicate.

use serde::{Deserialize, Serialize};

use crate::AccountId;

/// The origin of a dispatched call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// The chain's root authority, e.g. a call wrapped by sudo or passed by governance.
    Root,
    /// A call signed by a native account.
    Signed(AccountId),
    /// An unsigned call.
    None,
}

impl Origin {
    /// Returns the signer if the origin is signed.
    pub const fn as_signed(&self) -> Option<&AccountId> {
        match self {
            Self::Signed(account) => Some(account),
            _ => None,
        }
    }

    /// Returns `true` if the origin is [`Origin::Root`].
    pub const fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }
}

/// Decides whether an origin may mutate the deployer registry.
///
/// The chain configuration injects the implementation, so moving from a single sudo key to a
/// collective origin does not touch the registry or the gate.
pub trait GovernanceAuthority {
    /// Returns `true` if `origin` is the governance authority.
    fn is_authority(&self, origin: &Origin) -> bool;
}

/// Accepts [`Origin::Root`] only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnsureRoot;

impl GovernanceAuthority for EnsureRoot {
    fn is_authority(&self, origin: &Origin) -> bool {
        origin.is_root()
    }
}

/// Accepts [`Origin::Root`] and calls signed by the sudo key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SudoKey(pub AccountId);

impl GovernanceAuthority for SudoKey {
    fn is_authority(&self, origin: &Origin) -> bool {
        match origin {
            Origin::Root => true,
            Origin::Signed(signer) => *signer == self.0,
            Origin::None => false,
        }
    }
}

impl<F> GovernanceAuthority for F
where
    F: Fn(&Origin) -> bool,
{
    fn is_authority(&self, origin: &Origin) -> bool {
        self(origin)
    }
}
