use serde::{Deserialize, Serialize};

use crate::AccountId;

/// Event recorded by a successful governance call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeploymentEvent {
    /// `deployer` was authorized to create top-level contracts.
    DeployerAuthorized {
        /// The authorized account
        deployer: AccountId,
    },
    /// The authorization of `deployer` was revoked.
    DeployerRevoked {
        /// The revoked account
        deployer: AccountId,
    },
}

impl DeploymentEvent {
    /// Returns the account the event is about.
    pub const fn deployer(&self) -> &AccountId {
        match self {
            Self::DeployerAuthorized { deployer } | Self::DeployerRevoked { deployer } => deployer,
        }
    }
}
