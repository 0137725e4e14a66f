use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{into_account_id, AccountId, AuthorizationRegistry, GenesisError};

/// Initial contents of the deployer registry.
///
/// ```json
/// {
///   "authorizedDeployers": ["0xa7839fbfca6da129ff9e2ff521115b7eb4213b215086fc3416c7a340e944cc49"],
///   "authorizedAddresses": ["0xf24ff3a9cf04c71dbc94d0b566f7a27b94566cac"]
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct GenesisConfig {
    /// Native accounts authorized at genesis.
    pub authorized_deployers: Vec<AccountId>,
    /// External addresses authorized at genesis, mapped to their native accounts.
    pub authorized_addresses: Vec<Address>,
}

impl GenesisConfig {
    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, GenesisError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns every account the configuration authorizes.
    pub fn accounts(&self) -> impl Iterator<Item = AccountId> + '_ {
        self.authorized_deployers
            .iter()
            .copied()
            .chain(self.authorized_addresses.iter().copied().map(into_account_id))
    }

    /// Inserts every configured account into `registry`.
    pub fn build<R: AuthorizationRegistry + ?Sized>(&self, registry: &mut R) {
        for account in self.accounts() {
            registry.insert(account);
        }
        info!(
            deployers = self.authorized_deployers.len(),
            addresses = self.authorized_addresses.len(),
            "Seeded authorized deployers"
        );
    }
}
