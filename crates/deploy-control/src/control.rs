//! The governance surface over the deployer registry.

use alloy_primitives::Address;
use tracing::{info, warn};

use crate::{
    into_account_id, AccountId, AuthorizationRegistry, DeploymentEvent, DispatchError,
    GenesisConfig, GovernanceAuthority, Origin, OriginGate,
};

/// Owns the deployer registry and applies governance calls to it.
///
/// Only origins accepted by the configured [`GovernanceAuthority`] may change the registry. A
/// rejected call leaves both the registry and the event log untouched. Successful calls record a
/// [`DeploymentEvent`], including repeats that did not change the registry.
///
/// Events accumulate until [`Self::take_events`] drains them. A long-lived control should be
/// drained once per block.
#[derive(Debug)]
pub struct DeploymentControl<R, A> {
    registry: R,
    authority: A,
    events: Vec<DeploymentEvent>,
}

impl<R: AuthorizationRegistry, A: GovernanceAuthority> DeploymentControl<R, A> {
    /// Creates a control over `registry`, governed by `authority`.
    pub const fn new(registry: R, authority: A) -> Self {
        Self { registry, authority, events: Vec::new() }
    }

    /// Creates a control whose registry is seeded from `genesis`.
    ///
    /// Seeding records no events.
    pub fn from_genesis(mut registry: R, authority: A, genesis: &GenesisConfig) -> Self {
        genesis.build(&mut registry);
        Self::new(registry, authority)
    }

    /// Authorizes `deployer` to create top-level contracts.
    pub fn authorize_deployer(
        &mut self,
        origin: &Origin,
        deployer: AccountId,
    ) -> Result<(), DispatchError> {
        self.ensure_authority(origin)?;
        self.registry.insert(deployer);
        info!(%deployer, "Deployer authorized");
        self.events.push(DeploymentEvent::DeployerAuthorized { deployer });
        Ok(())
    }

    /// Revokes the authorization of `deployer`.
    pub fn revoke_deployer(
        &mut self,
        origin: &Origin,
        deployer: AccountId,
    ) -> Result<(), DispatchError> {
        self.ensure_authority(origin)?;
        self.registry.remove(&deployer);
        info!(%deployer, "Deployer revoked");
        self.events.push(DeploymentEvent::DeployerRevoked { deployer });
        Ok(())
    }

    fn ensure_authority(&self, origin: &Origin) -> Result<(), DispatchError> {
        if self.authority.is_authority(origin) {
            Ok(())
        } else {
            warn!(?origin, "Rejected governance call from non-authority origin");
            Err(DispatchError::BadOrigin)
        }
    }

    /// Returns `true` if `account` may create top-level contracts.
    pub fn is_authorized(&self, account: &AccountId) -> bool {
        self.registry.contains(account)
    }

    /// Returns `true` if the account `address` maps to may create top-level contracts.
    pub fn is_authorized_address(&self, address: Address) -> bool {
        self.is_authorized(&into_account_id(address))
    }

    /// Returns a gate over the current registry.
    pub const fn gate(&self) -> OriginGate<'_, R> {
        OriginGate::new(&self.registry)
    }

    /// Returns the registry.
    pub const fn registry(&self) -> &R {
        &self.registry
    }

    /// Returns the recorded events, oldest first.
    pub fn events(&self) -> &[DeploymentEvent] {
        &self.events
    }

    /// Drains the recorded events.
    pub fn take_events(&mut self) -> Vec<DeploymentEvent> {
        core::mem::take(&mut self.events)
    }

    /// Consumes the control and returns the registry.
    pub fn into_registry(self) -> R {
        self.registry
    }
}
