//! Constants of the deployment control subsystem.

/// Domain separation tag hashed in front of an EVM address when deriving its native account.
///
/// Native accounts chosen directly under the native convention are never hashed with this tag,
/// so the two address spaces cannot collide.
pub const EVM_ADDRESS_PREFIX: &[u8; 4] = b"evm:";

/// Key prefix of the authorized deployers map in a [`KeyValueStore`](crate::KeyValueStore).
pub const AUTHORIZED_DEPLOYERS_PREFIX: &[u8] = b"EvmDeploymentControl:AuthorizedDeployers:";

/// Custom transaction validity code reported to the transaction pool and RPC layer when a
/// top-level contract creation is rejected.
pub const UNAUTHORIZED_DEPLOYER_CODE: u8 = 0;
