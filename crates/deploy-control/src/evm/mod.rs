//! Gated EVM execution.
//!
//! [`DeploymentHandler`] wraps revm's mainnet handler and consults the [`OriginGate`] while
//! validating a transaction. A contract-creation transaction from an unauthorized caller fails
//! validation, so it never reaches caller deduction, the nonce bump or code storage. Contracts
//! created by `CREATE`/`CREATE2` inside execution are frames, not transactions, and are never
//! gated.
//!
//! [`DeploymentExecutor`] assembles a mainnet context per transaction and runs it through the
//! handler.
//!
//! [`OriginGate`]: crate::OriginGate

mod execution;
mod handler;

pub use execution::*;
pub use handler::*;
