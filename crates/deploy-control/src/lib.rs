//! Deployment control for an EVM smart-contract runtime.
//!
//! Only accounts in an on-chain registry may create contracts through top-level transactions.
//! Contracts created by other contracts during execution are not gated. The registry is changed
//! through a governance surface restricted to a configurable authority.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod constants;

mod control;
pub use control::*;

mod error;
pub use error::*;

mod events;
pub use events::*;

mod evm;
pub use evm::*;

mod gate;
pub use gate::*;

mod genesis;
pub use genesis::*;

mod identity;
pub use identity::*;

mod origin;
pub use origin::*;

mod registry;
pub use registry::*;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use alloy_primitives;
pub use revm;
