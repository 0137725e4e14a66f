//! Test utilities for gated execution.

mod database;
mod opcode_gen;
mod tx;

pub use database::*;
pub use opcode_gen::*;
pub use tx::*;
