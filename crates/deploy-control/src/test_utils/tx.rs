use alloy_primitives::{Address, Bytes, TxKind};
use revm::context::TxEnv;

use crate::test_utils::MemoryDatabase;

/// Gas limit of test transactions, below the per-transaction cap of recent forks.
pub const TEST_GAS_LIMIT: u64 = 10_000_000;

/// Builds a contract-creation transaction from `caller` at its current nonce in `db`.
pub fn create_tx(db: &MemoryDatabase, caller: Address, init_code: Bytes) -> TxEnv {
    TxEnv {
        caller,
        kind: TxKind::Create,
        data: init_code,
        nonce: db.nonce_of(caller),
        gas_limit: TEST_GAS_LIMIT,
        ..Default::default()
    }
}

/// Builds a call transaction from `caller` to `to` at the caller's current nonce in `db`.
pub fn call_tx(db: &MemoryDatabase, caller: Address, to: Address, data: Bytes) -> TxEnv {
    TxEnv {
        caller,
        kind: TxKind::Call(to),
        data,
        nonce: db.nonce_of(caller),
        gas_limit: TEST_GAS_LIMIT,
        ..Default::default()
    }
}
