//! End-to-end tests for gated contract deployment.

use std::convert::Infallible;

use alloy_primitives::{address, Address, Bytes, U256};
use deploy_control::{
    into_account_id,
    test_utils::{call_tx, create_tx, BytecodeBuilder, MemoryDatabase},
    DeploymentControl, DeploymentEvmError, DeploymentExecutor, DeploymentTransactionError,
    GenesisConfig, MemoryRegistry, Origin, SudoKey,
};
use revm::{
    context::{
        result::{EVMError, ExecutionResult, HaltReason, InvalidTransaction, Output},
        BlockEnv, CfgEnv,
    },
    inspector::NoOpInspector,
    primitives::hardfork::SpecId,
};
use rstest::rstest;

const ALICE: Address = address!("d43593c715fdd31c61141abd04a99fd6822c8558");
const BOB: Address = address!("8eaf04151687736326c9fea17e25fc5287613693");
const SUDO: Address = address!("f24ff3a9cf04c71dbc94d0b566f7a27b94566cac");

const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

type Control = DeploymentControl<MemoryRegistry, SudoKey>;
type TxResult = Result<ExecutionResult<HaltReason>, DeploymentEvmError<Infallible>>;

fn control() -> Control {
    DeploymentControl::new(MemoryRegistry::new(), SudoKey(into_account_id(SUDO)))
}

fn funded_db() -> MemoryDatabase {
    MemoryDatabase::default()
        .account_balance(ALICE, U256::from(ONE_ETHER))
        .account_balance(BOB, U256::from(ONE_ETHER))
}

/// Runtime code that stores 42 at slot 0.
fn counter_runtime() -> Bytes {
    BytecodeBuilder::default().sstore(0, U256::from(42)).stop().build()
}

/// Runtime code that creates a contract with `child_init` and stores its address at slot 0.
fn factory_runtime(child_init: &Bytes, salt: Option<U256>) -> Bytes {
    let builder = BytecodeBuilder::default();
    let builder = match salt {
        Some(salt) => builder.create2(child_init, salt),
        None => builder.create(child_init),
    };
    builder.store_top(0).stop().build()
}

fn deploy(control: &Control, db: &mut MemoryDatabase, caller: Address, init: Bytes) -> TxResult {
    let tx = create_tx(db, caller, init);
    DeploymentExecutor::new(control.gate()).transact_commit(db, tx)
}

fn call(control: &Control, db: &mut MemoryDatabase, caller: Address, to: Address) -> TxResult {
    let tx = call_tx(db, caller, to, Bytes::new());
    DeploymentExecutor::new(control.gate()).transact_commit(db, tx)
}

fn created_address(result: &ExecutionResult<HaltReason>) -> Address {
    match result {
        ExecutionResult::Success { output: Output::Create(_, Some(address)), .. } => *address,
        other => panic!("expected a successful creation, got {other:?}"),
    }
}

fn assert_unauthorized(result: TxResult, caller: Address) {
    match result {
        Err(EVMError::Transaction(err)) => {
            assert_eq!(
                err,
                DeploymentTransactionError::UnauthorizedDeployer {
                    caller,
                    account: into_account_id(caller),
                }
            );
            assert_eq!(err.validity_code(), Some(0));
        }
        other => panic!("expected an unauthorized deployer rejection, got {other:?}"),
    }
}

#[test]
fn test_authorized_deployer_creates_contract() {
    let mut control = control();
    control.authorize_deployer(&Origin::Root, into_account_id(ALICE)).unwrap();
    let mut db = funded_db();

    let result = deploy(&control, &mut db, ALICE, BytecodeBuilder::deploy(counter_runtime()));
    let contract = created_address(&result.unwrap());

    assert_eq!(contract, ALICE.create(0));
    assert_eq!(db.code_of(contract), Some(counter_runtime()));
    assert_eq!(db.nonce_of(ALICE), 1);
}

#[test]
fn test_unauthorized_deployer_is_rejected_without_side_effects() {
    let mut control = control();
    control.authorize_deployer(&Origin::Root, into_account_id(ALICE)).unwrap();
    let mut db = funded_db();
    let before = db.account_info(BOB).cloned();

    let result = deploy(&control, &mut db, BOB, BytecodeBuilder::deploy(counter_runtime()));

    assert_unauthorized(result, BOB);
    assert_eq!(db.account_info(BOB).cloned(), before);
    assert_eq!(db.code_of(BOB), None);
    assert_eq!(db.code_of(BOB.create(0)), None);
    assert!(db.account_info(BOB.create(0)).is_none());
}

#[test]
fn test_empty_registry_rejects_everyone() {
    let control = control();
    let mut db = funded_db();

    for caller in [ALICE, BOB, SUDO] {
        let result = deploy(&control, &mut db, caller, BytecodeBuilder::deploy(counter_runtime()));
        assert_unauthorized(result, caller);
    }
}

#[rstest]
#[case::create_by_authorized_caller(ALICE, None)]
#[case::create_by_unauthorized_caller(BOB, None)]
#[case::create2_by_authorized_caller(ALICE, Some(U256::from(7)))]
#[case::create2_by_unauthorized_caller(BOB, Some(U256::from(7)))]
fn test_nested_creation_is_not_gated(#[case] caller: Address, #[case] salt: Option<U256>) {
    let mut control = control();
    control.authorize_deployer(&Origin::Root, into_account_id(ALICE)).unwrap();
    let mut db = funded_db();

    let child_init = BytecodeBuilder::deploy(counter_runtime());
    let factory_init = BytecodeBuilder::deploy(factory_runtime(&child_init, salt));
    let factory = created_address(&deploy(&control, &mut db, ALICE, factory_init).unwrap());

    let result = call(&control, &mut db, caller, factory).unwrap();
    assert!(result.is_success(), "factory call failed: {result:?}");

    let child = match salt {
        Some(salt) => factory.create2_from_code(salt.to_be_bytes::<32>(), &child_init),
        // contracts start at nonce 1
        None => factory.create(1),
    };
    assert_eq!(db.storage_of(factory, U256::ZERO), Some(U256::from_be_slice(child.as_slice())));
    assert_eq!(db.code_of(child), Some(counter_runtime()));
}

#[test]
fn test_revocation_applies_to_later_transactions() {
    let mut control = control();
    let alice = into_account_id(ALICE);
    control.authorize_deployer(&Origin::Signed(into_account_id(SUDO)), alice).unwrap();
    let mut db = funded_db();

    let first = deploy(&control, &mut db, ALICE, BytecodeBuilder::deploy(counter_runtime()));
    let contract = created_address(&first.unwrap());

    control.revoke_deployer(&Origin::Root, alice).unwrap();
    let nonce = db.nonce_of(ALICE);
    let second = deploy(&control, &mut db, ALICE, BytecodeBuilder::deploy(counter_runtime()));

    assert_unauthorized(second, ALICE);
    assert_eq!(db.nonce_of(ALICE), nonce);
    assert_eq!(db.code_of(ALICE.create(nonce)), None);
    // earlier deployments are untouched
    assert_eq!(db.code_of(contract), Some(counter_runtime()));
}

#[test]
fn test_calls_are_not_gated() {
    let mut control = control();
    control.authorize_deployer(&Origin::Root, into_account_id(ALICE)).unwrap();
    let mut db = funded_db();
    let contract = created_address(
        &deploy(&control, &mut db, ALICE, BytecodeBuilder::deploy(counter_runtime())).unwrap(),
    );

    let result = call(&control, &mut db, BOB, contract).unwrap();
    assert!(result.is_success());
    assert_eq!(db.storage_of(contract, U256::ZERO), Some(U256::from(42)));

    let result = call(&control, &mut db, BOB, ALICE).unwrap();
    assert!(result.is_success());
}

#[test]
fn test_mainnet_validation_still_applies_to_authorized_deployers() {
    let mut control = control();
    control.authorize_deployer(&Origin::Root, into_account_id(ALICE)).unwrap();
    let mut db = funded_db();

    let mut tx = create_tx(&db, ALICE, BytecodeBuilder::deploy(counter_runtime()));
    tx.nonce = 5;
    let result = DeploymentExecutor::new(control.gate()).transact_commit(&mut db, tx);

    match result {
        Err(EVMError::Transaction(DeploymentTransactionError::Base(
            InvalidTransaction::NonceTooHigh { tx: 5, state: 0 },
        ))) => {}
        other => panic!("expected a nonce error, got {other:?}"),
    }
}

#[test]
fn test_block_basefee_applies_to_authorized_deployers() {
    let mut control = control();
    control.authorize_deployer(&Origin::Root, into_account_id(ALICE)).unwrap();
    let mut db = funded_db();

    let tx = create_tx(&db, ALICE, BytecodeBuilder::deploy(counter_runtime()));
    let block = BlockEnv { basefee: 1_000, ..Default::default() };
    let result =
        DeploymentExecutor::new(control.gate()).with_block(block).transact_commit(&mut db, tx);

    match result {
        Err(EVMError::Transaction(DeploymentTransactionError::Base(
            InvalidTransaction::GasPriceLessThanBasefee,
        ))) => {}
        other => panic!("expected a basefee error, got {other:?}"),
    }
    assert_eq!(db.nonce_of(ALICE), 0);
}

#[test]
fn test_configured_spec_governs_admitted_creation() {
    let mut control = control();
    control.authorize_deployer(&Origin::Root, into_account_id(ALICE)).unwrap();
    let mut db = funded_db();

    // PUSH0 in the init code is not activated before Shanghai
    let tx = create_tx(&db, ALICE, BytecodeBuilder::deploy(counter_runtime()));
    let result = DeploymentExecutor::new(control.gate())
        .with_cfg(CfgEnv::new_with_spec(SpecId::LONDON))
        .transact_commit(&mut db, tx)
        .unwrap();
    assert!(matches!(result, ExecutionResult::Halt { .. }), "unexpected {result:?}");

    let tx = create_tx(&db, BOB, BytecodeBuilder::deploy(counter_runtime()));
    let result = DeploymentExecutor::new(control.gate())
        .with_cfg(CfgEnv::new_with_spec(SpecId::LONDON))
        .transact_commit(&mut db, tx);
    assert_unauthorized(result, BOB);
}

#[test]
fn test_inspected_execution_is_gated() {
    let mut control = control();
    control.authorize_deployer(&Origin::Root, into_account_id(ALICE)).unwrap();
    let mut db = funded_db();
    let executor = DeploymentExecutor::new(control.gate());

    let tx = create_tx(&db, BOB, BytecodeBuilder::deploy(counter_runtime()));
    let denied = executor.inspect(&mut db, tx, NoOpInspector).map(|outcome| outcome.result);
    assert_unauthorized(denied, BOB);

    let tx = create_tx(&db, ALICE, BytecodeBuilder::deploy(counter_runtime()));
    let admitted = executor.inspect(&mut db, tx, NoOpInspector).unwrap();
    assert_eq!(created_address(&admitted.result), ALICE.create(0));
    // inspection does not commit
    assert_eq!(db.nonce_of(ALICE), 0);
}

#[test]
fn test_genesis_deployers_can_deploy() {
    let genesis = GenesisConfig::from_json(
        r#"{ "authorizedAddresses": ["0xd43593c715fdd31c61141abd04a99fd6822c8558"] }"#,
    )
    .unwrap();
    let authority = SudoKey(into_account_id(SUDO));
    let control = DeploymentControl::from_genesis(MemoryRegistry::new(), authority, &genesis);
    let mut db = funded_db();

    let result = deploy(&control, &mut db, ALICE, BytecodeBuilder::deploy(counter_runtime()));
    assert!(result.unwrap().is_success());

    let result = deploy(&control, &mut db, BOB, BytecodeBuilder::deploy(counter_runtime()));
    assert_unauthorized(result, BOB);
}
