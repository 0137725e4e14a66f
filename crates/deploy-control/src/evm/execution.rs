use revm::{
    context::{
        journal::Journal,
        result::{EVMError, ExecResultAndState, ExecutionResult, HaltReason, ResultAndState},
        BlockEnv, CfgEnv, Context, ContextTr, JournalTr, TxEnv,
    },
    handler::{EthFrame, Handler, MainBuilder, MainContext},
    inspector::InspectorHandler,
    interpreter::interpreter::EthInterpreter,
    Database, DatabaseCommit, Inspector,
};

use crate::{AuthorizationRegistry, DeploymentHandler, DeploymentTransactionError, OriginGate};

/// Error type of gated execution.
pub type DeploymentEvmError<DBError> = EVMError<DBError, DeploymentTransactionError>;

/// The mainnet context gated transactions execute in.
pub type DeploymentContext<DB> = Context<BlockEnv, TxEnv, CfgEnv, DB, Journal<DB>, ()>;

type MainnetDeploymentHandler<'a, R, EVM, DBError> =
    DeploymentHandler<'a, R, EVM, DeploymentEvmError<DBError>, EthFrame<EthInterpreter>>;

/// Executes transactions against a database with top-level contract creation gated by an
/// [`OriginGate`].
///
/// Every call assembles a fresh mainnet context from the configured [`CfgEnv`] and [`BlockEnv`].
/// A denied transaction returns [`DeploymentTransactionError::UnauthorizedDeployer`] and leaves the
/// database unchanged.
#[derive(Clone, Debug)]
pub struct DeploymentExecutor<'a, R: ?Sized> {
    gate: OriginGate<'a, R>,
    cfg: CfgEnv,
    block: BlockEnv,
}

impl<'a, R: AuthorizationRegistry + ?Sized> DeploymentExecutor<'a, R> {
    /// Creates an executor with default mainnet configuration.
    pub fn new(gate: OriginGate<'a, R>) -> Self {
        Self { gate, cfg: CfgEnv::default(), block: BlockEnv::default() }
    }

    /// Sets the chain configuration.
    pub fn with_cfg(mut self, cfg: CfgEnv) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets the block environment.
    pub fn with_block(mut self, block: BlockEnv) -> Self {
        self.block = block;
        self
    }

    /// Returns the gate consulted for contract creations.
    pub const fn gate(&self) -> OriginGate<'a, R> {
        self.gate
    }

    fn context<DB: Database>(&self, db: DB, tx: TxEnv) -> DeploymentContext<DB> {
        Context::mainnet()
            .with_db(db)
            .with_cfg(self.cfg.clone())
            .with_block(self.block.clone())
            .with_tx(tx)
    }

    /// Executes `tx` without committing, returning the result and the state diff.
    pub fn transact<DB: Database>(
        &self,
        db: DB,
        tx: TxEnv,
    ) -> Result<ResultAndState<HaltReason>, DeploymentEvmError<DB::Error>> {
        let mut evm = self.context(db, tx).build_mainnet();
        let mut handler = MainnetDeploymentHandler::<R, _, DB::Error>::new(self.gate);
        let result = handler.run(&mut evm)?;
        let state = evm.ctx.journal_mut().finalize();
        Ok(ExecResultAndState::new(result, state))
    }

    /// Executes `tx` and commits its state diff to `db`.
    ///
    /// Nothing is committed when the transaction fails validation.
    pub fn transact_commit<DB: Database + DatabaseCommit>(
        &self,
        db: &mut DB,
        tx: TxEnv,
    ) -> Result<ExecutionResult<HaltReason>, DeploymentEvmError<DB::Error>> {
        let outcome = self.transact(&mut *db, tx)?;
        db.commit(outcome.state);
        Ok(outcome.result)
    }

    /// Executes `tx` with `inspector` attached, without committing.
    ///
    /// Inspected execution is gated exactly like [`Self::transact`].
    pub fn inspect<DB, I>(
        &self,
        db: DB,
        tx: TxEnv,
        inspector: I,
    ) -> Result<ResultAndState<HaltReason>, DeploymentEvmError<DB::Error>>
    where
        DB: Database,
        I: Inspector<DeploymentContext<DB>>,
    {
        let mut evm = self.context(db, tx).build_mainnet_with_inspector(inspector);
        let mut handler = MainnetDeploymentHandler::<R, _, DB::Error>::new(self.gate);
        let result = handler.inspect_run(&mut evm)?;
        let state = evm.ctx.journal_mut().finalize();
        Ok(ExecResultAndState::new(result, state))
    }
}
