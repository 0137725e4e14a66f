use delegate::delegate;
use revm::{
    context::{result::HaltReason, ContextTr, JournalTr, Transaction},
    handler::{EthFrame, EvmTr, EvmTrError, FrameResult, FrameTr, Handler, MainnetHandler},
    inspector::{InspectorEvmTr, InspectorHandler},
    interpreter::{interpreter::EthInterpreter, interpreter_action::FrameInit, InitialAndFloorGas},
    state::EvmState,
    Inspector,
};
use tracing::warn;

use crate::{
    into_account_id, AuthorizationRegistry, DeploymentTransactionError, OriginGate, Verdict,
};

/// Revm handler that gates top-level contract creations.
///
/// It wraps the [`MainnetHandler`] and inherits its behaviour, except that [`Handler::validate`]
/// rejects a `TxKind::Create` transaction whose caller maps to an account the [`OriginGate`]
/// denies. The rejection surfaces as [`DeploymentTransactionError::UnauthorizedDeployer`] before
/// any state is touched.
#[allow(missing_debug_implementations)]
pub struct DeploymentHandler<'a, R: ?Sized, EVM, ERROR, FRAME> {
    mainnet: MainnetHandler<EVM, ERROR, FRAME>,
    gate: OriginGate<'a, R>,
}

impl<'a, R, EVM, ERROR, FRAME> DeploymentHandler<'a, R, EVM, ERROR, FRAME>
where
    R: AuthorizationRegistry + ?Sized,
{
    /// Create a new `DeploymentHandler` consulting `gate`.
    pub fn new(gate: OriginGate<'a, R>) -> Self {
        Self { mainnet: MainnetHandler::default(), gate }
    }
}

impl<R, EVM, ERROR, FRAME> DeploymentHandler<'_, R, EVM, ERROR, FRAME>
where
    R: AuthorizationRegistry + ?Sized,
    EVM: EvmTr,
    ERROR: From<DeploymentTransactionError>,
{
    /// Consults the gate if the transaction creates a contract.
    fn enforce_deployment_gate(&self, evm: &EVM) -> Result<(), ERROR> {
        let tx = evm.ctx_ref().tx();
        if !tx.kind().is_create() {
            return Ok(());
        }

        let caller = tx.caller();
        let account = into_account_id(caller);
        match self.gate.check(&account) {
            Verdict::Admit => Ok(()),
            Verdict::Deny => {
                warn!(%caller, %account, "Rejected contract creation from unauthorized deployer");
                Err(DeploymentTransactionError::UnauthorizedDeployer { caller, account }.into())
            }
        }
    }
}

impl<R, EVM, ERROR, FRAME> Handler for DeploymentHandler<'_, R, EVM, ERROR, FRAME>
where
    R: AuthorizationRegistry + ?Sized,
    EVM: EvmTr<Context: ContextTr<Journal: JournalTr<State = EvmState>>, Frame = FRAME>,
    ERROR: EvmTrError<EVM> + From<DeploymentTransactionError>,
    FRAME: FrameTr<FrameResult = FrameResult, FrameInit = FrameInit>,
{
    type Evm = EVM;

    type Error = ERROR;

    type HaltReason = HaltReason;

    delegate! {
        to self.mainnet {
            fn validate_env(&self, evm: &mut Self::Evm) -> Result<(), Self::Error>;
            fn validate_against_state_and_deduct_caller(
                &self,
                evm: &mut Self::Evm,
            ) -> Result<(), Self::Error>;
            fn pre_execution(&self, evm: &mut Self::Evm) -> Result<u64, Self::Error>;
        }
    }

    /// Mainnet validation with the deployment gate between the environment checks and the
    /// intrinsic gas check.
    fn validate(&self, evm: &mut Self::Evm) -> Result<InitialAndFloorGas, Self::Error> {
        self.validate_env(evm)?;
        self.enforce_deployment_gate(evm)?;
        self.validate_initial_tx_gas(evm)
    }
}

impl<R, EVM, ERROR> InspectorHandler
    for DeploymentHandler<'_, R, EVM, ERROR, EthFrame<EthInterpreter>>
where
    R: AuthorizationRegistry + ?Sized,
    EVM: InspectorEvmTr<
        Context: ContextTr<Journal: JournalTr<State = EvmState>>,
        Frame = EthFrame<EthInterpreter>,
        Inspector: Inspector<<<Self as Handler>::Evm as EvmTr>::Context, EthInterpreter>,
    >,
    ERROR: EvmTrError<EVM> + From<DeploymentTransactionError>,
{
    type IT = EthInterpreter;
}
