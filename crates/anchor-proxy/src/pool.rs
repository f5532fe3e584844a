//! collaborator interfaces
//!
//! the proxy orchestrates three external collaborators: the pool contract
//! itself, the proving pipeline, and governance. all are black boxes
//! behind async traits; submission + confirmation is a single await, and
//! a rejection carries the collaborator's reason verbatim.

use crate::error::Result;
use crate::registry::InstanceState;
use crate::types::{
    AccountId, AnchorAddress, ChainId, Commitment, NullifierHash, Proof, PublicInputs,
    RefreshRequest, SecretMaterial, WithdrawEvent,
};
use anchor_merkle::MerklePath;

/// proof + public inputs ready for submission
#[derive(Clone, Debug)]
pub struct WithdrawalArgs {
    pub proof: Proof,
    pub public_inputs: PublicInputs,
}

/// everything the prover needs to build a withdrawal proof
///
/// the witness path comes from the proxy's local mirror; the prover holds
/// no tree of its own.
#[derive(Debug)]
pub struct WithdrawalRequest<'a> {
    pub secret: &'a SecretMaterial,
    pub path: &'a MerklePath,
    pub recipient: AccountId,
    pub relayer: AccountId,
    pub fee: u128,
    pub refresh: RefreshRequest,
}

/// on-chain pool instance
#[async_trait::async_trait]
pub trait PoolContract: Send + Sync {
    /// submit a deposit; Ok means the commitment is confirmed on-chain
    async fn deposit(&self, commitment: Commitment, encrypted_note: Option<Vec<u8>>)
        -> Result<()>;

    /// submit a withdrawal proof; Ok carries the resulting event
    async fn withdraw(&self, proof: Proof, public_inputs: PublicInputs) -> Result<WithdrawEvent>;

    /// whether a nullifier has already been spent
    async fn is_nullifier_spent(&self, hash: NullifierHash) -> Result<bool>;
}

/// proving / witness-generation pipeline
#[async_trait::async_trait]
pub trait WitnessProver: Send + Sync {
    /// fresh (commitment, secret) pair for a deposit toward dest_chain
    async fn generate_deposit(&self, dest_chain: ChainId)
        -> Result<(Commitment, SecretMaterial)>;

    /// build proof + public inputs for a withdrawal
    async fn prepare_withdrawal(&self, request: WithdrawalRequest<'_>) -> Result<WithdrawalArgs>;
}

/// governance contract authorizing lifecycle transitions
///
/// the proxy invokes the authorization and trusts the result; it does not
/// re-check permissions locally.
#[async_trait::async_trait]
pub trait Governance: Send + Sync {
    async fn authorize_transition(
        &self,
        instance: AnchorAddress,
        new_state: InstanceState,
    ) -> Result<()>;
}
