//! anchor proxy
//!
//! single entry point in front of registered pool instances: routes
//! deposits and withdrawals, enforces lifecycle policy, and keeps each
//! instance's local commitment tree in lock-step with on-chain state.

use crate::config::ProxyConfig;
use crate::error::{ProxyError, Result};
use crate::mirror::TreeMirror;
use crate::pool::{Governance, PoolContract, WitnessProver, WithdrawalRequest};
use crate::registry::{InstanceRegistry, InstanceState, PoolInstance};
use crate::types::{
    AccountId, AnchorAddress, AssetId, ChainId, Commitment, DepositRecord, NullifierHash,
    RefreshRequest, SecretMaterial, WithdrawalOutcome,
};
use anchor_merkle::{CommitmentTree, Hash, MerkleError, MerklePath};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

/// registry, mirror, and pool handles guarded together
///
/// read-mostly during deposit/withdraw; registration and state
/// transitions take the write lock so an eligibility check never observes
/// an instance mid-transition.
#[derive(Default)]
struct ProxyState {
    registry: InstanceRegistry,
    mirror: TreeMirror,
    pools: HashMap<AnchorAddress, Arc<dyn PoolContract>>,
}

pub struct AnchorProxy {
    state: RwLock<ProxyState>,
    prover: Arc<dyn WitnessProver>,
    governance: Arc<dyn Governance>,
}

impl AnchorProxy {
    pub fn new(prover: Arc<dyn WitnessProver>, governance: Arc<dyn Governance>) -> Self {
        Self {
            state: RwLock::new(ProxyState::default()),
            prover,
            governance,
        }
    }

    /// register an instance and create its mirror tree together
    ///
    /// an instance is never resolvable without a live tree.
    pub async fn register(
        &self,
        addr: AnchorAddress,
        asset: Option<AssetId>,
        initial_state: InstanceState,
        tree_depth: usize,
        pool: Arc<dyn PoolContract>,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        if state.registry.contains(&addr) {
            return Err(ProxyError::DuplicateInstance(addr));
        }

        state.mirror.create(addr, tree_depth)?;
        state.registry.register(
            addr,
            PoolInstance {
                asset,
                state: initial_state,
            },
        )?;
        state.pools.insert(addr, pool);

        info!("registered instance {} ({})", addr, initial_state);
        Ok(())
    }

    /// register every instance from a resolved config
    pub async fn register_from_config(
        &self,
        config: &ProxyConfig,
        pools: &HashMap<AnchorAddress, Arc<dyn PoolContract>>,
    ) -> Result<()> {
        for anchor in config.resolve()? {
            let pool = pools.get(&anchor.address).cloned().ok_or_else(|| {
                ProxyError::InvalidConfig(format!("no pool handle for {}", anchor.address))
            })?;
            self.register(
                anchor.address,
                anchor.asset,
                anchor.state,
                anchor.tree_depth,
                pool,
            )
            .await?;
        }
        Ok(())
    }

    /// apply a lifecycle transition after governance authorizes it
    ///
    /// disabling an instance never invalidates already-issued deposit
    /// records; withdrawal stays possible.
    pub async fn set_state(&self, addr: AnchorAddress, new_state: InstanceState) -> Result<()> {
        self.governance.authorize_transition(addr, new_state).await?;

        let mut state = self.state.write().await;
        state.registry.set_state(addr, new_state)?;

        info!("instance {} transitioned to {}", addr, new_state);
        Ok(())
    }

    /// route a deposit to an eligible instance
    ///
    /// the mirror is updated only after the pool confirms; a rejected
    /// submission leaves no local mutation, and a full mirror refuses
    /// before anything is submitted. the returned secret material is the
    /// caller's alone, the proxy keeps no copy.
    pub async fn deposit(
        &self,
        addr: AnchorAddress,
        dest_chain: ChainId,
        encrypted_note: Option<Vec<u8>>,
    ) -> Result<(DepositRecord, SecretMaterial)> {
        let (pool, tree) = {
            let state = self.state.read().await;
            let instance = state
                .registry
                .get(&addr)
                .ok_or(ProxyError::UnknownInstance(addr))?;
            if !instance.state.accepts_deposits() {
                return Err(ProxyError::InstanceNotEligible(addr));
            }
            (self.pool_handle(&state, &addr)?, state.mirror.tree(&addr)?)
        };

        let (commitment, secret) = self.prover.generate_deposit(dest_chain).await?;

        // serialize submit -> confirm -> insert per instance
        let mut tree = tree.lock().await;
        // a confirmed commitment must always be mirrorable
        if tree.len() == tree.capacity() {
            return Err(MerkleError::TreeFull(tree.capacity()).into());
        }

        debug!("submitting deposit {} to {}", commitment, addr);
        pool.deposit(commitment, encrypted_note).await?;

        let index = tree.insert(commitment.to_bytes())?;
        info!("deposit confirmed on {} at index {}", addr, index);

        Ok((DepositRecord { commitment, index }, secret))
    }

    /// withdraw a previous deposit
    ///
    /// eligibility is not re-checked: funds deposited before an instance
    /// was disabled must remain withdrawable. the outcome is classified
    /// from the confirmed event's refresh-commitment field; only the
    /// refresh case appends a mirror leaf.
    pub async fn withdraw(
        &self,
        addr: AnchorAddress,
        record: DepositRecord,
        secret: &SecretMaterial,
        recipient: AccountId,
        relayer: AccountId,
        fee: u128,
        refresh: RefreshRequest,
    ) -> Result<WithdrawalOutcome> {
        let (pool, tree) = {
            let state = self.state.read().await;
            if !state.registry.contains(&addr) {
                return Err(ProxyError::UnknownInstance(addr));
            }
            (self.pool_handle(&state, &addr)?, state.mirror.tree(&addr)?)
        };

        let mut tree = tree.lock().await;
        // a refresh re-inserts into the mirror; refuse before proving if full
        if !refresh.commitment().is_zero() && tree.len() == tree.capacity() {
            return Err(MerkleError::TreeFull(tree.capacity()).into());
        }
        let path = tree.path(record.index)?;

        let args = self
            .prover
            .prepare_withdrawal(WithdrawalRequest {
                secret,
                path: &path,
                recipient,
                relayer,
                fee,
                refresh,
            })
            .await?;

        debug!("submitting withdrawal to {}", addr);
        let event = pool.withdraw(args.proof, args.public_inputs).await?;

        if event.refresh_commitment.is_zero() {
            info!("withdrawal confirmed on {}", addr);
            Ok(WithdrawalOutcome::Withdrawal(event))
        } else {
            let commitment = event.refresh_commitment;
            let index = tree.insert(commitment.to_bytes())?;
            info!("refresh confirmed on {} at index {}", addr, index);
            Ok(WithdrawalOutcome::Refresh {
                event,
                commitment,
                index,
            })
        }
    }

    /// whether a deposit's nullifier has been spent on-chain
    pub async fn is_spent(&self, addr: AnchorAddress, hash: NullifierHash) -> Result<bool> {
        let pool = {
            let state = self.state.read().await;
            self.pool_handle(&state, &addr)?
        };
        pool.is_nullifier_spent(hash).await
    }

    pub async fn instance(&self, addr: AnchorAddress) -> Option<PoolInstance> {
        self.state.read().await.registry.get(&addr).cloned()
    }

    pub async fn is_eligible_for_deposit(&self, addr: AnchorAddress) -> bool {
        self.state.read().await.registry.is_eligible_for_deposit(&addr)
    }

    pub async fn is_eligible_for_reward(&self, addr: AnchorAddress) -> bool {
        self.state.read().await.registry.is_eligible_for_reward(&addr)
    }

    /// current root of the instance's local mirror
    pub async fn mirror_root(&self, addr: AnchorAddress) -> Result<Hash> {
        let tree = self.tree_handle(addr).await?;
        let tree = tree.lock().await;
        Ok(tree.root())
    }

    /// leaves of the instance's local mirror, in insertion order
    pub async fn mirror_leaves(&self, addr: AnchorAddress) -> Result<Vec<Commitment>> {
        let tree = self.tree_handle(addr).await?;
        let tree = tree.lock().await;
        Ok(tree
            .leaves()
            .iter()
            .map(|l| Commitment::from_bytes(*l))
            .collect())
    }

    pub async fn leaf_count(&self, addr: AnchorAddress) -> Result<u64> {
        let tree = self.tree_handle(addr).await?;
        let tree = tree.lock().await;
        Ok(tree.len())
    }

    /// witness path for a mirrored leaf, for externally built proofs
    pub async fn witness(&self, addr: AnchorAddress, index: u64) -> Result<MerklePath> {
        let tree = self.tree_handle(addr).await?;
        let tree = tree.lock().await;
        Ok(tree.path(index)?)
    }

    fn pool_handle(&self, state: &ProxyState, addr: &AnchorAddress) -> Result<Arc<dyn PoolContract>> {
        state
            .pools
            .get(addr)
            .cloned()
            .ok_or(ProxyError::UnknownInstance(*addr))
    }

    async fn tree_handle(&self, addr: AnchorAddress) -> Result<Arc<Mutex<CommitmentTree>>> {
        let state = self.state.read().await;
        state.mirror.tree(&addr)
    }
}
