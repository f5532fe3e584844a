//! domain types shared across the proxy
//!
//! commitments, nullifier hashes, and addresses are opaque 32-byte values;
//! the proxy never looks inside them beyond the zero check that separates
//! plain withdrawals from refreshes.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// identifier of an anchor pool instance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnchorAddress(pub [u8; 32]);

impl AnchorAddress {
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for AnchorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0[..8])) // short form
    }
}

/// identifier of the token an instance accepts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub [u8; 32]);

impl AssetId {
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0[..8]))
    }
}

/// recipient or relayer identity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0[..8]))
    }
}

/// destination context a deposit is generated for (e.g. target chain)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId(pub u64);

/// opaque deposit commitment
///
/// derived from caller-held secret material by the proving collaborator.
/// the all-zero value is reserved: a zero refresh-commitment field in a
/// withdrawal event means no refresh happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment(pub [u8; 32]);

impl Commitment {
    pub const ZERO: Commitment = Commitment([0u8; 32]);

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Commitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0[..8]))
    }
}

/// spent-marker handle for a deposit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NullifierHash(pub [u8; 32]);

impl NullifierHash {
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for NullifierHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// caller-held secret material backing a deposit
///
/// produced by the proving collaborator, handed straight back to the
/// caller. the proxy never stores it; zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretMaterial(pub Vec<u8>);

impl SecretMaterial {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretMaterial(..)")
    }
}

/// opaque proof bytes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proof(pub Vec<u8>);

impl Proof {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// what a caller needs to withdraw a deposit later
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRecord {
    /// the commitment as submitted on-chain
    pub commitment: Commitment,
    /// leaf position in the pool's commitment tree
    pub index: u64,
}

/// caller intent for the refresh variant of a withdrawal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshRequest {
    /// pay out to the recipient
    None,
    /// re-deposit under this freshly generated commitment
    Commitment(Commitment),
}

impl RefreshRequest {
    /// commitment to put in the public inputs; zero means no refresh
    pub fn commitment(&self) -> Commitment {
        match self {
            RefreshRequest::None => Commitment::ZERO,
            RefreshRequest::Commitment(c) => *c,
        }
    }
}

/// public inputs the pool verifies a withdrawal proof against
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicInputs {
    /// merkle root the witness path was built against
    pub merkle_root: [u8; 32],
    pub nullifier_hash: NullifierHash,
    pub recipient: AccountId,
    pub relayer: AccountId,
    pub fee: u128,
    /// zero when no refresh was requested
    pub refresh_commitment: Commitment,
}

/// event emitted by the pool for a confirmed withdrawal
///
/// the refresh_commitment field distinguishes the two shapes: zero for a
/// plain withdrawal, the new commitment otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawEvent {
    pub nullifier_hash: NullifierHash,
    pub recipient: AccountId,
    pub relayer: AccountId,
    pub fee: u128,
    pub refresh_commitment: Commitment,
}

/// classified result of a withdrawal
#[derive(Clone, Debug)]
pub enum WithdrawalOutcome {
    /// funds released to recipient/relayer, no new commitment
    Withdrawal(WithdrawEvent),
    /// funds re-deposited inside the same pool under a new commitment
    Refresh {
        event: WithdrawEvent,
        commitment: Commitment,
        /// leaf position of the new commitment in the mirror
        index: u64,
    },
}

impl WithdrawalOutcome {
    pub fn event(&self) -> &WithdrawEvent {
        match self {
            WithdrawalOutcome::Withdrawal(event) => event,
            WithdrawalOutcome::Refresh { event, .. } => event,
        }
    }

    pub fn is_refresh(&self) -> bool {
        matches!(self, WithdrawalOutcome::Refresh { .. })
    }
}
