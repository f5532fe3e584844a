//! error types for the anchor proxy

use crate::types::AnchorAddress;
use anchor_merkle::MerkleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("unknown instance: {0}")]
    UnknownInstance(AnchorAddress),

    #[error("instance already registered: {0}")]
    DuplicateInstance(AnchorAddress),

    #[error("mirror tree already exists for instance: {0}")]
    DuplicateTree(AnchorAddress),

    #[error("instance not eligible for deposits: {0}")]
    InstanceNotEligible(AnchorAddress),

    #[error("mirror error: {0}")]
    Merkle(#[from] MerkleError),

    #[error("rejected by collaborator: {0}")]
    Rejected(String),

    #[error("unrecognized instance state label: {0}")]
    InvalidStateLabel(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("confirmation pending: outcome unknown")]
    ConfirmationPending,
}

pub type Result<T> = std::result::Result<T, ProxyError>;
