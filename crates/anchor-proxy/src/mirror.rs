//! local tree mirror set
//!
//! one append-only commitment tree per registered instance. a leaf is
//! inserted only after the corresponding on-chain call is confirmed, and
//! the per-instance mutex is held across submit -> confirm -> insert so
//! local indices never drift from the authoritative accumulator.

use crate::error::{ProxyError, Result};
use crate::types::AnchorAddress;
use anchor_merkle::CommitmentTree;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// per-instance commitment tree handles
///
/// operations against different instances are independent; the handle's
/// mutex serializes operations against the same instance.
#[derive(Debug, Default)]
pub struct TreeMirror {
    trees: HashMap<AnchorAddress, Arc<Mutex<CommitmentTree>>>,
}

impl TreeMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// create the tree for a newly registered instance
    pub fn create(&mut self, addr: AnchorAddress, depth: usize) -> Result<()> {
        if self.trees.contains_key(&addr) {
            return Err(ProxyError::DuplicateTree(addr));
        }
        let tree = CommitmentTree::new(depth)?;
        self.trees.insert(addr, Arc::new(Mutex::new(tree)));
        Ok(())
    }

    /// handle to the instance's tree
    pub fn tree(&self, addr: &AnchorAddress) -> Result<Arc<Mutex<CommitmentTree>>> {
        self.trees
            .get(addr)
            .cloned()
            .ok_or(ProxyError::UnknownInstance(*addr))
    }

    pub fn contains(&self, addr: &AnchorAddress) -> bool {
        self.trees.contains_key(addr)
    }
}
