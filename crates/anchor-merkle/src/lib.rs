//! local commitment tree mirror
//!
//! append-only merkle accumulator replicating an anchor pool's on-chain
//! commitment tree. leaves are inserted in confirmation order so local
//! indices match the authoritative accumulator; the mirror is what lets
//! a client build withdrawal witnesses without rescanning the ledger.

use thiserror::Error;

pub type Hash = [u8; 32];

/// domain separator for merkle node hashing
pub const MERKLE_DOMAIN: &[u8] = b"anchor.merkle.v1";

/// maximum supported tree depth
pub const MAX_DEPTH: usize = 32;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MerkleError {
    #[error("tree is full: capacity {0} reached")]
    TreeFull(u64),

    #[error("leaf index {index} out of range (tree has {len} leaves)")]
    IndexOutOfRange { index: u64, len: u64 },

    #[error("unsupported tree depth {0}")]
    InvalidDepth(usize),
}

pub type Result<T> = std::result::Result<T, MerkleError>;

fn hash_siblings(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(MERKLE_DOMAIN);
    hasher.update(left);
    hasher.update(right);
    *hasher.finalize().as_bytes()
}

/// merkle inclusion path for witness generation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerklePath {
    /// sibling hashes from leaf level to root
    pub siblings: Vec<Hash>,
    /// position of the leaf
    pub index: u64,
}

impl MerklePath {
    /// recompute the root implied by this path for the given leaf
    pub fn root(&self, leaf: &Hash) -> Hash {
        let mut current = *leaf;
        let mut pos = self.index;

        for sibling in &self.siblings {
            current = if pos & 1 == 0 {
                hash_siblings(&current, sibling)
            } else {
                hash_siblings(sibling, &current)
            };
            pos >>= 1;
        }

        current
    }

    /// verify that leaf is in a tree with the given root
    pub fn verify(&self, leaf: &Hash, root: &Hash) -> bool {
        self.root(leaf) == *root
    }
}

/// append-only commitment tree of fixed depth
///
/// insert is the only mutation; leaves are never removed or reordered.
/// missing subtrees hash as all-zero leaves, so the root is stable for a
/// given leaf sequence regardless of how full the tree is.
#[derive(Clone, Debug)]
pub struct CommitmentTree {
    depth: usize,
    leaves: Vec<Hash>,
    /// zero-subtree hash per level, leaf level first
    zeros: Vec<Hash>,
}

impl CommitmentTree {
    /// create an empty tree; capacity is 2^depth leaves
    pub fn new(depth: usize) -> Result<Self> {
        if depth == 0 || depth > MAX_DEPTH {
            return Err(MerkleError::InvalidDepth(depth));
        }

        let mut zeros = Vec::with_capacity(depth + 1);
        zeros.push([0u8; 32]);
        for level in 0..depth {
            let prev = zeros[level];
            zeros.push(hash_siblings(&prev, &prev));
        }

        Ok(Self {
            depth,
            leaves: Vec::new(),
            zeros,
        })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn capacity(&self) -> u64 {
        1u64 << self.depth
    }

    pub fn len(&self) -> u64 {
        self.leaves.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn leaf(&self, index: u64) -> Option<Hash> {
        self.leaves.get(index as usize).copied()
    }

    pub fn leaves(&self) -> &[Hash] {
        &self.leaves
    }

    /// append a leaf, returns its 0-based index
    pub fn insert(&mut self, leaf: Hash) -> Result<u64> {
        if self.len() == self.capacity() {
            return Err(MerkleError::TreeFull(self.capacity()));
        }

        let index = self.leaves.len() as u64;
        self.leaves.push(leaf);
        Ok(index)
    }

    /// current root over the full fixed-depth tree
    pub fn root(&self) -> Hash {
        if self.leaves.is_empty() {
            return self.zeros[self.depth];
        }

        let mut level = self.leaves.clone();
        for d in 0..self.depth {
            if level.len() % 2 == 1 {
                level.push(self.zeros[d]);
            }

            let mut next = Vec::with_capacity(level.len() / 2);
            for chunk in level.chunks(2) {
                next.push(hash_siblings(&chunk[0], &chunk[1]));
            }
            level = next;
        }

        level.first().copied().unwrap_or(self.zeros[self.depth])
    }

    /// sibling path for the leaf at index
    pub fn path(&self, index: u64) -> Result<MerklePath> {
        if index >= self.len() {
            return Err(MerkleError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }

        let mut siblings = Vec::with_capacity(self.depth);
        let mut level = self.leaves.clone();
        let mut pos = index as usize;

        for d in 0..self.depth {
            if level.len() % 2 == 1 {
                level.push(self.zeros[d]);
            }

            let sibling_pos = if pos % 2 == 0 { pos + 1 } else { pos - 1 };
            siblings.push(level.get(sibling_pos).copied().unwrap_or(self.zeros[d]));

            let mut next = Vec::with_capacity(level.len() / 2);
            for chunk in level.chunks(2) {
                next.push(hash_siblings(&chunk[0], &chunk[1]));
            }
            level = next;
            pos /= 2;
        }

        Ok(MerklePath { siblings, index })
    }
}
