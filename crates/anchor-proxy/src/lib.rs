//! anchor-proxy: deposit/withdrawal routing for anonymity pool instances
//!
//! a single entry point in front of independent anonymity pools
//! ("anchors"). the proxy routes deposits and withdrawals to the right
//! instance, enforces which instances currently accept traffic, and keeps
//! a local mirror of each pool's commitment tree so withdrawal witnesses
//! can be built without rescanning the ledger.
//!
//! ## usage
//!
//! ```rust,ignore
//! let proxy = AnchorProxy::new(prover, governance);
//! proxy.register(addr, None, InstanceState::Mineable, 30, pool).await?;
//!
//! let (record, secret) = proxy.deposit(addr, ChainId(1), None).await?;
//! let outcome = proxy
//!     .withdraw(addr, record, &secret, recipient, relayer, fee, RefreshRequest::None)
//!     .await?;
//! ```

pub mod config;
pub mod error;
pub mod mirror;
pub mod pool;
pub mod proxy;
pub mod registry;
pub mod types;

pub use anchor_merkle::{CommitmentTree, Hash, MerkleError, MerklePath};

pub use config::*;
pub use error::*;
pub use mirror::*;
pub use pool::*;
pub use proxy::*;
pub use registry::*;
pub use types::*;
