//! proxy configuration
//!
//! declarative instance list resolved into typed registration parameters.
//! addresses and asset ids are 32-byte hex strings; lifecycle states are
//! the case-sensitive labels DISABLED / ENABLED / MINEABLE.

use crate::error::{ProxyError, Result};
use crate::registry::InstanceState;
use crate::types::{AnchorAddress, AssetId};
use serde::{Deserialize, Serialize};

/// one pool instance entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnchorConfig {
    /// instance address (32-byte hex, optional 0x prefix)
    pub address: String,
    /// asset id (32-byte hex); omit for a native-asset pool
    pub asset: Option<String>,
    /// initial lifecycle state label
    pub state: String,
    /// depth of the local mirror tree
    pub tree_depth: usize,
}

impl AnchorConfig {
    pub fn resolve(&self) -> Result<ResolvedAnchor> {
        let address = AnchorAddress(decode_hex32("address", &self.address)?);
        let asset = match &self.asset {
            Some(s) => Some(AssetId(decode_hex32("asset", s)?)),
            None => None,
        };
        let state = self.state.parse::<InstanceState>()?;

        Ok(ResolvedAnchor {
            address,
            asset,
            state,
            tree_depth: self.tree_depth,
        })
    }
}

/// typed registration parameters for one instance
#[derive(Clone, Debug)]
pub struct ResolvedAnchor {
    pub address: AnchorAddress,
    pub asset: Option<AssetId>,
    pub state: InstanceState,
    pub tree_depth: usize,
}

/// full proxy configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub anchors: Vec<AnchorConfig>,
}

impl ProxyConfig {
    pub fn resolve(&self) -> Result<Vec<ResolvedAnchor>> {
        self.anchors.iter().map(AnchorConfig::resolve).collect()
    }
}

fn decode_hex32(field: &str, value: &str) -> Result<[u8; 32]> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(stripped)
        .map_err(|e| ProxyError::InvalidConfig(format!("{}: {}", field, e)))?;

    if bytes.len() != 32 {
        return Err(ProxyError::InvalidConfig(format!(
            "{}: expected 32 bytes, got {}",
            field,
            bytes.len()
        )));
    }

    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    Ok(out)
}
