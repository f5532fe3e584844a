//! instance registry
//!
//! lifecycle state and asset per pool instance. pure data + accessors;
//! state is mutated only through an authorized governance transition,
//! never implicitly by deposit/withdraw flows.

use crate::error::{ProxyError, Result};
use crate::types::{AnchorAddress, AssetId};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// lifecycle state of a pool instance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstanceState {
    /// no new deposits accepted
    Disabled,
    /// accepts deposits
    Enabled,
    /// accepts deposits, and deposits accrue mining rewards
    Mineable,
}

impl InstanceState {
    pub fn accepts_deposits(&self) -> bool {
        matches!(self, InstanceState::Enabled | InstanceState::Mineable)
    }

    pub fn accrues_rewards(&self) -> bool {
        matches!(self, InstanceState::Mineable)
    }
}

impl FromStr for InstanceState {
    type Err = ProxyError;

    /// labels are case-sensitive; anything else is a config error
    fn from_str(label: &str) -> Result<Self> {
        match label {
            "DISABLED" => Ok(InstanceState::Disabled),
            "ENABLED" => Ok(InstanceState::Enabled),
            "MINEABLE" => Ok(InstanceState::Mineable),
            other => Err(ProxyError::InvalidStateLabel(other.to_string())),
        }
    }
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InstanceState::Disabled => "DISABLED",
            InstanceState::Enabled => "ENABLED",
            InstanceState::Mineable => "MINEABLE",
        };
        write!(f, "{}", label)
    }
}

/// registered pool instance
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolInstance {
    /// token the pool accepts; None for a native-asset pool
    pub asset: Option<AssetId>,
    pub state: InstanceState,
}

/// mapping from instance address to its record
///
/// keyed by a stable identifier; nothing depends on iteration order.
#[derive(Debug, Default)]
pub struct InstanceRegistry {
    instances: HashMap<AnchorAddress, PoolInstance>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, addr: AnchorAddress, instance: PoolInstance) -> Result<()> {
        if self.instances.contains_key(&addr) {
            return Err(ProxyError::DuplicateInstance(addr));
        }
        self.instances.insert(addr, instance);
        Ok(())
    }

    /// apply a governance-authorized transition
    pub fn set_state(&mut self, addr: AnchorAddress, state: InstanceState) -> Result<()> {
        match self.instances.get_mut(&addr) {
            Some(instance) => {
                instance.state = state;
                Ok(())
            }
            None => Err(ProxyError::UnknownInstance(addr)),
        }
    }

    pub fn get(&self, addr: &AnchorAddress) -> Option<&PoolInstance> {
        self.instances.get(addr)
    }

    pub fn contains(&self, addr: &AnchorAddress) -> bool {
        self.instances.contains_key(addr)
    }

    pub fn is_eligible_for_deposit(&self, addr: &AnchorAddress) -> bool {
        self.instances
            .get(addr)
            .map(|i| i.state.accepts_deposits())
            .unwrap_or(false)
    }

    pub fn is_eligible_for_reward(&self, addr: &AnchorAddress) -> bool {
        self.instances
            .get(addr)
            .map(|i| i.state.accrues_rewards())
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
