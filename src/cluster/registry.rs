//! Shim identity registry
//!
//! Maps shim identifiers to the identity each shim declared at registration,
//! including whether it is the active configuration. At most one identity
//! may be active.

use super::ShimIdentity;
use crate::error::{Result, ShimError};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ShimRegistry {
    identities: Vec<ShimIdentity>,
}

impl ShimRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shim identity
    ///
    /// Fails on a duplicate identifier or on a second active identity.
    pub fn register(&mut self, identity: ShimIdentity) -> Result<()> {
        if identity.id.is_empty() {
            return Err(ShimError::Config("shim identifier must not be empty".to_string()));
        }
        if self.get(&identity.id).is_some() {
            return Err(ShimError::Config(format!(
                "shim '{}' is already registered",
                identity.id
            )));
        }
        if identity.active {
            if let Some(active) = self.active() {
                return Err(ShimError::Config(format!(
                    "shim '{}' cannot be active, '{}' already is",
                    identity.id, active.id
                )));
            }
        }
        debug!(shim = %identity, active = identity.active, "registered shim");
        self.identities.push(identity);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ShimIdentity> {
        self.identities.iter().find(|i| i.id == id)
    }

    /// Whether `id` names the active configuration. Unknown ids are inactive.
    pub fn is_active(&self, id: &str) -> bool {
        self.get(id).map(ShimIdentity::is_active).unwrap_or(false)
    }

    pub fn active(&self) -> Option<&ShimIdentity> {
        self.identities.iter().find(|i| i.active)
    }

    pub fn identities(&self) -> impl Iterator<Item = &ShimIdentity> {
        self.identities.iter()
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}
