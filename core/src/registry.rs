//! The static **registration table** of capabilities, keyed by name.

use std::collections::BTreeMap;
use std::sync::Arc;

use holehe_common::capability::{Capability, Method};
use holehe_common::config::Config;
use holehe_common::{Error, Result};
use tracing::debug;

#[derive(Default)]
pub struct Registry {
    capabilities: BTreeMap<&'static str, Arc<dyn Capability>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a list, rejecting duplicate names.
    pub fn from_capabilities<I>(capabilities: I) -> Result<Self>
    where
        I: IntoIterator<Item = Arc<dyn Capability>>,
    {
        let mut registry: Registry = Self::new();
        for capability in capabilities {
            registry.register(capability)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, capability: Arc<dyn Capability>) -> Result<()> {
        let name: &'static str = capability.name();
        if self.capabilities.contains_key(name) {
            return Err(Error::DuplicateCapability(name.to_string()));
        }
        self.capabilities.insert(name, capability);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    /// The capabilities to run for this session.
    ///
    /// Pure selection: no requests are made. An empty result is valid.
    pub fn select(&self, cfg: &Config) -> Vec<Arc<dyn Capability>> {
        let selected: Vec<Arc<dyn Capability>> = self
            .capabilities
            .values()
            .filter(|capability| {
                !(cfg.no_password_recovery && capability.method() == Method::PasswordRecovery)
            })
            .cloned()
            .collect();

        debug!(
            "selected {} of {} capabilities",
            selected.len(),
            self.capabilities.len()
        );
        selected
    }
}
