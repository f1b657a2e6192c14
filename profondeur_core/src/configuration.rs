//! Global defaults and the per-network configuration
use std::sync::{LazyLock, RwLock};

use derive_builder::Builder;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

/// Process wide defaults used when model records omit values
#[derive(Clone, Debug)]
pub struct Configuration {
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            lower_bound: -1000.,
            upper_bound: 1000.,
        }
    }
}

/// Default lower flux bound for reactions built without one
pub(crate) fn default_lower_bound() -> f64 {
    match CONFIGURATION.read() {
        Ok(config) => config.lower_bound,
        Err(poisoned) => poisoned.into_inner().lower_bound,
    }
}

/// Default upper flux bound for reactions built without one
pub(crate) fn default_upper_bound() -> f64 {
    match CONFIGURATION.read() {
        Ok(config) => config.upper_bound,
        Err(poisoned) => poisoned.into_inner().upper_bound,
    }
}

/// Options controlling how a network is assembled from a model
///
/// # Note
/// Changing any of these values requires the network to be rebuilt, networks are never patched
/// in place.
#[derive(Builder, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfiguration {
    /// Whether instances of a metabolite in different compartments get separate nodes
    #[builder(default = "false")]
    #[serde(default)]
    pub compartmentalization: bool,
    /// General metabolite identifiers which get a separate node for every reaction they
    /// participate in
    #[builder(default = "IndexSet::new()")]
    #[serde(default)]
    pub replication_metabolites: IndexSet<String>,
}

impl NetworkConfiguration {
    /// Whether the general metabolite should be replicated per reaction
    pub fn replicates(&self, general_metabolite: &str) -> bool {
        self.replication_metabolites.contains(general_metabolite)
    }
}
