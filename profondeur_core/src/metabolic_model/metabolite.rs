//! This module provides the metabolite struct representing a general metabolite
use std::collections::BTreeSet;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Represents a chemical species independent of compartment
///
/// Instances of the metabolite in specific compartments are only referenced through
/// compartmental identifiers (see [`crate::identifier`]).
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metabolite {
    /// Used to identify the metabolite (must be unique)
    pub id: String,
    /// Human Readable name of the metabolite
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Chemical Formula of the metabolite
    #[builder(default = "None")]
    pub formula: Option<String>,
    /// Electrical charge of the Metabolite
    #[builder(default = "0")]
    pub charge: i32,
    /// Reactions in which any compartmental instance of the metabolite participates
    ///
    /// ### Note
    /// This is maintained by the [`Model`](crate::metabolic_model::model::Model), setting it by
    /// hand is only useful for metabolites which are not part of a model.
    #[builder(default = "BTreeSet::new()")]
    pub reactions: BTreeSet<String>,
}

impl Metabolite {
    /// Create a metabolite with only an identifier
    pub fn new(id: &str) -> Metabolite {
        Metabolite {
            id: id.to_string(),
            name: None,
            formula: None,
            charge: 0,
            reactions: BTreeSet::new(),
        }
    }
}
