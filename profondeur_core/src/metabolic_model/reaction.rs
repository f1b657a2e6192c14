//! This module provides a struct for representing reactions
use derive_builder::Builder;
use indexmap::IndexMap;

use crate::configuration::{default_lower_bound, default_upper_bound};
use crate::metabolic_model::gene::GeneRule;

/// Represents a reaction in the metabolic model
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Reaction {
    /// Used to identify the reaction
    pub id: String,
    /// Metabolite stoichiometry of the reaction
    ///
    /// Keys are compartmental metabolite identifiers, negative coefficients are reactants and
    /// positive coefficients are products.
    #[builder(default = "IndexMap::new()")]
    pub metabolites: IndexMap<String, f64>,
    /// Human-readable reaction name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Rule describing which genes are required for the reaction
    #[builder(default = "None")]
    pub gene_rule: Option<GeneRule>,
    /// Lower flux bound
    #[builder(default = "default_lower_bound()")]
    pub lower_bound: f64,
    /// Upper flux bound
    #[builder(default = "default_upper_bound()")]
    pub upper_bound: f64,
    /// Reaction subsystem (the process the reaction belongs to)
    #[builder(default = "None")]
    pub subsystem: Option<String>,
}

impl Reaction {
    /// Whether the flux bounds allow net flux in both directions
    ///
    /// Both bounds are exclusive, a bound of exactly zero makes the reaction irreversible.
    pub fn is_reversible(&self) -> bool {
        is_reversible(self.lower_bound, self.upper_bound)
    }

    /// Identifiers of the genes referenced by the reaction's gene rule
    pub fn genes(&self) -> Vec<String> {
        self.gene_rule
            .as_ref()
            .map(|rule| rule.genes().into_iter().collect())
            .unwrap_or_default()
    }
}

/// Determine reversibility from a pair of flux bounds
pub fn is_reversible(lower_bound: f64, upper_bound: f64) -> bool {
    lower_bound < 0. && upper_bound > 0.
}
