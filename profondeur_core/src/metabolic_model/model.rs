//! This module provides the Model struct for representing an entire metabolic model
use indexmap::IndexMap;

use crate::identifier::general_metabolite_of;
use crate::metabolic_model::gene::Gene;
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::reaction::Reaction;

/// Represents a Genome Scale Metabolic Model
///
/// The model is read only while networks are assembled from it, so a single instance can be
/// shared between threads building networks concurrently.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    /// Map of reaction ids to Reactions
    pub reactions: IndexMap<String, Reaction>,
    /// Map of general metabolite ids to Metabolites
    pub metabolites: IndexMap<String, Metabolite>,
    /// Compartments in the model
    ///
    /// An IndexMap<String, String> of {short name: long name}
    pub compartments: IndexMap<String, String>,
    /// Map of gene ids to Genes
    pub genes: IndexMap<String, Gene>,
    /// Id associated with the Model
    pub id: Option<String>,
    /// A version identifier for the Model, stored as a string
    pub version: Option<String>,
}

impl Model {
    pub fn new_empty() -> Self {
        Model::default()
    }

    /// Add a reaction to the model
    ///
    /// Metabolites already in the model have the reaction added to their back references.
    /// Replacing a reaction with the same id recomputes every back reference, so metabolites
    /// only the old reaction used lose it.
    ///
    /// # Examples
    /// ```rust
    /// use profondeur_core::metabolic_model::model::Model;
    /// use profondeur_core::metabolic_model::reaction::ReactionBuilder;
    /// let mut model = Model::new_empty();
    /// let new_reaction = ReactionBuilder::default().id("new_reaction".to_string()).build().unwrap();
    /// model.add_reaction(new_reaction);
    /// ```
    pub fn add_reaction(&mut self, reaction: Reaction) {
        for met_id in reaction.metabolites.keys() {
            if let Ok(general) = general_metabolite_of(met_id) {
                if let Some(met) = self.metabolites.get_mut(general) {
                    met.reactions.insert(reaction.id.clone());
                }
            }
        }
        let id = reaction.id.clone();
        if self.reactions.insert(id, reaction).is_some() {
            self.refresh_metabolite_reactions();
        }
    }

    /// Add a general metabolite to the model, collecting its reaction back references
    pub fn add_metabolite(&mut self, mut metabolite: Metabolite) {
        for (rxn_id, rxn) in &self.reactions {
            let participates = rxn
                .metabolites
                .keys()
                .any(|met_id| general_metabolite_of(met_id) == Ok(metabolite.id.as_str()));
            if participates {
                metabolite.reactions.insert(rxn_id.clone());
            }
        }
        let id = metabolite.id.clone();
        self.metabolites.insert(id, metabolite);
    }

    /// Add a compartment with its long name
    pub fn add_compartment(&mut self, id: &str, name: &str) {
        self.compartments.insert(id.to_string(), name.to_string());
    }

    /// Add a gene to the model
    pub fn add_gene(&mut self, gene: Gene) {
        let id = gene.id.clone();
        self.genes.insert(id, gene);
    }

    pub fn reaction(&self, id: &str) -> Option<&Reaction> {
        self.reactions.get(id)
    }

    pub fn metabolite(&self, id: &str) -> Option<&Metabolite> {
        self.metabolites.get(id)
    }

    /// Recompute every metabolite's reaction back references from the reactions
    pub fn refresh_metabolite_reactions(&mut self) {
        for met in self.metabolites.values_mut() {
            met.reactions.clear();
        }
        for (rxn_id, rxn) in &self.reactions {
            for met_id in rxn.metabolites.keys() {
                let Ok(general) = general_metabolite_of(met_id) else {
                    continue;
                };
                if let Some(met) = self.metabolites.get_mut(general) {
                    met.reactions.insert(rxn_id.clone());
                }
            }
        }
    }
}
