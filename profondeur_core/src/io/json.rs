//! Module providing JSON IO: COBRA style models in, assembled networks out
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::configuration::{default_lower_bound, default_upper_bound};
use crate::identifier::{compartmental_metabolite, IdentifierError};
use crate::io::gene_rule_parse::{parse_gene_rule, GeneRuleParseError};
use crate::metabolic_model::gene::Gene;
use crate::metabolic_model::metabolite::MetaboliteBuilder;
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::{ReactionBuilder, ReactionBuilderError};
use crate::network::builder::Network;

// region JSON Model
/// Represents a JSON serialized model
///
/// Annotation and notes fields are ignored, serde skips unknown fields.
#[derive(Serialize, Deserialize)]
struct JsonModel {
    metabolites: Vec<JsonMetabolite>,
    reactions: Vec<JsonReaction>,
    #[serde(default)]
    genes: Vec<JsonGene>,
    id: Option<String>,
    compartments: Option<IndexMap<String, String>>,
    version: Option<String>,
}

/// A compartmental metabolite record
#[derive(Serialize, Deserialize)]
struct JsonMetabolite {
    id: String,
    name: Option<String>,
    compartment: Option<String>,
    charge: Option<i32>,
    formula: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct JsonReaction {
    id: String,
    name: Option<String>,
    metabolites: IndexMap<String, f64>,
    #[serde(default = "default_lower_bound")]
    lower_bound: f64,
    #[serde(default = "default_upper_bound")]
    upper_bound: f64,
    #[serde(default)]
    gene_reaction_rule: String,
    subsystem: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct JsonGene {
    id: String,
    name: Option<String>,
}
// endregion JSON Model

// region Conversions
impl From<JsonGene> for Gene {
    fn from(g: JsonGene) -> Self {
        Self {
            id: g.id,
            name: g.name,
        }
    }
}

impl Model {
    /// Read a COBRA style JSON model file
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Model, JsonError> {
        let model_str = fs::read_to_string(path)?;
        Model::from_json_str(&model_str)
    }

    /// Parse a COBRA style JSON model from a string
    ///
    /// # Examples
    /// ```rust
    /// use profondeur_core::metabolic_model::model::Model;
    /// let model = Model::from_json_str(r#"{
    ///     "metabolites": [{"id": "atp_c", "compartment": "c"}, {"id": "atp_m"}],
    ///     "reactions": [{"id": "ATPtm", "metabolites": {"atp_c": -1.0, "atp_m": 1.0}}]
    /// }"#).unwrap();
    /// assert_eq!(model.metabolites.len(), 1);
    /// assert_eq!(model.compartments.len(), 2);
    /// ```
    pub fn from_json_str(model_str: &str) -> Result<Model, JsonError> {
        let json_model: JsonModel = serde_json::from_str(model_str)?;
        Model::from_json(json_model)
    }

    fn from_json(json_model: JsonModel) -> Result<Self, JsonError> {
        let mut model = Model::new_empty();
        model.id = json_model.id;
        model.version = json_model.version;
        if let Some(compartments) = json_model.compartments {
            model.compartments = compartments;
        }
        for g in json_model.genes {
            model.add_gene(Gene::from(g));
        }
        // Compartmental records collapse onto their general metabolite, the first record wins
        for m in json_model.metabolites {
            let parsed = compartmental_metabolite(&m.id)?;
            let compartment = m.compartment.as_deref().unwrap_or(parsed.compartment);
            if !model.compartments.contains_key(compartment) {
                debug!(compartment, "compartment taken from metabolite record");
                model.add_compartment(compartment, compartment);
            }
            if model.metabolites.contains_key(parsed.general) {
                debug!(metabolite = %m.id, general = parsed.general, "merged metabolite record");
                continue;
            }
            let metabolite = MetaboliteBuilder::default()
                .id(parsed.general.to_string())
                .name(m.name)
                .formula(m.formula)
                .charge(m.charge.unwrap_or_default())
                .build()
                .map_err(|err| JsonError::UnableToBuildMetabolite(err.to_string()))?;
            model.metabolites.insert(metabolite.id.clone(), metabolite);
        }
        for rxn in json_model.reactions {
            let gene_rule = if rxn.gene_reaction_rule.trim().is_empty() {
                None
            } else {
                Some(parse_gene_rule(&rxn.gene_reaction_rule, &mut model.genes)?)
            };
            let reaction = ReactionBuilder::default()
                .id(rxn.id)
                .metabolites(rxn.metabolites)
                .name(rxn.name)
                .gene_rule(gene_rule)
                .lower_bound(rxn.lower_bound)
                .upper_bound(rxn.upper_bound)
                .subsystem(rxn.subsystem)
                .build()?;
            model.reactions.insert(reaction.id.clone(), reaction);
        }
        model.refresh_metabolite_reactions();
        info!(
            reactions = model.reactions.len(),
            metabolites = model.metabolites.len(),
            compartments = model.compartments.len(),
            genes = model.genes.len(),
            "read JSON model"
        );
        Ok(model)
    }
}

impl Network {
    /// Serialize the network as `{"nodes": [...], "links": [...]}`
    pub fn to_json_string(&self) -> Result<String, JsonError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), JsonError> {
        let network_string = self.to_json_string()?;
        fs::write(path, network_string)?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Unable to parse a gene rule during conversion from JSON")]
    GeneRuleParserError(#[from] GeneRuleParseError),
    #[error("Invalid metabolite identifier in JSON model")]
    MalformedIdentifier(#[from] IdentifierError),
    #[error("Unable to build reaction")]
    UnableToBuildReaction(#[from] ReactionBuilderError),
    #[error("Unable to build metabolite: {0}")]
    UnableToBuildMetabolite(String),
    #[error("Serde json parse error")]
    SerdeJsonParseError(#[from] serde_json::Error),
    #[error("Unable to read or write file")]
    Io(#[from] std::io::Error),
}

// endregion Conversions
