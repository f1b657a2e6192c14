//! Selection of the reaction and metabolite identifiers a network is built from
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::identifier::compartmental_metabolite;
use crate::metabolic_model::model::Model;
use crate::network::NetworkError;

/// Strategy for combining two selections
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combination {
    /// Elements in both selections
    And,
    /// Elements in either selection
    Or,
    /// Elements of the first selection which are not in the second
    Not,
}

/// Combine two selections, keeping the order of `first` followed by new elements of `second`
pub fn combine(
    strategy: Combination,
    first: &IndexSet<String>,
    second: &IndexSet<String>,
) -> IndexSet<String> {
    match strategy {
        Combination::And => first.intersection(second).cloned().collect(),
        Combination::Or => first.union(second).cloned().collect(),
        Combination::Not => first.difference(second).cloned().collect(),
    }
}

/// Reactions whose subsystem is one of `processes`
pub fn reactions_in_processes(model: &Model, processes: &IndexSet<String>) -> IndexSet<String> {
    model
        .reactions
        .values()
        .filter(|rxn| {
            rxn.subsystem
                .as_ref()
                .map(|s| processes.contains(s))
                .unwrap_or(false)
        })
        .map(|rxn| rxn.id.clone())
        .collect()
}

/// Reactions with at least one participant in one of `compartments`
pub fn reactions_in_compartments(
    model: &Model,
    compartments: &IndexSet<String>,
) -> Result<IndexSet<String>, NetworkError> {
    let mut selection = IndexSet::new();
    for rxn in model.reactions.values() {
        for met_id in rxn.metabolites.keys() {
            if compartments.contains(compartmental_metabolite(met_id)?.compartment) {
                selection.insert(rxn.id.clone());
                break;
            }
        }
    }
    Ok(selection)
}

/// General metabolites participating in any of `reactions`
pub fn metabolites_of_reactions(
    model: &Model,
    reactions: &IndexSet<String>,
) -> Result<IndexSet<String>, NetworkError> {
    let mut selection = IndexSet::new();
    for rxn_id in reactions {
        let rxn = model
            .reaction(rxn_id)
            .ok_or_else(|| NetworkError::NotFound(rxn_id.clone()))?;
        for met_id in rxn.metabolites.keys() {
            selection.insert(compartmental_metabolite(met_id)?.general.to_string());
        }
    }
    Ok(selection)
}

/// Criteria for selecting the reactions of a network
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionCriteria {
    /// Processes to select reactions from, empty places no restriction
    #[serde(default)]
    pub processes: IndexSet<String>,
    /// Compartments to select reactions from, empty places no restriction
    #[serde(default)]
    pub compartments: IndexSet<String>,
}

/// Select the reactions matching every non empty criterion
pub fn select_reactions(
    model: &Model,
    criteria: &SelectionCriteria,
) -> Result<IndexSet<String>, NetworkError> {
    let mut selection: IndexSet<String> = model.reactions.keys().cloned().collect();
    if !criteria.processes.is_empty() {
        let by_process = reactions_in_processes(model, &criteria.processes);
        selection = combine(Combination::And, &selection, &by_process);
    }
    if !criteria.compartments.is_empty() {
        let by_compartment = reactions_in_compartments(model, &criteria.compartments)?;
        selection = combine(Combination::And, &selection, &by_compartment);
    }
    Ok(selection)
}
