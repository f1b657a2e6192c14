//! Assign transport reactions to the processes whose metabolites they move
//!
//! A transport reaction usually has no process of its own, or a generic one such as
//! "Transport, mitochondrial". It is counted as part of another process when it moves a
//! metabolite between at least two compartments in which that process uses the metabolite.
use indexmap::{IndexMap, IndexSet};

use crate::metabolic_model::model::Model;
use crate::network::classifier::ReactionClassification;
use crate::network::NetworkError;

/// Map of process -> general metabolite -> compartments
pub type ProcessDispersal = IndexMap<String, IndexMap<String, IndexSet<String>>>;

/// Collect the compartments in which each metabolite participates within each process
pub fn collect_process_dispersal(model: &Model) -> Result<ProcessDispersal, NetworkError> {
    let mut collection = ProcessDispersal::new();
    for rxn in model.reactions.values() {
        let Some(process) = &rxn.subsystem else {
            continue;
        };
        let classification = ReactionClassification::classify(rxn)?;
        let metabolites = collection.entry(process.clone()).or_default();
        for participant in &classification.participants {
            metabolites
                .entry(participant.general.clone())
                .or_default()
                .insert(participant.compartment.clone());
        }
    }
    Ok(collection)
}

/// Restrict a dispersal collection to metabolites found in more than one compartment
pub fn filter_process_transports(dispersal: &ProcessDispersal) -> ProcessDispersal {
    dispersal
        .iter()
        .map(|(process, metabolites)| {
            let transports = metabolites
                .iter()
                .filter(|(_, compartments)| compartments.len() > 1)
                .map(|(met, compartments)| (met.clone(), compartments.clone()))
                .collect();
            (process.clone(), transports)
        })
        .collect()
}

/// Processes of every reaction, its own subsystem first followed by the processes it joins by
/// transport
pub fn reaction_processes(
    model: &Model,
) -> Result<IndexMap<String, IndexSet<String>>, NetworkError> {
    let process_transports = filter_process_transports(&collect_process_dispersal(model)?);
    let mut processes = IndexMap::with_capacity(model.reactions.len());
    for (rxn_id, rxn) in &model.reactions {
        let mut reaction_processes: IndexSet<String> = rxn.subsystem.iter().cloned().collect();
        let transports = ReactionClassification::classify(rxn)?.transports();
        for (process, metabolites) in &process_transports {
            let joins = transports.iter().any(|transport| {
                metabolites
                    .get(&transport.metabolite)
                    .map(|compartments| {
                        transport
                            .compartments
                            .iter()
                            .filter(|c| compartments.contains(*c))
                            .count()
                            > 1
                    })
                    .unwrap_or(false)
            });
            if joins {
                reaction_processes.insert(process.clone());
            }
        }
        processes.insert(rxn_id.clone(), reaction_processes);
    }
    Ok(processes)
}
