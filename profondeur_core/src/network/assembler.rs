//! Assemble the metabolite nodes and links contributed by a single reaction
use indexmap::IndexSet;
use tracing::debug;

use crate::configuration::NetworkConfiguration;
use crate::identifier::NodeIdentifier;
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::Reaction;
use crate::network::classifier::{Participant, ReactionClassification, Role};
use crate::network::elements::{Link, MetaboliteNode, NetworkElements, Node};
use crate::network::NetworkError;

/// Extend `prior` with the metabolite nodes and links of `reaction`
///
/// This does not create the reaction node itself, see
/// [`build_network`](crate::network::builder::build_network).
///
/// # Parameters
/// - `reaction`: reaction whose participants are added
/// - `configuration`: compartmentalization and replication settings
/// - `allowed_metabolites`: general metabolite identifiers which may appear in the network
/// - `model`: model providing metabolite attributes
/// - `prior`: elements assembled so far
///
/// # Returns
/// The extended elements, or the error which prevented the reaction from being assembled. On
/// error nothing from the reaction has been added.
pub fn assemble_reaction_elements(
    reaction: &Reaction,
    configuration: &NetworkConfiguration,
    allowed_metabolites: &IndexSet<String>,
    model: &Model,
    mut prior: NetworkElements,
) -> Result<NetworkElements, NetworkError> {
    let classification = ReactionClassification::classify(reaction)?;
    prior.assemble_reaction_elements(
        reaction,
        &classification,
        configuration,
        allowed_metabolites,
        model,
    )?;
    Ok(prior)
}

impl NetworkElements {
    /// Add the metabolite nodes and links of a classified reaction
    ///
    /// Every participant is checked against the model before anything is inserted, so a failed
    /// call leaves the elements untouched.
    pub fn assemble_reaction_elements(
        &mut self,
        reaction: &Reaction,
        classification: &ReactionClassification,
        configuration: &NetworkConfiguration,
        allowed_metabolites: &IndexSet<String>,
        model: &Model,
    ) -> Result<(), NetworkError> {
        check_references(reaction, classification, model)?;

        let reaction_node = NodeIdentifier::Reaction(reaction.id.clone());
        let mut new_nodes = 0usize;
        let mut new_links = 0usize;
        for participant in &classification.participants {
            if !allowed_metabolites.contains(&participant.general) {
                continue;
            }
            let replicate_in = configuration
                .replicates(&participant.general)
                .then_some(reaction.id.as_str());
            let node_id = NodeIdentifier::for_metabolite(
                &participant.general,
                &participant.compartment,
                configuration.compartmentalization,
                replicate_in,
            );

            if self.insert_or_merge_metabolite(
                &node_id,
                participant,
                configuration,
                reaction,
                model,
            ) {
                new_nodes += 1;
            }
            let links = participant_links(
                &node_id,
                &reaction_node,
                participant.role,
                classification.reversible,
            );
            for link in links {
                if self.insert_link(link) {
                    new_links += 1;
                }
            }
        }
        debug!(
            reaction = %reaction.id,
            new_nodes,
            new_links,
            "assembled reaction elements"
        );
        Ok(())
    }

    /// Insert a metabolite node, or record the reaction on an existing one
    ///
    /// Attributes of an existing node are never overwritten, only its reaction back references
    /// grow. Returns whether a new node was created.
    fn insert_or_merge_metabolite(
        &mut self,
        node_id: &NodeIdentifier,
        participant: &Participant,
        configuration: &NetworkConfiguration,
        reaction: &Reaction,
        model: &Model,
    ) -> bool {
        if let Some(Node::Metabolite(existing)) = self.nodes.get_mut(node_id) {
            existing.reactions.insert(reaction.id.clone());
            return false;
        }
        // Presence was checked by check_references
        let Some(metabolite) = model.metabolite(&participant.general) else {
            return false;
        };
        let node = MetaboliteNode {
            identifier: node_id.clone(),
            metabolite: metabolite.id.clone(),
            name: metabolite.name.clone(),
            formula: metabolite.formula.clone(),
            charge: metabolite.charge,
            compartment: configuration
                .compartmentalization
                .then(|| participant.compartment.clone()),
            replication: matches!(node_id, NodeIdentifier::ReactionReplicate { .. }),
            reactions: [reaction.id.clone()].into_iter().collect(),
        };
        self.insert_node(Node::Metabolite(node))
    }
}

/// Check that every participant refers to a metabolite and compartment the model defines
fn check_references(
    reaction: &Reaction,
    classification: &ReactionClassification,
    model: &Model,
) -> Result<(), NetworkError> {
    for participant in &classification.participants {
        if model.metabolite(&participant.general).is_none() {
            return Err(NetworkError::ReferentialIntegrityViolation {
                reaction: reaction.id.clone(),
                reference: participant.general.clone(),
            });
        }
        if !model.compartments.contains_key(&participant.compartment) {
            return Err(NetworkError::ReferentialIntegrityViolation {
                reaction: reaction.id.clone(),
                reference: participant.compartment.clone(),
            });
        }
    }
    Ok(())
}

/// Links between a metabolite node and its reaction node
///
/// Reactants point into the reaction and the reaction points to products, reversible reactions
/// get both directions for every participant.
fn participant_links(
    metabolite: &NodeIdentifier,
    reaction: &NodeIdentifier,
    role: Role,
    reversible: bool,
) -> Vec<Link> {
    let forward = match role {
        Role::Reactant => Link::new(metabolite.clone(), reaction.clone()),
        Role::Product => Link::new(reaction.clone(), metabolite.clone()),
        // Classification rejects these
        Role::Unsupported(_) => return Vec::new(),
    };
    if reversible {
        let backward = Link::new(forward.target.clone(), forward.source.clone());
        vec![forward, backward]
    } else {
        vec![forward]
    }
}
