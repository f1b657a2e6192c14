//! Build a complete network for a selection of reactions and metabolites
use std::collections::HashSet;

use indexmap::IndexSet;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::configuration::NetworkConfiguration;
use crate::identifier::NodeIdentifier;
use crate::metabolic_model::model::Model;
use crate::network::classifier::ReactionClassification;
use crate::network::elements::{Link, NetworkElements, Node, ReactionNode};
use crate::network::NetworkError;

/// An assembled network, ready to hand to a rendering or layout layer
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Network {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl Network {
    /// Find a node by its serialized identifier
    pub fn node(&self, identifier: &str) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|node| node.identifier().to_string() == identifier)
    }

    /// Find a link by its serialized identifier
    pub fn link(&self, identifier: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.identifier == identifier)
    }

    /// Serialized identifiers of every node
    pub fn node_identifiers(&self) -> Vec<String> {
        self.nodes
            .iter()
            .map(|node| node.identifier().to_string())
            .collect()
    }

    /// Identifiers of every link
    pub fn link_identifiers(&self) -> Vec<String> {
        self.links.iter().map(|link| link.identifier.clone()).collect()
    }
}

impl TryFrom<NetworkElements> for Network {
    type Error = NetworkError;

    /// Flatten the accumulator, checking that node and link identifiers stay unique once
    /// serialized
    fn try_from(elements: NetworkElements) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(elements.nodes.len());
        for id in elements.nodes.keys() {
            let serialized = id.to_string();
            if !seen.insert(serialized.clone()) {
                return Err(NetworkError::IdentifierCollision(serialized));
            }
        }
        // Ids containing the link delimiter can join into the same link identifier
        let mut seen = HashSet::with_capacity(elements.links.len());
        for link in elements.links.values() {
            if !seen.insert(link.identifier.as_str()) {
                return Err(NetworkError::IdentifierCollision(link.identifier.clone()));
            }
        }
        Ok(Network {
            nodes: elements.nodes.into_values().collect(),
            links: elements.links.into_values().collect(),
        })
    }
}

/// Build the network of a selection of reactions
///
/// # Parameters
/// - `reaction_ids`: reactions to include, in the order they are assembled
/// - `metabolite_ids`: general metabolites allowed in the network
/// - `configuration`: compartmentalization and replication settings
/// - `model`: model to read reactions and metabolites from
///
/// # Returns
/// The network, or the first error encountered. No partial network is returned.
///
/// # Examples
/// ```rust
/// use indexmap::IndexSet;
/// use profondeur_core::configuration::NetworkConfiguration;
/// use profondeur_core::metabolic_model::metabolite::Metabolite;
/// use profondeur_core::metabolic_model::model::Model;
/// use profondeur_core::metabolic_model::reaction::ReactionBuilder;
/// use profondeur_core::network::builder::build_network;
///
/// let mut model = Model::new_empty();
/// model.add_compartment("c", "cytosol");
/// model.add_metabolite(Metabolite::new("a"));
/// model.add_metabolite(Metabolite::new("b"));
/// model.add_reaction(
///     ReactionBuilder::default()
///         .id("R1".to_string())
///         .metabolites([("a_c".to_string(), -1.), ("b_c".to_string(), 1.)].into_iter().collect())
///         .lower_bound(0.)
///         .build()
///         .unwrap(),
/// );
/// let metabolites: IndexSet<String> = model.metabolites.keys().cloned().collect();
/// let network = build_network(["R1"], &metabolites, &NetworkConfiguration::default(), &model).unwrap();
/// assert_eq!(network.node_identifiers(), vec!["a", "b", "R1"]);
/// assert_eq!(network.link_identifiers(), vec!["a->R1", "R1->b"]);
/// ```
pub fn build_network<I>(
    reaction_ids: I,
    metabolite_ids: &IndexSet<String>,
    configuration: &NetworkConfiguration,
    model: &Model,
) -> Result<Network, NetworkError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let result = assemble(reaction_ids, metabolite_ids, configuration, model)
        .and_then(Network::try_from);
    match &result {
        Ok(network) => info!(
            nodes = network.nodes.len(),
            links = network.links.len(),
            compartmentalization = configuration.compartmentalization,
            replications = configuration.replication_metabolites.len(),
            "assembled network"
        ),
        Err(err) => warn!(error = %err, "network assembly failed"),
    }
    result
}

fn assemble<I>(
    reaction_ids: I,
    metabolite_ids: &IndexSet<String>,
    configuration: &NetworkConfiguration,
    model: &Model,
) -> Result<NetworkElements, NetworkError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut elements = NetworkElements::new();
    for reaction_id in reaction_ids {
        let reaction_id = reaction_id.as_ref();
        let reaction = model
            .reaction(reaction_id)
            .ok_or_else(|| NetworkError::NotFound(reaction_id.to_string()))?;
        let classification = ReactionClassification::classify(reaction)?;
        elements.assemble_reaction_elements(
            reaction,
            &classification,
            configuration,
            metabolite_ids,
            model,
        )?;
        let transport = classification.is_transport();
        let node = ReactionNode {
            identifier: NodeIdentifier::Reaction(reaction.id.clone()),
            name: reaction.name.clone(),
            lower_bound: reaction.lower_bound,
            upper_bound: reaction.upper_bound,
            reversibility: classification.reversible,
            subsystem: reaction.subsystem.clone(),
            genes: reaction.genes(),
            conversion: classification.conversion(),
            dispersal: classification.dispersal(),
            transport,
            compartments: classification
                .compartments()
                .into_iter()
                .map(|c| c.to_string())
                .collect(),
        };
        if !elements.insert_node(Node::Reaction(node)) {
            debug!(reaction = %reaction_id, "reaction already assembled");
        }
    }
    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::NetworkConfigurationBuilder;
    use crate::metabolic_model::metabolite::Metabolite;
    use crate::metabolic_model::reaction::ReactionBuilder;

    fn model() -> Model {
        let mut model = Model::new_empty();
        model.add_compartment("c", "cytosol");
        model.add_compartment("m", "mitochondrion");
        for id in ["a", "b", "atp", "adp", "pi"] {
            model.add_metabolite(Metabolite::new(id));
        }
        let reactions: [(&str, &[(&str, f64)], f64); 4] = [
            ("R1", &[("a_c", -1.), ("b_c", 1.)], 0.),
            ("R2", &[("atp_c", -1.), ("adp_c", 1.), ("pi_c", 1.)], 0.),
            ("R3", &[("atp_m", -1.), ("adp_m", 1.), ("pi_m", 1.)], -1000.),
            ("ATPt", &[("atp_m", -1.), ("atp_c", 1.)], 0.),
        ];
        for (id, metabolites, lower_bound) in reactions {
            model.add_reaction(
                ReactionBuilder::default()
                    .id(id.to_string())
                    .metabolites(
                        metabolites
                            .iter()
                            .map(|(m, c)| (m.to_string(), *c))
                            .collect(),
                    )
                    .lower_bound(lower_bound)
                    .upper_bound(1000.)
                    .build()
                    .unwrap(),
            );
        }
        model
    }

    fn all_metabolites(model: &Model) -> IndexSet<String> {
        model.metabolites.keys().cloned().collect()
    }

    fn compartmentalized() -> NetworkConfiguration {
        NetworkConfigurationBuilder::default()
            .compartmentalization(true)
            .build()
            .unwrap()
    }

    #[test]
    fn single_irreversible_reaction() {
        let model = model();
        let network =
            build_network(["R1"], &all_metabolites(&model), &compartmentalized(), &model).unwrap();
        assert_eq!(network.node_identifiers(), vec!["a_c", "b_c", "R1"]);
        assert_eq!(network.link_identifiers(), vec!["a_c->R1", "R1->b_c"]);
        assert_eq!(network.node("R1").unwrap().entity(), "reaction");
        assert_eq!(network.node("a_c").unwrap().entity(), "metabolite");
    }

    #[test]
    fn reaction_node_attributes() {
        let model = model();
        let network = build_network(
            ["ATPt", "R3"],
            &all_metabolites(&model),
            &compartmentalized(),
            &model,
        )
        .unwrap();
        match network.node("ATPt").unwrap() {
            Node::Reaction(node) => {
                assert!(!node.reversibility);
                assert!(!node.conversion);
                assert!(node.dispersal);
                assert!(node.transport);
                assert_eq!(node.compartments, vec!["m".to_string(), "c".to_string()]);
            }
            Node::Metabolite(_) => panic!("Expected a reaction node"),
        }
        match network.node("R3").unwrap() {
            Node::Reaction(node) => {
                assert!(node.reversibility);
                assert!(node.conversion);
                assert!(!node.transport);
            }
            Node::Metabolite(_) => panic!("Expected a reaction node"),
        }
        // R3 is reversible, 3 participants in both directions, ATPt adds 2
        assert_eq!(network.links.len(), 8);
    }

    #[test]
    fn compartments_split_nodes() {
        let model = model();
        let network = build_network(
            ["R2", "R3"],
            &all_metabolites(&model),
            &compartmentalized(),
            &model,
        )
        .unwrap();
        assert!(network.node("atp_c").is_some());
        assert!(network.node("atp_m").is_some());
        assert!(network.node("atp").is_none());

        let merged = build_network(
            ["R2", "R3"],
            &all_metabolites(&model),
            &NetworkConfiguration::default(),
            &model,
        )
        .unwrap();
        assert!(merged.node("atp").is_some());
        assert!(merged.node("atp_c").is_none());
        assert_eq!(merged.nodes.len(), 5);
    }

    #[test]
    fn duplicate_reaction_ids() {
        let model = model();
        let once =
            build_network(["R2"], &all_metabolites(&model), &compartmentalized(), &model).unwrap();
        let twice = build_network(
            ["R2", "R2"],
            &all_metabolites(&model),
            &compartmentalized(),
            &model,
        )
        .unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn unknown_reaction() {
        let model = model();
        let result = build_network(
            ["R1", "NOPE"],
            &all_metabolites(&model),
            &compartmentalized(),
            &model,
        );
        assert_eq!(result, Err(NetworkError::NotFound("NOPE".to_string())));
    }

    #[test]
    fn missing_metabolite_fails_whole_build() {
        let mut model = model();
        model.add_reaction(
            ReactionBuilder::default()
                .id("BAD".to_string())
                .metabolites(
                    [("a_c".to_string(), -1.), ("ghost_c".to_string(), 1.)]
                        .into_iter()
                        .collect(),
                )
                .build()
                .unwrap(),
        );
        let result = build_network(
            ["R1", "BAD"],
            &all_metabolites(&model),
            &compartmentalized(),
            &model,
        );
        assert_eq!(
            result,
            Err(NetworkError::ReferentialIntegrityViolation {
                reaction: "BAD".to_string(),
                reference: "ghost".to_string(),
            })
        );
    }

    #[test]
    fn identifier_collision() {
        let mut model = model();
        model.add_metabolite(Metabolite::new("atp_R2"));
        model.add_reaction(
            ReactionBuilder::default()
                .id("R9".to_string())
                .metabolites(
                    [("atp_R2_c".to_string(), -1.), ("a_c".to_string(), 1.)]
                        .into_iter()
                        .collect(),
                )
                .lower_bound(0.)
                .build()
                .unwrap(),
        );
        let config = NetworkConfigurationBuilder::default()
            .replication_metabolites(IndexSet::from(["atp".to_string()]))
            .build()
            .unwrap();
        let result = build_network(["R2", "R9"], &all_metabolites(&model), &config, &model);
        assert_eq!(
            result,
            Err(NetworkError::IdentifierCollision("atp_R2".to_string()))
        );
    }

    #[test]
    fn link_identifier_collision() {
        let mut model = model();
        model.add_metabolite(Metabolite::new("a->b"));
        for (id, participant) in [("b->R1", "a_c"), ("R1", "a->b_c")] {
            model.add_reaction(
                ReactionBuilder::default()
                    .id(id.to_string())
                    .metabolites([(participant.to_string(), -1.)].into_iter().collect())
                    .lower_bound(0.)
                    .build()
                    .unwrap(),
            );
        }
        let result = build_network(
            ["b->R1", "R1"],
            &all_metabolites(&model),
            &NetworkConfiguration::default(),
            &model,
        );
        assert_eq!(
            result,
            Err(NetworkError::IdentifierCollision("a->b->R1".to_string()))
        );
    }

    #[test]
    fn empty_selection() {
        let model = model();
        let network = build_network(
            Vec::<String>::new(),
            &all_metabolites(&model),
            &compartmentalized(),
            &model,
        )
        .unwrap();
        assert_eq!(network, Network::default());
    }

    #[test]
    fn reaction_without_allowed_metabolites_keeps_reaction_node() {
        let model = model();
        let network =
            build_network(["R1"], &IndexSet::new(), &compartmentalized(), &model).unwrap();
        assert_eq!(network.node_identifiers(), vec!["R1"]);
        assert!(network.links.is_empty());
    }

    #[test]
    fn concurrent_builds_share_model() {
        let model = model();
        let metabolites = all_metabolites(&model);
        let config = compartmentalized();
        let expected = build_network(["R1", "R2", "R3"], &metabolites, &config, &model).unwrap();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| build_network(["R1", "R2", "R3"], &metabolites, &config, &model))
                })
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap().unwrap(), expected);
            }
        });
    }
}
