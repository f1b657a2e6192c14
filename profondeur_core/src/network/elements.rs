//! Node and link records of an assembled network, and the accumulator they are collected in
use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::identifier::{link_identifier, NodeIdentifier};

/// Node representing a reaction
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReactionNode {
    pub identifier: NodeIdentifier,
    pub name: Option<String>,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub reversibility: bool,
    pub subsystem: Option<String>,
    pub genes: Vec<String>,
    /// Chemicals differ between reactants and products
    pub conversion: bool,
    /// Participants span more than one compartment
    pub dispersal: bool,
    /// Some metabolite moves between compartments
    pub transport: bool,
    pub compartments: Vec<String>,
}

/// Node representing a metabolite, either general, compartmental, or replicated for a reaction
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetaboliteNode {
    pub identifier: NodeIdentifier,
    /// General metabolite identifier
    pub metabolite: String,
    pub name: Option<String>,
    pub formula: Option<String>,
    pub charge: i32,
    /// Only set when the network is compartmentalized
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compartment: Option<String>,
    pub replication: bool,
    /// Reactions in the network linked to this node
    pub reactions: BTreeSet<String>,
}

/// A node of the network, tagged by entity for the rendering layer
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "entity", rename_all = "lowercase")]
pub enum Node {
    Reaction(ReactionNode),
    Metabolite(MetaboliteNode),
}

impl Node {
    pub fn identifier(&self) -> &NodeIdentifier {
        match self {
            Node::Reaction(node) => &node.identifier,
            Node::Metabolite(node) => &node.identifier,
        }
    }

    /// Entity tag, either `reaction` or `metabolite`
    pub fn entity(&self) -> &'static str {
        match self {
            Node::Reaction(_) => "reaction",
            Node::Metabolite(_) => "metabolite",
        }
    }
}

/// Directed link between a metabolite node and a reaction node
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Link {
    pub identifier: String,
    pub source: NodeIdentifier,
    pub target: NodeIdentifier,
}

impl Link {
    pub fn new(source: NodeIdentifier, target: NodeIdentifier) -> Link {
        Link {
            identifier: link_identifier(&source, &target),
            source,
            target,
        }
    }
}

/// Accumulator for nodes and links while a network is assembled
///
/// Nodes and links are keyed by their structured identifiers and are only ever inserted once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkElements {
    pub nodes: IndexMap<NodeIdentifier, Node>,
    pub links: IndexMap<(NodeIdentifier, NodeIdentifier), Link>,
}

impl NetworkElements {
    pub fn new() -> Self {
        NetworkElements::default()
    }

    /// Insert a node unless one with the same identifier exists, returns whether it was inserted
    pub fn insert_node(&mut self, node: Node) -> bool {
        let id = node.identifier().clone();
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id, node);
        true
    }

    /// Insert a link unless one with the same endpoints exists, returns whether it was inserted
    pub fn insert_link(&mut self, link: Link) -> bool {
        let key = (link.source.clone(), link.target.clone());
        if self.links.contains_key(&key) {
            return false;
        }
        self.links.insert(key, link);
        true
    }

    pub fn contains_node(&self, id: &NodeIdentifier) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}
