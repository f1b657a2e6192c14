//! Utilities for working with metabolite, node and link identifiers
//!
//! Compartmental metabolite identifiers are formed as `{general}_{compartment}`, for example
//! `glc__D_e` is the general metabolite `glc__D` in compartment `e`. Network nodes use the
//! structured [`NodeIdentifier`] which is only turned into a string at the output boundary.
use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Separates a general metabolite identifier from its compartment
pub const COMPARTMENT_DELIMITER: char = '_';
/// Separates a metabolite node identifier from the reaction it is replicated for
pub const REPLICATION_DELIMITER: char = '_';
/// Separates the source and target of a link, never used inside node identifiers
pub const LINK_DELIMITER: &str = "->";

/// Split a compartmental metabolite identifier into (general, compartment)
fn split_compartmental(id: &str) -> Result<(&str, &str), IdentifierError> {
    match id.rsplit_once(COMPARTMENT_DELIMITER) {
        Some((general, compartment)) if !general.is_empty() && !compartment.is_empty() => {
            Ok((general, compartment))
        }
        _ => Err(IdentifierError::MalformedIdentifier(id.to_string())),
    }
}

/// Get the compartment of a compartmental metabolite identifier
///
/// # Examples
/// ```rust
/// use profondeur_core::identifier::compartment_of;
/// assert_eq!(compartment_of("glc__D_e").unwrap(), "e");
/// ```
pub fn compartment_of(id: &str) -> Result<&str, IdentifierError> {
    split_compartmental(id).map(|(_, compartment)| compartment)
}

/// Get the general metabolite identifier of a compartmental metabolite identifier
///
/// # Examples
/// ```rust
/// use profondeur_core::identifier::general_metabolite_of;
/// assert_eq!(general_metabolite_of("glc__D_e").unwrap(), "glc__D");
/// ```
pub fn general_metabolite_of(id: &str) -> Result<&str, IdentifierError> {
    split_compartmental(id).map(|(general, _)| general)
}

/// Form a compartmental metabolite identifier, the inverse of [`general_metabolite_of`] and
/// [`compartment_of`]
pub fn compartmental_identifier(general: &str, compartment: &str) -> String {
    format!("{}{}{}", general, COMPARTMENT_DELIMITER, compartment)
}

/// A general metabolite located in a compartment, borrowed from its identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CompartmentalMetabolite<'a> {
    /// Full compartmental identifier
    pub id: &'a str,
    /// Identifier of the general metabolite
    pub general: &'a str,
    /// Identifier of the compartment
    pub compartment: &'a str,
}

/// Derive the compartmental view of a metabolite identifier
pub fn compartmental_metabolite(id: &str) -> Result<CompartmentalMetabolite<'_>, IdentifierError> {
    let (general, compartment) = split_compartmental(id)?;
    Ok(CompartmentalMetabolite {
        id,
        general,
        compartment,
    })
}

/// Identifier of a node in an assembled network
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeIdentifier {
    /// A reaction node
    Reaction(String),
    /// A metabolite node merging all compartments
    General(String),
    /// A metabolite node for a single compartment
    Compartmental {
        metabolite: String,
        compartment: String,
    },
    /// A metabolite node specific to one reaction
    ReactionReplicate {
        metabolite: String,
        compartment: Option<String>,
        reaction: String,
    },
}

impl NodeIdentifier {
    /// Determine the node identifier for a metabolite participating in a reaction
    ///
    /// # Parameters
    /// - `general`: general metabolite identifier
    /// - `compartment`: compartment of the participant
    /// - `compartmentalize`: whether compartments get separate nodes
    /// - `replicate_in`: `Some(reaction_id)` when the metabolite is replicated per reaction
    pub fn for_metabolite(
        general: &str,
        compartment: &str,
        compartmentalize: bool,
        replicate_in: Option<&str>,
    ) -> NodeIdentifier {
        match (replicate_in, compartmentalize) {
            (Some(reaction), compartmentalize) => NodeIdentifier::ReactionReplicate {
                metabolite: general.to_string(),
                compartment: compartmentalize.then(|| compartment.to_string()),
                reaction: reaction.to_string(),
            },
            (None, true) => NodeIdentifier::Compartmental {
                metabolite: general.to_string(),
                compartment: compartment.to_string(),
            },
            (None, false) => NodeIdentifier::General(general.to_string()),
        }
    }

    /// Whether the identifier refers to a reaction node
    pub fn is_reaction(&self) -> bool {
        matches!(self, NodeIdentifier::Reaction(_))
    }

    /// General metabolite identifier, `None` for reaction nodes
    pub fn metabolite(&self) -> Option<&str> {
        match self {
            NodeIdentifier::Reaction(_) => None,
            NodeIdentifier::General(metabolite)
            | NodeIdentifier::Compartmental { metabolite, .. }
            | NodeIdentifier::ReactionReplicate { metabolite, .. } => Some(metabolite),
        }
    }
}

impl Display for NodeIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeIdentifier::Reaction(id) | NodeIdentifier::General(id) => write!(f, "{}", id),
            NodeIdentifier::Compartmental {
                metabolite,
                compartment,
            } => write!(f, "{}{}{}", metabolite, COMPARTMENT_DELIMITER, compartment),
            NodeIdentifier::ReactionReplicate {
                metabolite,
                compartment,
                reaction,
            } => match compartment {
                Some(compartment) => write!(
                    f,
                    "{}{}{}{}{}",
                    metabolite,
                    COMPARTMENT_DELIMITER,
                    compartment,
                    REPLICATION_DELIMITER,
                    reaction
                ),
                None => write!(f, "{}{}{}", metabolite, REPLICATION_DELIMITER, reaction),
            },
        }
    }
}

impl Serialize for NodeIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Form the identifier of the link from `source` to `target`
pub fn link_identifier(source: &NodeIdentifier, target: &NodeIdentifier) -> String {
    format!("{}{}{}", source, LINK_DELIMITER, target)
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Identifier `{0}` is missing a compartment delimiter")]
    MalformedIdentifier(String),
}
