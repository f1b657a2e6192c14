//! Assembly of node/link networks from a metabolic model
//!
//! The [`builder`] drives assembly over a selection of reactions, using the [`classifier`] to
//! derive per reaction facts and the [`assembler`] to add metabolite nodes and links.
use thiserror::Error;

use crate::identifier::IdentifierError;

pub mod assembler;
pub mod builder;
pub mod classifier;
pub mod elements;

/// Errors raised while assembling a network
///
/// None of these are transient, retrying with the same model and configuration reproduces them.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum NetworkError {
    /// A participant identifier could not be split into metabolite and compartment
    #[error(transparent)]
    MalformedIdentifier(#[from] IdentifierError),
    /// A stoichiometric coefficient other than -1 or +1
    #[error("Reaction `{reaction}` has unsupported coefficient {coefficient} for `{metabolite}`")]
    UnsupportedStoichiometry {
        reaction: String,
        metabolite: String,
        coefficient: f64,
    },
    /// Reaction requested that the model does not contain
    #[error("Reaction `{0}` not found in model")]
    NotFound(String),
    /// Reaction refers to a metabolite or compartment the model does not define
    #[error("Reaction `{reaction}` refers to `{reference}` which is not defined in the model")]
    ReferentialIntegrityViolation { reaction: String, reference: String },
    /// Two different nodes, or two different links, would be written with the same identifier
    #[error("Multiple nodes or links share the identifier `{0}`")]
    IdentifierCollision(String),
}
